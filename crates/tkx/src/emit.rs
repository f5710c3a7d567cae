//! 🖨️ Emit — the two output sections, byte for byte.
//!
//! 🎬 *[no brackets. no quotes. no newlines between tokens. just commas, marching.]*
//!
//! ```text
//!   x:1,y:1,ports:
//!   :1,
//! ```
//!
//! 📡 Pair tokens are `label:port,`, written one at a time as the traversal
//! finds them. Then the literal line `ports:\n`. Then `:port,` per distinct
//! port. No trailing newline after the last port. Downstream scripts depend
//! on this exact shape, so it does not get "improved". 🦆
//!
//! 🧠 Knowledge graph:
//! - Writes to any `std::io::Write`: `Vec<u8>` in tests, locked stdout in `run`
//! - Every io failure becomes `ExtractError::Output`

use std::io::Write;

use crate::encoded_key::TunnelKey;
use crate::error::ExtractError;
use crate::ports::PortSet;

/// 🏷️ The line separating pairs from ports.
pub const PORTS_HEADER: &str = "ports:";
/// 🔗 What follows every token, pairs and ports alike.
pub const TOKEN_TERMINATOR: char = ',';

/// 🖨️ Writes one `label:port,` token.
pub fn write_pair<W: Write>(out: &mut W, tunnel: &TunnelKey<'_>) -> Result<(), ExtractError> {
    write!(out, "{tunnel}{TOKEN_TERMINATOR}").map_err(ExtractError::Output)
}

/// 🖨️ Writes `ports:\n` followed by `:port,` for each port in first-seen order.
pub fn write_ports<W: Write>(out: &mut W, ports: &PortSet) -> Result<(), ExtractError> {
    writeln!(out, "{PORTS_HEADER}").map_err(ExtractError::Output)?;
    for port in ports.iter() {
        write!(out, ":{port}{TOKEN_TERMINATOR}").map_err(ExtractError::Output)?;
    }
    Ok(())
}
