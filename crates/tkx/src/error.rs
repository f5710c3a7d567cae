//! 💀 Errors — every way a tunnel document can let you down, itemized.
//!
//! 🎬 *[a single key walks into the parser. it has three underscores. it needed four.]*
//!
//! Every failure here is fatal. Nobody retries, nobody skips the bad key and
//! carries on humming. The variants exist so callers (and tests) can tell a
//! missing file from a short key without string-matching a log line. 🦆
//!
//! 🧠 Knowledge graph:
//! - Produced by: `backends::*` (source loading), `encoded_key` (splitting),
//!   `extractor` (shape walking + writing)
//! - Wrapped in `anyhow::Error` at the `run()` seam, still downcastable

use std::path::PathBuf;

/// 💀 The full catalogue of fatal outcomes for one extraction pass.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// 📂 The input file could not be opened or read.
    #[error("💀 could not read tunnel document '{}'", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 🧨 The document is not valid JSON.
    #[error("💀 tunnel document is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    /// 🏗️ One of the three nesting levels is not a JSON object.
    #[error("💀 expected a JSON object at {location}, found {found}")]
    UnexpectedShape { location: String, found: &'static str },

    /// ✂️ An encoded key split into fewer fields than the extractor needs.
    #[error(
        "💀 encoded key '{key}' under site '{site}', datacenter '{datacenter}' has {fields} '_'-separated fields, need at least {needed}"
    )]
    MalformedKey {
        site: String,
        datacenter: String,
        key: String,
        fields: usize,
        needed: usize,
    },

    /// 🚰 Standard output refused our bytes.
    #[error("💀 failed to write extraction output")]
    Output(#[source] std::io::Error),
}
