//! ✂️ Encoded keys — positional records hiding inside JSON object keys.
//!
//! 🎬 COLD OPEN — INT. NETWORK CLOSET — 2:14 AM
//!
//! Somebody, years ago, decided that a tunnel's name should also be its
//! database. `edge_fra_core_vpn-a_4443` is not a string. It is five columns
//! wearing a trench coat. This module takes the coat off.
//!
//! ```text
//!   edge _ fra _ core _ vpn-a _ 4443 [_ whatever _ else]
//!    0      1     2      3       4      ignored
//!                        │       │
//!                      label    port
//! ```
//!
//! Only fields 3 and 4 matter. Fields 0–2 are ignored. Anything past index 4
//! is ignored too, silently, because nobody ever said what it means. 🦆
//!
//! 🧠 Knowledge graph:
//! - Used by: `extractor::extract_to` (one parse per innermost key)
//! - Borrows from the key string: zero allocations per tunnel
//! - Fields are never escaped. What the key says is what stdout gets.

use std::fmt;

/// 🔪 The character between fields.
pub const FIELD_SEPARATOR: char = '_';
/// 🏷️ Index of the tunnel label field.
pub const LABEL_FIELD: usize = 3;
/// 🔌 Index of the port field.
pub const PORT_FIELD: usize = 4;
/// 📏 Fewest fields a key may split into and still carry a label and a port.
pub const MIN_FIELDS: usize = PORT_FIELD + 1;

/// ✂️ A key that split into too few fields to reach the port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("encoded key has {fields} fields, need at least {}", MIN_FIELDS)]
pub struct KeyTooShort {
    pub fields: usize,
}

/// 🚇 The derived pair of one encoded key: `(field3, field4)`.
///
/// Renders as `label:port` via `Display`, which is exactly the token the
/// pair list prints (minus its trailing comma).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TunnelKey<'a> {
    pub label: &'a str,
    pub port: &'a str,
}

impl<'a> TunnelKey<'a> {
    /// ✂️ Split `encoded` on `_` and pick out the label and port.
    ///
    /// Fails with [`KeyTooShort`] when fewer than [`MIN_FIELDS`] fields
    /// come out. Empty fields count as fields: `a___b_` is five of them.
    pub fn parse(encoded: &'a str) -> Result<Self, KeyTooShort> {
        // -- 🎯 nth() walks the iterator, so we only split as far as the port.
        let mut fields = encoded.split(FIELD_SEPARATOR);
        let label = fields.nth(LABEL_FIELD);
        let port = fields.next();

        match (label, port) {
            (Some(label), Some(port)) => Ok(Self { label, port }),
            _ => Err(KeyTooShort {
                fields: encoded.split(FIELD_SEPARATOR).count(),
            }),
        }
    }
}

impl fmt::Display for TunnelKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.label, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_one_where_five_fields_give_up_their_label_and_port() {
        let tunnel = TunnelKey::parse("a_b_c_x_1").expect("💀 five fields is the minimum, and this is five");
        assert_eq!(tunnel.label, "x");
        assert_eq!(tunnel.port, "1");
        assert_eq!(tunnel.to_string(), "x:1");
    }

    #[test]
    fn the_one_where_extra_fields_are_politely_ignored() {
        let tunnel = TunnelKey::parse("edge_fra_core_vpn-a_4443_spare_parts")
            .expect("💀 extra fields should not be fatal");
        assert_eq!(tunnel.to_string(), "vpn-a:4443");
    }

    #[test]
    fn the_one_where_short_keys_never_reach_the_port() {
        assert_eq!(TunnelKey::parse("too_short"), Err(KeyTooShort { fields: 2 }));
        assert_eq!(TunnelKey::parse("a_b_c_d"), Err(KeyTooShort { fields: 4 }));
        assert_eq!(TunnelKey::parse(""), Err(KeyTooShort { fields: 1 }));
    }

    #[test]
    fn the_one_where_empty_fields_still_count() {
        // 🧪 four underscores, five fields, all of them empty. Still legal.
        let tunnel = TunnelKey::parse("____").expect("💀 empty fields are fields");
        assert_eq!(tunnel.label, "");
        assert_eq!(tunnel.port, "");
        assert_eq!(tunnel.to_string(), ":");
    }

    #[test]
    fn the_one_where_odd_characters_pass_through_unescaped() {
        let tunnel = TunnelKey::parse("s_d_c_\"quoted\",comma_:colon").expect("💀 parse");
        assert_eq!(tunnel.to_string(), "\"quoted\",comma::colon");
    }
}
