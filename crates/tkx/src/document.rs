//! 🗂️ Document — only the three levels we walk, and not one byte deeper.
//!
//! 🎬 *[a tunnel value arrives. it is 200 arrays deep and ends in 1e400.]*
//! *["I don't need to know," says the parser. "I only need your key."]*
//!
//! The tunnel document is `{ site: { datacenter: { encoded_key: _ } } }`.
//! The `_` is never read, so it is never built: innermost values are skipped
//! with `IgnoredAny`, which checks the JSON syntax and nothing else. No depth
//! limit, no f64 range check, no allocation for a value nobody will look at.
//!
//! The three walked levels are [`Level`]s: either an object, kept in document
//! order, or a note of what else turned up there so the extractor can report
//! an `UnexpectedShape` with a location instead of a serde column number. 🦆
//!
//! 🧠 Knowledge graph:
//! - Built by: `extractor::parse_document`
//! - Walked by: `extractor::walk_tunnels`
//! - Duplicate keys keep their first position and their last value

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

/// 🏗️ One nesting level: an object in document order, or whatever wasn't one.
#[derive(Debug, Clone)]
pub enum Level<T> {
    Object(IndexMap<String, T>),
    /// The kind of JSON value found instead, e.g. `"an array"`.
    NotAnObject(&'static str),
}

/// 🚇 The innermost level: encoded keys whose values are skipped, unbuilt.
pub type Tunnels = Level<IgnoredAny>;
/// 🏢 Datacenters of one site.
pub type Datacenters = Level<Tunnels>;
/// 🗺️ The whole document: sites at the root.
pub type TunnelDocument = Level<Datacenters>;

struct LevelVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for LevelVisitor<T> {
    type Value = Level<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, T>()? {
            entries.insert(key, value);
        }
        Ok(Level::Object(entries))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        // -- 🗑️ drain it so the parser stays in sync, then report what it was
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Level::NotAnObject("an array"))
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(Level::NotAnObject("a string"))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(Level::NotAnObject("a boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(Level::NotAnObject("a number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(Level::NotAnObject("a number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(Level::NotAnObject("a number"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Level::NotAnObject("null"))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Level::NotAnObject("null"))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Level<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LevelVisitor(PhantomData))
    }
}
