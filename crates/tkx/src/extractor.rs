//! 🚇 Extractor — three nested loops and a string split, taken seriously.
//!
//! 🎬 COLD OPEN — INT. OPS WIKI — "HOW TO LIST ALL TUNNEL PORTS" — LAST EDITED 2019
//!
//! The page said: "just run the script." The script was the documentation.
//! The documentation was the script. It walked sites, then datacenters, then
//! the keys inside, and printed what it found. This module is that walk, with
//! the errors given names.
//!
//! ```text
//!   document ─▶ site ─▶ datacenter ─▶ encoded key ─▶ TunnelKey ─┬─▶ "label:port,"
//!   (object)   (object)  (object)      (string)                 └─▶ PortSet
//!                                                                     │
//!                                         after the last key ─────────┴─▶ "ports:\n:port,..."
//! ```
//!
//! ## Knowledge Graph 🧠
//! - Order: source-document order at every level (`document::Level` keeps an `IndexMap`)
//! - Pairs are written as they are found; nothing is buffered for later
//! - First failure wins. Output already written stays written.
//! - Innermost values are never looked at, or even built. They can be anything. Even `null`. 🦆

use std::io::Write;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::document::{Level, TunnelDocument};
use crate::emit;
use crate::encoded_key::{MIN_FIELDS, TunnelKey};
use crate::error::ExtractError;
use crate::ports::PortSet;

/// 📊 Head counts from one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub sites: usize,
    pub datacenters: usize,
    pub tunnels: usize,
    pub distinct_ports: usize,
}

/// 📦 What a completed pass hands back once both sections are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionOutcome {
    pub ports: PortSet,
    pub summary: ExtractionSummary,
}

/// 🧨 Parses raw document text. Object key order is kept as written; innermost
/// values are syntax-checked and skipped.
pub fn parse_document(raw: &str) -> Result<TunnelDocument, ExtractError> {
    serde_json::from_str(raw).map_err(ExtractError::InvalidJson)
}

fn as_object<'d, T>(
    level: &'d Level<T>,
    location: impl FnOnce() -> String,
) -> Result<&'d IndexMap<String, T>, ExtractError> {
    match level {
        Level::Object(entries) => Ok(entries),
        Level::NotAnObject(found) => Err(ExtractError::UnexpectedShape {
            location: location(),
            found: *found,
        }),
    }
}

/// 🔄 Visits every `(site, datacenter, encoded_key)` triple in document order.
///
/// The callback sees each innermost key exactly once. Any level that isn't an
/// object aborts the walk with [`ExtractError::UnexpectedShape`]; any callback
/// error aborts it too. The returned summary leaves `distinct_ports` at zero
/// because the walk itself doesn't know what a port is.
pub fn walk_tunnels<'d, F>(document: &'d TunnelDocument, mut on_key: F) -> Result<ExtractionSummary, ExtractError>
where
    F: FnMut(&'d str, &'d str, &'d str) -> Result<(), ExtractError>,
{
    let mut summary = ExtractionSummary::default();
    let sites = as_object(document, || "the document root".to_string())?;

    for (site, datacenters) in sites {
        let datacenters = as_object(datacenters, || format!("site '{site}'"))?;
        summary.sites += 1;
        debug!("🏙️ site '{}' has {} datacenter(s)", site, datacenters.len());

        for (datacenter, tunnels) in datacenters {
            let tunnels = as_object(tunnels, || format!("site '{site}', datacenter '{datacenter}'"))?;
            summary.datacenters += 1;
            debug!("🏢 site '{}', datacenter '{}' has {} tunnel(s)", site, datacenter, tunnels.len());

            for encoded in tunnels.keys() {
                on_key(site.as_str(), datacenter.as_str(), encoded.as_str())?;
                summary.tunnels += 1;
            }
        }
    }

    Ok(summary)
}

/// 🚀 The whole pass: pairs out as they're found, then the ports section.
///
/// Returns the port set and the head counts. On error, whatever was already
/// written to `out` stays there and the `ports:` section is never written.
pub fn extract_to<W: Write>(document: &TunnelDocument, out: &mut W) -> Result<ExtractionOutcome, ExtractError> {
    let mut ports = PortSet::new();

    let mut summary = walk_tunnels(document, |site, datacenter, encoded| {
        let tunnel = TunnelKey::parse(encoded).map_err(|short| ExtractError::MalformedKey {
            site: site.to_owned(),
            datacenter: datacenter.to_owned(),
            key: encoded.to_owned(),
            fields: short.fields,
            needed: MIN_FIELDS,
        })?;
        trace!("🚇 '{}' → {}", encoded, tunnel);

        emit::write_pair(&mut *out, &tunnel)?;
        ports.insert(tunnel.port);
        Ok(())
    })?;

    summary.distinct_ports = ports.len();
    emit::write_ports(out, &ports)?;

    Ok(ExtractionOutcome { ports, summary })
}
