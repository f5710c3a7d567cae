//! 🚇 tkx — the tunnel-key extractor.
//!
//! Reads a `{ site: { datacenter: { encoded_key: _ } } }` document, pulls the
//! label and port out of every `_`-separated key, and prints
//! `label:port,` pairs followed by a `ports:` line and the distinct ports.
//!
//! 🧠 Knowledge graph:
//! - `app_config`  → where the document comes from (figment, env + TOML)
//! - `backends`    → file / in-memory document sources
//! - `document`    → the three walked levels, innermost values skipped unbuilt
//! - `extractor`   → the three-level walk, pairs streamed as found
//! - `encoded_key` → the split
//! - `ports`       → the ordered, deduplicated port set
//! - `emit`        → the exact output bytes
//!
//! Stdout belongs to the output contract. Logs go wherever the subscriber
//! sends them, which in `tkx-cli` is stderr. 🦆

pub mod app_config;
mod backends;
pub mod document;
pub mod emit;
pub mod encoded_key;
pub mod error;
pub mod extractor;
pub mod ports;

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::app_config::AppConfig;
use crate::backends::{DocumentSource, SourceBackend};
use crate::document::TunnelDocument;
pub use crate::error::ExtractError;
pub use crate::extractor::{ExtractionOutcome, ExtractionSummary};

/// 🚀 Runs one extraction pass and writes the result to stdout.
///
/// The document is loaded and parsed before stdout is locked, so the lock is
/// never held across an `.await` and the future stays `Send`. Stdout is flushed
/// before returning, error or not, so pairs written before a fatal key are not
/// lost in a buffer.
pub async fn run(app_config: AppConfig) -> Result<ExtractionSummary> {
    let document = load_document(app_config).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = extract_document(&document, &mut out);
    let flushed = out.flush().map_err(ExtractError::Output);

    let outcome = outcome?;
    flushed.context("💀 stdout would not flush after a successful pass")?;
    Ok(outcome.summary)
}

/// 🎯 Same as [`run`], but into any writer. Tests point this at a `Vec<u8>`.
pub async fn run_with_writer<W: Write>(app_config: AppConfig, out: &mut W) -> Result<ExtractionOutcome> {
    let document = load_document(app_config).await?;
    extract_document(&document, out)
}

/// 📂 Loads and parses the configured document. Nothing is written here: bad
/// input means no output at all.
async fn load_document(app_config: AppConfig) -> Result<TunnelDocument> {
    let mut source = SourceBackend::from_config(app_config.source_config);

    let raw = source
        .load()
        .await
        .context("💀 Couldn't load the tunnel document. Nothing was extracted.")?;

    let document = extractor::parse_document(&raw).context("💀 The tunnel document isn't valid JSON.")?;
    Ok(document)
}

fn extract_document<W: Write>(document: &TunnelDocument, out: &mut W) -> Result<ExtractionOutcome> {
    let outcome = extractor::extract_to(document, out).context("💀 Extraction stopped partway through.")?;

    let summary = &outcome.summary;
    info!(
        "✅ extracted {} tunnel(s) across {} site(s) and {} datacenter(s), {} distinct port(s)",
        summary.tunnels, summary.sites, summary.datacenters, summary.distinct_ports
    );

    Ok(outcome)
}
