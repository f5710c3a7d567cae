//! 🔌 Backends — where the tunnel document comes from.
//!
//! 🚰 A source hands over the raw JSON text, whole, exactly once per run.
//! The extractor doesn't care whether it came off a disk or out of a string
//! someone typed into a TOML file. It just wants the text.
//!
//! 🎭 Two backends today: a file (the real one) and in-memory (the one tests
//! and config-embedded fixtures use). Adding a third means a variant here and
//! a variant in `SourceConfig`. That's the whole ceremony.
//!
//! 🦆 The duck is here because every file must have one. This is law.

use async_trait::async_trait;

use crate::app_config::SourceConfig;
use crate::error::ExtractError;

pub(crate) mod file_source;
pub(crate) mod in_mem_source;

// 🎯 Re-export backend-specific configs so callers can do `backends::FileSourceConfig`
// instead of spelunking into `backends::file_source::FileSourceConfig`.
pub use file_source::FileSourceConfig;
pub use in_mem_source::InMemorySourceConfig;

/// 🚰 Something that can produce the raw tunnel document.
///
/// # Contract
/// - `load` returns the complete document text, or a `SourceUnavailable` error.
/// - Any handle acquired along the way is released before `load` returns.
#[async_trait]
pub(crate) trait DocumentSource: std::fmt::Debug {
    /// 📦 Fetch the whole document as text.
    async fn load(&mut self) -> Result<String, ExtractError>;
}

/// 🎭 The many faces of a DocumentSource, dispatched without a vtable.
#[derive(Debug)]
pub(crate) enum SourceBackend {
    File(file_source::FileDocumentSource),
    InMemory(in_mem_source::InMemoryDocumentSource),
}

impl SourceBackend {
    /// 🏗️ Picks the backend the config asked for.
    pub(crate) fn from_config(source_config: SourceConfig) -> Self {
        match source_config {
            SourceConfig::File(config) => SourceBackend::File(file_source::FileDocumentSource::new(config)),
            SourceConfig::InMemory(config) => {
                SourceBackend::InMemory(in_mem_source::InMemoryDocumentSource::new(config))
            }
        }
    }
}

#[async_trait]
impl DocumentSource for SourceBackend {
    async fn load(&mut self) -> Result<String, ExtractError> {
        match self {
            SourceBackend::File(f) => f.load().await,
            SourceBackend::InMemory(i) => i.load().await,
        }
    }
}
