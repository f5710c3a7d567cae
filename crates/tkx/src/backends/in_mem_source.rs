//! # Previously, on tkx...
//!
//! 🎬 The document was never on disk. It lived in a TOML string, or a test,
//! or the fevered imagination of someone debugging at 3am. It still deserved
//! to be extracted.
//!
//! `InMemoryDocumentSource` hands back the string it was configured with.
//! No I/O, no heartbeat, no mortgage on the line. Just heap memory. 🦆

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::backends::DocumentSource;
use crate::error::ExtractError;

/// 🧠 A document carried inline in the config.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct InMemorySourceConfig {
    pub document: String,
}

/// 📦 The world's most reliable source: it already has the answer.
#[derive(Debug)]
pub(crate) struct InMemoryDocumentSource {
    source_config: InMemorySourceConfig,
}

impl InMemoryDocumentSource {
    pub(crate) fn new(source_config: InMemorySourceConfig) -> Self {
        Self { source_config }
    }
}

#[async_trait]
impl DocumentSource for InMemoryDocumentSource {
    async fn load(&mut self) -> Result<String, ExtractError> {
        Ok(self.source_config.document.clone())
    }
}
