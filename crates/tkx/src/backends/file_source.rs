//! 📂 Previously, on "Things That Could Go Wrong With A File"...
//!
//! The disk was quiet. Too quiet. A lone process had been tasked with reading
//! one JSON file. Just one. It didn't exist, or it was a directory, or it was
//! somebody's half-finished export. Every one of those is fatal, and every one
//! of them gets reported with the path we actually tried. 🦆
//!
//! 📐 The whole file is read into one String. The document is a map of maps of
//! maps, so there is no streaming shortcut: the parser wants all of it anyway.
//! The handle is dropped inside `read_to_string`, before we return, on every path.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::backends::DocumentSource;
use crate::error::ExtractError;

/// 🗺️ Where the tunnel document lives unless someone says otherwise.
pub const DEFAULT_INPUT_PATH: &str = "../input/tunnels.json";

fn default_file_name() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_PATH)
}

// 📂 FileSourceConfig lives next to the source that uses it, so nobody goes on a
// scavenger hunt for it at 2am.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FileSourceConfig {
    #[serde(default = "default_file_name")]
    pub file_name: PathBuf,
}

impl Default for FileSourceConfig {
    fn default() -> Self {
        Self { file_name: default_file_name() }
    }
}

/// 📂 Reads the configured file, once, all of it.
#[derive(Debug)]
pub(crate) struct FileDocumentSource {
    source_config: FileSourceConfig,
}

impl FileDocumentSource {
    pub(crate) fn new(source_config: FileSourceConfig) -> Self {
        Self { source_config }
    }
}

#[async_trait]
impl DocumentSource for FileDocumentSource {
    async fn load(&mut self) -> Result<String, ExtractError> {
        let path = &self.source_config.file_name;
        info!("📂 reading tunnel document from '{}'", path.display());

        // -- 💀 missing, unreadable, a directory, not UTF-8: all of it ends up here.
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ExtractError::SourceUnavailable { path: path.clone(), source })?;

        debug!("📏 read {} bytes from '{}'", raw.len(), path.display());
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn the_one_where_the_file_is_actually_there() {
        let mut file = tempfile::NamedTempFile::new().expect("💀 temp file refused to exist");
        write!(file, r#"{{"s1": {{}}}}"#).expect("💀 temp file refused our bytes");

        let mut source = FileDocumentSource::new(FileSourceConfig { file_name: file.path().to_path_buf() });
        let raw = source.load().await.expect("💀 an existing file should load");
        assert_eq!(raw, r#"{"s1": {}}"#);
    }

    #[tokio::test]
    async fn the_one_where_the_file_ghosted_us() {
        let dir = tempfile::tempdir().expect("💀 temp dir refused to exist");
        let missing = dir.path().join("tunnels.json");

        let mut source = FileDocumentSource::new(FileSourceConfig { file_name: missing.clone() });
        match source.load().await {
            Err(ExtractError::SourceUnavailable { path, source }) => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("💀 expected SourceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn the_one_where_the_default_path_is_the_old_hardcoded_one() {
        assert_eq!(FileSourceConfig::default().file_name, PathBuf::from("../input/tunnels.json"));
    }
}
