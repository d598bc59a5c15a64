//! The persistence gateway: one JSON document on disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::CodexResult;

/// Reads and writes the document at a fixed path.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// A store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, creating and persisting the default one if absent.
    ///
    /// An existing document is returned exactly as stored; a malformed one
    /// is an error with no repair attempt.
    pub fn load(&self) -> CodexResult<Document> {
        if !self.path.exists() {
            let document = Document::new();
            self.save(&document)?;
            tracing::info!(path = %self.path.display(), "created new codex document");
            return Ok(document);
        }
        let content = fs::read_to_string(&self.path)?;
        let document = serde_json::from_str(&content)?;
        tracing::debug!(path = %self.path.display(), "loaded codex document");
        Ok(document)
    }

    /// Replace the persisted copy with `document`.
    ///
    /// The new content is written to a sibling temporary file first and
    /// renamed over the target.
    pub fn save(&self, document: &Document) -> CodexResult<()> {
        let mut content = serde_json::to_string_pretty(document)?;
        content.push('\n');
        let tmp = self.tmp_path();
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "saved codex document");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
