//! Configuration for a codex session.

use std::path::PathBuf;

/// File name of the persisted document, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "series_codex_data.json";

/// Configuration for a codex session.
#[derive(Debug, Clone)]
pub struct CodexConfig {
    /// Where the document is persisted.
    pub data_file: PathBuf,
    /// Column at which prose output is wrapped.
    pub wrap_width: usize,
}

impl Default for CodexConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            wrap_width: 80,
        }
    }
}

impl CodexConfig {
    /// Set the document path.
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CodexConfig::default();
        assert_eq!(config.data_file, PathBuf::from("series_codex_data.json"));
        assert_eq!(config.wrap_width, 80);
    }

    #[test]
    fn builder_sets_data_file() {
        let config = CodexConfig::default().with_data_file("x.json");
        assert_eq!(config.data_file, PathBuf::from("x.json"));
        assert_eq!(config.wrap_width, 80);
    }
}
