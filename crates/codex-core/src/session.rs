//! The session object owned by the interactive loop.

use crate::config::CodexConfig;
use crate::document::Document;
use crate::error::CodexResult;
use crate::store::Store;

/// One interactive session: the loaded document and where it lives.
///
/// Handlers borrow the session mutably; there is no global state.
#[derive(Debug)]
pub struct Session {
    config: CodexConfig,
    store: Store,
    document: Document,
}

impl Session {
    /// Load (or create) the document named by `config`.
    pub fn open(config: CodexConfig) -> CodexResult<Self> {
        let store = Store::new(config.data_file.clone());
        let document = store.load()?;
        Ok(Self {
            config,
            store,
            document,
        })
    }

    /// The session configuration.
    pub fn config(&self) -> &CodexConfig {
        &self.config
    }

    /// Read access to the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Run a mutation and persist the whole document afterwards.
    pub fn apply<T>(&mut self, mutate: impl FnOnce(&mut Document) -> T) -> CodexResult<T> {
        let out = mutate(&mut self.document);
        self.store.save(&self.document)?;
        Ok(out)
    }

    /// Persist the document as it stands.
    pub fn save(&self) -> CodexResult<()> {
        self.store.save(&self.document)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::book::BookInput;

    #[test]
    fn apply_persists_every_mutation() {
        let dir = TempDir::new().unwrap();
        let config = CodexConfig::default().with_data_file(dir.path().join("codex.json"));
        let mut session = Session::open(config.clone()).unwrap();
        let title = session
            .apply(|doc| doc.create_book(BookInput::titled("One")).title.clone())
            .unwrap();
        assert_eq!(title, "One");

        let reopened = Session::open(config).unwrap();
        assert_eq!(reopened.document(), session.document());
        assert_eq!(reopened.document().books.len(), 1);
    }
}
