use crate::id::Id;

/// Alias for `Result<T, CodexError>`.
pub type CodexResult<T> = Result<T, CodexError>;

/// Errors that can occur when loading, saving, or manipulating a codex.
#[derive(Debug, thiserror::Error)]
pub enum CodexError {
    /// Reading or writing the persisted document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted document could not be (de)serialized.
    #[error("malformed codex document: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested book does not exist.
    #[error("book not found: {0}")]
    BookNotFound(Id),

    /// The requested master character does not exist.
    #[error("character not found: {0}")]
    CharacterNotFound(Id),

    /// The requested master location does not exist.
    #[error("location not found: {0}")]
    LocationNotFound(Id),

    /// The requested lore entry does not exist.
    #[error("lore entry not found: {0}")]
    LoreNotFound(Id),

    /// A 1-based position did not address an element of the list.
    #[error("no entry at position {position} (list has {len})")]
    IndexOutOfRange {
        /// The 1-based position that was requested.
        position: usize,
        /// The length of the list at the time of the request.
        len: usize,
    },
}
