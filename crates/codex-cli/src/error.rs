use codex_core::CodexError;

/// Alias for `Result<T, ShellError>`.
pub type ShellResult<T = ()> = Result<T, ShellError>;

/// Errors that end the interactive session.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// Terminal input or output failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Loading, saving or mutating the codex failed.
    #[error(transparent)]
    Codex(#[from] CodexError),
}
