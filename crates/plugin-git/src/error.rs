//! Error types for plugin-git

/// Result type for plugin-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while synchronizing a plugin repository.
///
/// Each variant carries the underlying git engine's message verbatim so
/// substring-based diagnostics stay stable; the variant itself is the
/// structured outcome for callers that prefer not to parse text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to clone plugin: {message}")]
    Clone { message: String },

    #[error("unable to update plugin: {message}")]
    Update { message: String },

    #[error("unable to read plugin head: {message}")]
    Head { message: String },

    #[error("unable to read plugin remote: {message}")]
    Remote { message: String },
}

impl Error {
    /// Verbatim message from the underlying git engine, without the
    /// contextual prefix added by `Display`.
    pub fn engine_message(&self) -> &str {
        match self {
            Error::Clone { message }
            | Error::Update { message }
            | Error::Head { message }
            | Error::Remote { message } => message,
        }
    }
}
