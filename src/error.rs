use miette::Diagnostic;
use thiserror::Error;

/// Result type for analyzer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Custom error types for the analyzer
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum Error {
    #[error("I/O error: {0}")]
    #[diagnostic(code(csleuth::io_error))]
    Io(String),

    #[error("Failed to open source file {path}: {message}")]
    #[diagnostic(code(csleuth::source_open))]
    SourceOpen { path: String, message: String },

    #[error("Internal error: {message}")]
    #[diagnostic(code(csleuth::internal_error))]
    Internal { message: String },
}

impl Error {
    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
