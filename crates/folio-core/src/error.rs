//! Error types for folio-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in folio-core
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed page-number expression (e.g. "1,x" or "-")
    #[error("Invalid page numbers '{expression}': {reason}")]
    InvalidPageNumbers { expression: String, reason: String },

    /// Invalid column name or index
    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    /// Prepared page index out of bounds
    #[error("Page index {0} out of bounds (count: {1})")]
    PageOutOfBounds(usize, usize),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    pub(crate) fn page_numbers<S: Into<String>>(expression: &str, reason: S) -> Self {
        Error::InvalidPageNumbers {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}
