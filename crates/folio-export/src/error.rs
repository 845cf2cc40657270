//! Export error types

use thiserror::Error;

/// Result type for export operations
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Errors that can occur while exporting a report
#[derive(Debug, Error)]
pub enum ExportError {
    /// Malformed input such as a bad page-number expression
    #[error("Format error: {0}")]
    Format(#[from] folio_core::Error),

    /// IO error on the output target or a staging file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// One page could not be exported
    #[error("Failed to export page {page}: {message}")]
    PageRender { page: usize, message: String },

    /// A staging file could not be removed
    #[error("Failed to clean up {path}: {source}")]
    ResourceCleanup {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The exported file could not be opened in a viewer
    #[error("Failed to open viewer: {0}")]
    ViewerLaunch(String),

    /// An exporter hook reported a failure
    #[error("Exporter error: {0}")]
    Hook(String),
}

impl ExportError {
    /// Create a hook error from any message
    pub fn hook<S: Into<String>>(msg: S) -> Self {
        ExportError::Hook(msg.into())
    }
}
