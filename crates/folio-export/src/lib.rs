//! # folio-export
//!
//! Export orchestration for prepared reports.
//!
//! A concrete format writer implements [`Exporter`]; [`ExportEngine`] decides
//! which pages to export and calls the writer's hooks in document order.
//! [`InstantExport`] drives the same hooks without a prepared report.

pub mod engine;
pub mod error;
pub mod exporter;
pub mod instant;
pub mod options;
pub mod progress;
pub mod run;

pub use engine::{ExportEngine, ExportStats};
pub use error::{ExportError, ExportResult};
pub use exporter::Exporter;
pub use instant::InstantExport;
pub use options::{ExportOptions, TEMP_EXPORT_DIR};
pub use progress::{progress_message, LogProgress, ProgressReporter, SystemViewer, ViewerLauncher};
pub use run::ExportRun;
