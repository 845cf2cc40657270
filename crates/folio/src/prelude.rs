//! Prelude module - common imports for folio users
//!
//! ```rust
//! use folio::prelude::*;
//! ```

pub use crate::{
    // Report model
    Band,
    BandKind,
    Color,
    // Exporting
    ExportEngine,
    ExportError,
    ExportOptions,
    ExportResult,
    ExportRun,
    ExportStats,
    Exporter,
    InstantExport,
    // Encoding
    LocaleInfo,
    MarkupDialect,
    MarkupTranscoder,
    MemoryPages,
    NumberFormatSynthesizer,
    Page,
    PageRange,
    ParsedValue,
    PreparedPages,
    Rect,
    Report,
    ReportObject,
    TextRenderMode,
    ValueFormat,
};
