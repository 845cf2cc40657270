//! # folio
//!
//! Export stage of a paginated report generator.
//!
//! Folio takes a report whose pages are already laid out and hands the
//! selected pages to a format writer, together with the encoding toolkit
//! such writers need.
//!
//! ## Features
//!
//! - Page selection from expressions like `1,3-5,8-`
//! - Export orchestration with per-page failure isolation and abort support
//! - Staging files that are always cleaned up
//! - Text to HTML, XML and OpenDocument markup
//! - Spreadsheet number formats for number, currency, date and percent values
//! - Zlib envelopes with a streaming Adler-32 checksum
//! - Spreadsheet cell addressing
//!
//! ## Example
//!
//! ```rust
//! use std::io;
//!
//! use folio::prelude::*;
//!
//! struct Titles(Vec<String>);
//!
//! impl Exporter for Titles {
//!     fn band(&mut self, _run: &mut ExportRun<'_>, band: &Band) -> ExportResult<()> {
//!         self.0.push(band.name.clone());
//!         Ok(())
//!     }
//! }
//!
//! let page = |name: &str| {
//!     Page::new(210.0, 297.0)
//!         .with_band(Band::new(name, BandKind::Data, 0.0, 10.0))
//!         .with_band(Band::new("Footer", BandKind::PageFooter, 280.0, 10.0))
//! };
//! let mut report = Report::new(MemoryPages::new(vec![page("First"), page("Second")]));
//!
//! let mut engine = ExportEngine::new(Titles(Vec::new())).with_options(ExportOptions::pages("2"));
//! engine.export(&mut report, io::sink()).unwrap();
//! assert_eq!(engine.exporter().0, vec!["Second", "Footer"]);
//! ```

pub mod prelude;

// Re-export core types
pub use folio_core::{
    address::{cell_reference, column_index, column_name},
    page_range::expand_page_numbers,
    AbortSignal, Band, BandKind, Color, CurrencyNegativePattern, CurrencyPositivePattern, Error,
    MemoryPages, NumberNegativePattern, OperationMarker, Page, PageRange, PageSelector,
    PreparedPages, Rect, Report, ReportObject, ReportOperation, Result, ValueFormat,
};

// Re-export encoding types
pub use folio_encoding::{
    adler32, compress, excel2007_string, html_color, html_color_code, html_string, number_format,
    odt_string, parse_value, text, xml_string, zlib_deflate, Adler32, LocaleInfo, MarkupDialect,
    MarkupTranscoder, NumberFormatSynthesizer, ParsedValue, TextRenderMode,
};

// Re-export export types
pub use folio_export::{
    ExportEngine, ExportError, ExportOptions, ExportResult, ExportRun, ExportStats, Exporter,
    InstantExport, LogProgress, ProgressReporter, SystemViewer, ViewerLauncher, TEMP_EXPORT_DIR,
};
