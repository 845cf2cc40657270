//! # folio-core
//!
//! Core data structures for the folio report export pipeline.
//!
//! This crate provides the types shared by every export stage:
//! - [`Page`], [`Band`], [`ReportObject`] - Prepared report snapshots
//! - [`PreparedPages`] and [`Report`] - Where snapshots come from, plus run state
//! - [`PageRange`] and [`PageSelector`] - Which pages an export covers
//! - [`address`] - Spreadsheet column names and cell references
//! - [`ValueFormat`] - Abstract value formats attached to fields
//!
//! ## Example
//!
//! ```rust
//! use folio_core::{PageRange, PageSelector};
//! use folio_core::address::cell_reference;
//!
//! let pages = PageSelector::new(PageRange::PageNumbers)
//!     .with_page_numbers("1,3-")
//!     .resolve(5)
//!     .unwrap();
//! assert_eq!(pages, vec![0, 2, 3, 4]);
//!
//! assert_eq!(cell_reference(28, 4).unwrap(), "AB4");
//! ```

pub mod address;
pub mod color;
pub mod error;
pub mod format;
pub mod page_range;
pub mod report;

pub use color::Color;
pub use error::{Error, Result};
pub use format::{
    CurrencyNegativePattern, CurrencyPositivePattern, NumberNegativePattern, ValueFormat,
};
pub use page_range::{PageRange, PageSelector};
pub use report::{
    AbortSignal, Band, BandKind, MemoryPages, OperationMarker, Page, PreparedPages, Rect, Report,
    ReportObject, ReportOperation,
};
