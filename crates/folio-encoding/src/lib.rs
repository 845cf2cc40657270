//! # folio-encoding
//!
//! Encoding toolkit used by concrete exporters:
//! - [`MarkupTranscoder`] - Plain text to HTML, XML or OpenDocument markup
//! - [`NumberFormatSynthesizer`] - Value formats to spreadsheet format patterns
//! - [`parse_value`] - Display text back to numbers and dates
//! - [`zlib`] - Zlib envelope with a streaming Adler-32 trailer
//! - [`text`] - Hex, quoted-printable, URL and date helpers
//!
//! ## Example
//!
//! ```rust
//! use folio_core::ValueFormat;
//! use folio_encoding::{html_string, number_format, TextRenderMode};
//!
//! assert_eq!(html_string("a < b", TextRenderMode::Default), "a &lt; b");
//! assert_eq!(
//!     number_format(&ValueFormat::currency("$", 2)),
//!     "&quot;$&quot;#,##0.00;(&quot;$&quot;#,##0.00)"
//! );
//! ```

pub mod locale;
pub mod markup;
pub mod number_format;
pub mod parse;
pub mod text;
pub mod zlib;

pub use locale::LocaleInfo;
pub use markup::{
    excel2007_string, html_color, html_color_code, html_string, odt_string, xml_string,
    MarkupDialect, MarkupTranscoder, TextRenderMode,
};
pub use number_format::{number_format, NumberFormatSynthesizer};
pub use parse::{parse_value, ParsedValue};
pub use zlib::{adler32, compress, zlib_deflate, Adler32};
