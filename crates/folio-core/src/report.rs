//! Prepared report snapshots, as seen by the export stage
//!
//! The report engine lays out pages before export starts. Exporters only see
//! the result: pages made of bands made of positioned objects. Anything that
//! can hand out those snapshots implements [`PreparedPages`].

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::format::ValueFormat;

/// Position and size in page units (millimeters)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its left/top corner and size
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Role of a band on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BandKind {
    ReportTitle,
    ReportSummary,
    PageHeader,
    PageFooter,
    ColumnHeader,
    ColumnFooter,
    GroupHeader,
    GroupFooter,
    DataHeader,
    #[default]
    Data,
    DataFooter,
    Child,
    Overlay,
}

/// A positioned object inside a band
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReportObject {
    pub name: String,
    /// Bounds relative to the owning band
    pub bounds: Rect,
    /// Display text, already formatted by the report engine
    pub text: Option<String>,
    /// Text contains inline HTML tags that should survive export
    pub html_tags: bool,
    /// Format of the underlying value, for targets that keep raw values
    pub format: Option<ValueFormat>,
    pub fill: Option<Color>,
    pub text_color: Color,
}

impl Default for ReportObject {
    fn default() -> Self {
        Self {
            name: String::new(),
            bounds: Rect::default(),
            text: None,
            html_tags: false,
            format: None,
            fill: None,
            text_color: Color::BLACK,
        }
    }
}

impl ReportObject {
    /// Create a text object
    pub fn text<N: Into<String>, T: Into<String>>(name: N, bounds: Rect, text: T) -> Self {
        Self {
            name: name.into(),
            bounds,
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Attach a value format
    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// A horizontal strip of content on a page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Band {
    pub name: String,
    pub kind: BandKind,
    /// Vertical position on the page
    pub top: f32,
    pub width: f32,
    pub height: f32,
    /// Whether the band should be rendered into export targets
    pub exportable: bool,
    /// Band is pinned to the bottom of the page
    pub print_on_bottom: bool,
    pub objects: Vec<ReportObject>,
}

impl Default for Band {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: BandKind::default(),
            top: 0.0,
            width: 0.0,
            height: 0.0,
            exportable: true,
            print_on_bottom: false,
            objects: Vec::new(),
        }
    }
}

impl Band {
    /// Create an exportable band
    pub fn new<N: Into<String>>(name: N, kind: BandKind, top: f32, height: f32) -> Self {
        Self {
            name: name.into(),
            kind,
            top,
            height,
            ..Default::default()
        }
    }

    /// Add an object (builder style)
    pub fn with_object(mut self, object: ReportObject) -> Self {
        self.objects.push(object);
        self
    }

    /// Mark the band exportable or not (builder style)
    pub fn exportable(mut self, exportable: bool) -> Self {
        self.exportable = exportable;
        self
    }

    /// Pin the band to the page bottom (builder style)
    pub fn print_on_bottom(mut self, print_on_bottom: bool) -> Self {
        self.print_on_bottom = print_on_bottom;
        self
    }

    /// Bottom edge on the page
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// One prepared page
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Page {
    /// Paper width in millimeters
    pub width: f32,
    /// Paper height in millimeters
    pub height: f32,
    /// Bands in document order
    pub bands: Vec<Band>,
}

impl Page {
    /// Create an empty page with the given paper size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            bands: Vec::new(),
        }
    }

    /// Add a band (builder style)
    pub fn with_band(mut self, band: Band) -> Self {
        self.bands.push(band);
        self
    }

    /// Count of every band and object on the page; bands count as objects
    pub fn all_objects_count(&self) -> usize {
        self.bands.iter().map(|band| 1 + band.objects.len()).sum()
    }

    /// A page holding a single band and nothing else is a placeholder left by
    /// the report engine and carries no content worth exporting.
    pub fn is_blank(&self) -> bool {
        self.bands.len() == 1 && self.all_objects_count() == 1
    }
}

/// Source of prepared page snapshots
pub trait PreparedPages {
    /// Number of prepared pages
    fn count(&self) -> usize;

    /// Snapshot of the page at a zero-based index, with its paper size applied
    fn page(&mut self, index: usize) -> Result<Page>;

    /// Called once the export stage is done with a page, whether or not it
    /// was exported successfully
    fn release(&mut self, _index: usize) {}
}

/// Prepared pages held in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryPages {
    pages: Vec<Page>,
}

impl MemoryPages {
    /// Wrap already prepared pages
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Append a page
    pub fn push(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// All held pages
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }
}

impl PreparedPages for MemoryPages {
    fn count(&self) -> usize {
        self.pages.len()
    }

    fn page(&mut self, index: usize) -> Result<Page> {
        self.pages
            .get(index)
            .cloned()
            .ok_or(Error::PageOutOfBounds(index, self.pages.len()))
    }
}

/// Cooperative stop flag shared between a report and whoever controls it
///
/// Clones share the same flag, so a UI thread can hold one and abort an
/// export running elsewhere. The flag is polled, never waited on.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal(Arc<AtomicBool>);

impl AbortSignal {
    /// Create a cleared flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the running operation to stop soon
    pub fn abort(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Clear a pending abort request
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    /// Whether an abort has been requested
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What a report is currently busy with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ReportOperation {
    #[default]
    None,
    Running,
    Printing,
    Exporting,
}

impl ReportOperation {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => ReportOperation::Running,
            2 => ReportOperation::Printing,
            3 => ReportOperation::Exporting,
            _ => ReportOperation::None,
        }
    }
}

/// Shared view of a report's current [`ReportOperation`]
///
/// Clones observe the same marker, so a UI can show "exporting" while the
/// run holds the report mutably.
#[derive(Debug, Clone, Default)]
pub struct OperationMarker(Arc<AtomicU8>);

impl OperationMarker {
    /// Create a marker set to [`ReportOperation::None`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current operation
    pub fn get(&self) -> ReportOperation {
        ReportOperation::from_u8(self.0.load(Ordering::Relaxed))
    }

    /// Replace the current operation
    pub fn set(&self, operation: ReportOperation) {
        self.0.store(operation as u8, Ordering::Relaxed);
    }
}

/// A prepared report together with its run state
pub struct Report {
    name: String,
    pages: Option<Box<dyn PreparedPages>>,
    abort: AbortSignal,
    operation: OperationMarker,
}

impl Report {
    /// Create a report over prepared pages
    pub fn new<P: PreparedPages + 'static>(pages: P) -> Self {
        Self {
            name: String::new(),
            pages: Some(Box::new(pages)),
            abort: AbortSignal::new(),
            operation: OperationMarker::new(),
        }
    }

    /// Create a report that has not been prepared yet
    pub fn unprepared() -> Self {
        Self {
            name: String::new(),
            pages: None,
            abort: AbortSignal::new(),
            operation: OperationMarker::new(),
        }
    }

    /// Set the report name (builder style), used to derive output file names
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Report name, empty when unset
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prepared pages, or `None` before the report has been prepared
    pub fn prepared_pages(&self) -> Option<&dyn PreparedPages> {
        self.pages.as_deref()
    }

    /// Mutable access to the prepared pages
    pub fn prepared_pages_mut(&mut self) -> Option<&mut (dyn PreparedPages + 'static)> {
        self.pages.as_deref_mut()
    }

    /// Handle to the report's abort flag
    pub fn abort_signal(&self) -> &AbortSignal {
        &self.abort
    }

    /// Whether an abort has been requested
    pub fn is_aborted(&self) -> bool {
        self.abort.is_aborted()
    }

    /// Handle to the report's operation marker
    pub fn operation_marker(&self) -> &OperationMarker {
        &self.operation
    }

    /// Current operation
    pub fn operation(&self) -> ReportOperation {
        self.operation.get()
    }

    /// Set the current operation
    pub fn set_operation(&mut self, operation: ReportOperation) {
        self.operation.set(operation);
    }
}
