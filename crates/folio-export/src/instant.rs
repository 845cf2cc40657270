//! Export driven page by page by the caller

use std::io::Write;
use std::path::PathBuf;

use folio_core::{Band, Page};

use crate::error::ExportResult;
use crate::exporter::Exporter;
use crate::options::ExportOptions;
use crate::run::ExportRun;

/// Feeds pages and bands to an exporter as a report engine produces them,
/// without a prepared report
///
/// # Examples
/// ```
/// use folio_core::{Band, BandKind, Page};
/// use folio_export::{Exporter, ExportOptions, InstantExport};
///
/// struct Count(usize);
/// impl Exporter for Count {
///     fn band(&mut self, _run: &mut folio_export::ExportRun<'_>, _band: &Band) -> folio_export::ExportResult<()> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
///
/// let mut out: Vec<u8> = Vec::new();
/// let page = Page::new(210.0, 297.0);
/// let mut export = InstantExport::start(Count(0), &mut out, ExportOptions::default()).unwrap();
/// export.begin_page(&page).unwrap();
/// export.band(&Band::new("Data", BandKind::Data, 0.0, 10.0)).unwrap();
/// export.end_page(&page).unwrap();
/// let (count, _files) = export.finish().unwrap();
/// assert_eq!(count.0, 1);
/// ```
pub struct InstantExport<'w, E: Exporter> {
    exporter: E,
    run: ExportRun<'w>,
}

impl<'w, E: Exporter> InstantExport<'w, E> {
    /// Call the exporter's `start` hook and return the open export
    pub fn start(mut exporter: E, writer: &'w mut dyn Write, options: ExportOptions) -> ExportResult<Self> {
        let mut run = ExportRun::new(writer, options, Vec::new());
        exporter.start(&mut run)?;
        Ok(Self { exporter, run })
    }

    /// Hand the next page to the exporter
    pub fn begin_page(&mut self, page: &Page) -> ExportResult<()> {
        self.exporter.page_begin(&mut self.run, page)
    }

    /// Hand one band of the current page to the exporter
    pub fn band(&mut self, band: &Band) -> ExportResult<()> {
        self.exporter.band(&mut self.run, band)
    }

    /// Close the current page
    pub fn end_page(&mut self, page: &Page) -> ExportResult<()> {
        self.exporter.page_end(&mut self.run, page)
    }

    /// Run state shared with the exporter
    pub fn run(&mut self) -> &mut ExportRun<'w> {
        &mut self.run
    }

    /// Call the exporter's `finish` hook and delete staging files
    ///
    /// Returns the exporter together with the generated files.
    pub fn finish(self) -> ExportResult<(E, Vec<PathBuf>)> {
        let Self {
            mut exporter,
            mut run,
        } = self;
        let finished = exporter.finish(&mut run);
        run.delete_temp_files();
        finished?;
        Ok((exporter, run.into_generated_files()))
    }
}
