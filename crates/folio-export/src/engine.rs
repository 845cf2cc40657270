//! Export orchestration
//!
//! [`ExportEngine`] resolves which pages to export, pulls each page snapshot
//! from the report, and drives an [`Exporter`] through its hooks. A failure on
//! one page is logged and the run moves on to the next page; only a malformed
//! page selection, an output error or a failing `start`/`finish` hook ends
//! the run with an error. Staging files are removed on every exit path.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use folio_core::{BandKind, PageSelector, PreparedPages, Report, ReportOperation};

use crate::error::{ExportError, ExportResult};
use crate::exporter::Exporter;
use crate::options::ExportOptions;
use crate::progress::{progress_message, ProgressReporter, SystemViewer, ViewerLauncher};
use crate::run::ExportRun;

/// Statistics from an export run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportStats {
    /// Number of pages the selection resolved to
    pub pages_selected: usize,
    /// Pages that went through every hook
    pub pages_exported: usize,
    /// Placeholder pages skipped without calling any hook
    pub pages_skipped_empty: usize,
    /// Pages abandoned after an error
    pub pages_failed: usize,
    /// Bands handed to the exporter
    pub bands_exported: usize,
    /// Whether the run stopped early on an abort request
    pub aborted: bool,
    /// Staging files that could not be deleted
    pub cleanup_failures: usize,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
    /// Output artifacts of the run
    pub generated_files: Vec<PathBuf>,
}

impl ExportStats {
    /// Whether the run did any work at all
    pub fn is_empty(&self) -> bool {
        self.pages_selected == 0
    }
}

enum PageOutcome {
    Exported,
    Empty,
}

/// Marks a report as exporting for as long as it lives; dropping it, on any
/// exit path including unwinding, puts the marker back to `None`.
struct ExportingMarker<'r> {
    report: &'r mut Report,
}

impl<'r> ExportingMarker<'r> {
    fn set(report: &'r mut Report) -> Self {
        report.set_operation(ReportOperation::Exporting);
        Self { report }
    }
}

impl Deref for ExportingMarker<'_> {
    type Target = Report;

    fn deref(&self) -> &Report {
        self.report
    }
}

impl DerefMut for ExportingMarker<'_> {
    fn deref_mut(&mut self) -> &mut Report {
        self.report
    }
}

impl Drop for ExportingMarker<'_> {
    fn drop(&mut self) {
        self.report.set_operation(ReportOperation::None);
    }
}

/// Drives an [`Exporter`] over the prepared pages of a [`Report`]
pub struct ExportEngine<E: Exporter> {
    exporter: E,
    options: ExportOptions,
    preview: bool,
    progress: Option<Box<dyn ProgressReporter>>,
    viewer: Box<dyn ViewerLauncher>,
}

impl<E: Exporter> ExportEngine<E> {
    /// Create an engine with default options
    pub fn new(exporter: E) -> Self {
        Self {
            exporter,
            options: ExportOptions::default(),
            preview: false,
            progress: None,
            viewer: Box::new(SystemViewer),
        }
    }

    /// Set the export options (builder style)
    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the progress reporter used when `show_progress` is on
    pub fn with_progress<P: ProgressReporter + 'static>(mut self, progress: P) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Replace the viewer used by `open_after_export`
    pub fn with_viewer<V: ViewerLauncher + 'static>(mut self, viewer: V) -> Self {
        self.viewer = Box::new(viewer);
        self
    }

    /// Preview rendering exports every band, exportable or not
    pub fn preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Current export options
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Mutable export options, for changing settings between runs
    pub fn options_mut(&mut self) -> &mut ExportOptions {
        &mut self.options
    }

    /// The wrapped exporter
    pub fn exporter(&self) -> &E {
        &self.exporter
    }

    /// Mutable access to the wrapped exporter
    pub fn exporter_mut(&mut self) -> &mut E {
        &mut self.exporter
    }

    /// Consume the engine and return the exporter
    pub fn into_exporter(self) -> E {
        self.exporter
    }

    /// Zero-based indices the current options select, or `None` when the
    /// report has not been prepared
    pub fn resolve_pages(&self, report: &Report) -> ExportResult<Option<Vec<usize>>> {
        let Some(pages) = report.prepared_pages() else {
            return Ok(None);
        };
        let selected = PageSelector::new(self.options.page_range)
            .with_page_numbers(&self.options.page_numbers)
            .with_current_page(self.options.current_page)
            .resolve(pages.count())?;
        Ok(Some(selected))
    }

    /// Export a report to a writer
    ///
    /// Does nothing, and writes nothing, when the report is unprepared or the
    /// selection is empty.
    pub fn export<W: Write>(&mut self, report: &mut Report, mut writer: W) -> ExportResult<ExportStats> {
        let pages = match self.resolve_pages(report)? {
            Some(pages) if !pages.is_empty() => pages,
            _ => {
                log::debug!("nothing to export for report '{}'", report.name());
                return Ok(ExportStats::default());
            }
        };
        let stats = self.run_pages(report, &mut writer, pages, None)?;
        writer.flush()?;
        Ok(stats)
    }

    /// Export a report to a new file at `path`
    ///
    /// The file is only created when there is something to export, and is
    /// removed again when the run fails. With `open_after_export` set, the
    /// finished file is handed to the viewer; a viewer failure is logged and
    /// otherwise ignored.
    pub fn export_to_file<P: AsRef<Path>>(&mut self, report: &mut Report, path: P) -> ExportResult<ExportStats> {
        let path = path.as_ref();
        let pages = match self.resolve_pages(report)? {
            Some(pages) if !pages.is_empty() => pages,
            _ => {
                log::debug!("nothing to export for report '{}'", report.name());
                return Ok(ExportStats::default());
            }
        };

        let mut file = BufWriter::new(File::create(path)?);
        let result = self
            .run_pages(report, &mut file, pages, Some(path))
            .and_then(|stats| {
                file.flush()?;
                Ok(stats)
            });
        drop(file);
        let stats = match result {
            Ok(stats) => stats,
            Err(e) => {
                if let Err(source) = fs::remove_file(path) {
                    let cleanup = ExportError::ResourceCleanup {
                        path: path.display().to_string(),
                        source,
                    };
                    log::warn!("{}", cleanup);
                }
                return Err(e);
            }
        };

        if self.options.open_after_export && self.options.allow_open_after {
            if let Err(e) = self.viewer.launch(path) {
                log::warn!("{}", ExportError::ViewerLaunch(format!("{}: {}", path.display(), e)));
            }
        }
        Ok(stats)
    }

    fn run_pages(
        &mut self,
        report: &mut Report,
        writer: &mut dyn Write,
        pages: Vec<usize>,
        file_name: Option<&Path>,
    ) -> ExportResult<ExportStats> {
        let started = Instant::now();
        let abort = report.abort_signal().clone();
        let name = report.name().to_owned();
        let show_progress = self.options.show_progress;
        let total = pages.len();
        let mut stats = ExportStats {
            pages_selected: total,
            ..Default::default()
        };

        let mut run = ExportRun::new(writer, self.options.clone(), pages);
        if let Some(path) = file_name {
            run.set_file_name(path);
        }

        log::debug!("exporting {} page(s) of report '{}'", total, name);
        self.exporter.start(&mut run)?;
        let mut report = ExportingMarker::set(report);

        if show_progress {
            if let Some(progress) = self.progress.as_mut() {
                progress.start();
            }
        } else {
            abort.reset();
        }

        if let Some(source) = report.prepared_pages_mut() {
            for position in 0..total {
                if show_progress {
                    if let Some(progress) = self.progress.as_mut() {
                        progress.progress(&progress_message(position + 1, total), position + 1, total);
                    }
                }
                if abort.is_aborted() {
                    log::debug!("export aborted before page {} of {}", position + 1, total);
                    stats.aborted = true;
                    break;
                }

                let index = run.pages()[position];
                run.set_cursor(Some(position));
                let outcome = self.render_page(&mut run, source, index, &mut stats);
                source.release(index);

                match outcome {
                    Ok(PageOutcome::Exported) => stats.pages_exported += 1,
                    Ok(PageOutcome::Empty) => stats.pages_skipped_empty += 1,
                    Err(e) => {
                        stats.pages_failed += 1;
                        log::warn!("page {} skipped: {}", index + 1, e);
                    }
                }
            }
        }
        run.set_cursor(None);

        let finished = self.exporter.finish(&mut run);
        stats.cleanup_failures = run.delete_temp_files();
        if show_progress {
            if let Some(progress) = self.progress.as_mut() {
                progress.finish();
            }
        }
        drop(report);
        stats.elapsed = started.elapsed();
        stats.generated_files = run.into_generated_files();

        log::debug!(
            "export of '{}' took {:?}: {} exported, {} empty, {} failed",
            name,
            stats.elapsed,
            stats.pages_exported,
            stats.pages_skipped_empty,
            stats.pages_failed
        );

        finished?;
        Ok(stats)
    }

    fn render_page(
        &mut self,
        run: &mut ExportRun<'_>,
        source: &mut dyn PreparedPages,
        index: usize,
        stats: &mut ExportStats,
    ) -> ExportResult<PageOutcome> {
        let mut page = source.page(index).map_err(|e| ExportError::PageRender {
            page: index,
            message: e.to_string(),
        })?;
        if page.is_blank() {
            log::trace!("page {} is empty, skipped", index + 1);
            return Ok(PageOutcome::Empty);
        }

        self.exporter.page_begin(run, &page)?;

        let shift_enabled = self.options.shift_non_exportable;
        let mut shift = 0.0f32;
        for band in page.bands.iter_mut() {
            if shift_enabled && shift != 0.0 && band.kind != BandKind::PageFooter && !band.print_on_bottom {
                band.top -= shift;
            }
            if band.exportable || self.preview {
                log::trace!("band '{}' on page {}", band.name, index + 1);
                self.exporter.band(run, band)?;
                stats.bands_exported += 1;
            } else if shift_enabled {
                shift += band.height;
            }
        }

        self.exporter.page_end(run, &page)?;
        Ok(PageOutcome::Exported)
    }
}
