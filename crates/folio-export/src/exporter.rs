//! The hook surface implemented by concrete exporters

use folio_core::{Band, Page};

use crate::error::ExportResult;
use crate::run::ExportRun;

/// A target format writer driven by [`crate::ExportEngine`]
///
/// The engine calls `start` once, then for every exported page `page_begin`,
/// `band` for each exportable band in document order, and `page_end`.
/// `finish` runs once at the end, even when pages failed or the run was
/// aborted. All hooks have empty defaults.
pub trait Exporter {
    /// Save-dialog filter, e.g. `HTML file (*.html)|*.html`
    fn file_filter(&self) -> &str {
        ""
    }

    /// Extension of the produced file including the dot, taken from the filter
    fn file_extension(&self) -> Option<&str> {
        let filter = self.file_filter();
        filter.rfind('.').map(|i| &filter[i..])
    }

    fn start(&mut self, _run: &mut ExportRun<'_>) -> ExportResult<()> {
        Ok(())
    }

    fn page_begin(&mut self, _run: &mut ExportRun<'_>, _page: &Page) -> ExportResult<()> {
        Ok(())
    }

    fn band(&mut self, _run: &mut ExportRun<'_>, _band: &Band) -> ExportResult<()> {
        Ok(())
    }

    fn page_end(&mut self, _run: &mut ExportRun<'_>, _page: &Page) -> ExportResult<()> {
        Ok(())
    }

    fn finish(&mut self, _run: &mut ExportRun<'_>) -> ExportResult<()> {
        Ok(())
    }
}

impl<E: Exporter + ?Sized> Exporter for &mut E {
    fn file_filter(&self) -> &str {
        (**self).file_filter()
    }

    fn file_extension(&self) -> Option<&str> {
        (**self).file_extension()
    }

    fn start(&mut self, run: &mut ExportRun<'_>) -> ExportResult<()> {
        (**self).start(run)
    }

    fn page_begin(&mut self, run: &mut ExportRun<'_>, page: &Page) -> ExportResult<()> {
        (**self).page_begin(run, page)
    }

    fn band(&mut self, run: &mut ExportRun<'_>, band: &Band) -> ExportResult<()> {
        (**self).band(run, band)
    }

    fn page_end(&mut self, run: &mut ExportRun<'_>, page: &Page) -> ExportResult<()> {
        (**self).page_end(run, page)
    }

    fn finish(&mut self, run: &mut ExportRun<'_>) -> ExportResult<()> {
        (**self).finish(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Html;

    impl Exporter for Html {
        fn file_filter(&self) -> &str {
            "HTML file (*.html)|*.html"
        }
    }

    struct Bare;

    impl Exporter for Bare {}

    #[test]
    fn test_file_extension_from_filter() {
        assert_eq!(Html.file_extension(), Some(".html"));
        assert_eq!(Bare.file_extension(), None);
    }
}
