//! Export options

use std::path::PathBuf;

use folio_core::PageRange;

/// Name of the staging folder created under the temp root
pub const TEMP_EXPORT_DIR: &str = "TempExport";

/// Options shared by every exporter
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExportOptions {
    /// Which pages to export (default: all)
    pub page_range: PageRange,
    /// Page-number expression such as `1,3-5,7-`, used with [`PageRange::PageNumbers`]
    pub page_numbers: String,
    /// One-based page exported with [`PageRange::Current`] (default: 1)
    pub current_page: usize,
    /// Open the result in the system viewer after a file export
    pub open_after_export: bool,
    /// Whether the host allows opening the result at all (default: true)
    pub allow_open_after: bool,
    /// Report progress and keep a pending abort request
    pub show_progress: bool,
    /// Move bands up to fill the space left by non-exportable bands
    pub shift_non_exportable: bool,
    /// Scale applied by exporters that render at a size (default: 1.0)
    pub zoom: f32,
    /// The exporter writes more than one output file
    ///
    /// This field and the two below are persisted settings for hosts (save
    /// dialogs, multi-file and tabbed exporters). The engine carries them
    /// through serialization and [`ExportRun::options`](crate::ExportRun::options)
    /// but never reads them itself.
    pub has_multiple_files: bool,
    /// Export every tab of a multi-tab report
    pub export_all_tabs: bool,
    /// Directory a save dialog should start in
    pub save_initial_directory: Option<PathBuf>,
    /// Root for staging files (default: the system temp directory)
    pub temp_root: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            page_range: PageRange::All,
            page_numbers: String::new(),
            current_page: 1,
            open_after_export: false,
            allow_open_after: true,
            show_progress: false,
            shift_non_exportable: false,
            zoom: 1.0,
            has_multiple_files: false,
            export_all_tabs: false,
            save_initial_directory: None,
            temp_root: None,
        }
    }
}

impl ExportOptions {
    /// Export the pages named by a page-number expression
    pub fn pages<S: Into<String>>(expression: S) -> Self {
        Self {
            page_range: PageRange::PageNumbers,
            page_numbers: expression.into(),
            ..Default::default()
        }
    }

    /// Export only the given one-based page
    pub fn current(page: usize) -> Self {
        Self {
            page_range: PageRange::Current,
            current_page: page,
            ..Default::default()
        }
    }

    /// Directory staging files are created in
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_root
            .clone()
            .unwrap_or_else(std::env::temp_dir)
            .join(TEMP_EXPORT_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.page_range, PageRange::All);
        assert_eq!(options.current_page, 1);
        assert!(options.allow_open_after);
        assert_eq!(options.zoom, 1.0);
    }

    #[test]
    fn test_host_settings_default_off() {
        let options = ExportOptions::default();
        assert!(!options.has_multiple_files);
        assert!(!options.export_all_tabs);
        assert_eq!(options.save_initial_directory, None);
    }

    #[test]
    fn test_temp_dir() {
        let options = ExportOptions {
            temp_root: Some(PathBuf::from("/var/folio")),
            ..Default::default()
        };
        assert_eq!(options.temp_dir(), PathBuf::from("/var/folio/TempExport"));
    }
}
