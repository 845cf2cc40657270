//! Per-run export state

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{ExportError, ExportResult};
use crate::options::ExportOptions;

/// State of one export invocation, handed to every exporter hook
///
/// Staging files created through [`ExportRun::create_temp_file`] belong to
/// the run. They are deleted when the run finishes, and also when the run is
/// dropped early (an error return or a panic unwinding through the export).
pub struct ExportRun<'w> {
    writer: &'w mut dyn Write,
    options: ExportOptions,
    pages: Vec<usize>,
    cursor: Option<usize>,
    file_name: Option<PathBuf>,
    generated_files: Vec<PathBuf>,
    temp_files: Vec<NamedTempFile>,
}

impl<'w> ExportRun<'w> {
    pub(crate) fn new(writer: &'w mut dyn Write, options: ExportOptions, pages: Vec<usize>) -> Self {
        Self {
            writer,
            options,
            pages,
            cursor: None,
            file_name: None,
            generated_files: Vec::new(),
            temp_files: Vec::new(),
        }
    }

    pub(crate) fn set_file_name(&mut self, path: &Path) {
        self.file_name = Some(path.to_path_buf());
        self.generated_files.push(path.to_path_buf());
    }

    pub(crate) fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = cursor;
    }

    /// Output target of the run
    pub fn writer(&mut self) -> &mut dyn Write {
        &mut *self.writer
    }

    /// Options the run was started with
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Zero-based indices of the pages being exported, in export order
    pub fn pages(&self) -> &[usize] {
        &self.pages
    }

    /// Zero-based index of the page currently being exported
    pub fn current_page(&self) -> Option<usize> {
        self.cursor.and_then(|i| self.pages.get(i).copied())
    }

    /// Target path, when exporting to a file
    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    /// Output artifacts produced so far
    pub fn generated_files(&self) -> &[PathBuf] {
        &self.generated_files
    }

    /// Record an extra output artifact (e.g. an image written next to the target)
    pub fn add_generated_file<P: Into<PathBuf>>(&mut self, path: P) {
        self.generated_files.push(path.into());
    }

    /// Create a staging file with a random name under `<temp_root>/TempExport`
    pub fn create_temp_file(&mut self) -> ExportResult<&mut NamedTempFile> {
        let dir = self.options.temp_dir();
        fs::create_dir_all(&dir)?;
        let file = tempfile::Builder::new().tempfile_in(&dir)?;
        log::trace!("created staging file {}", file.path().display());
        self.temp_files.push(file);
        let last = self.temp_files.len() - 1;
        Ok(&mut self.temp_files[last])
    }

    /// Number of staging files currently held
    pub fn temp_file_count(&self) -> usize {
        self.temp_files.len()
    }

    /// Delete every staging file, returning how many could not be removed
    pub(crate) fn delete_temp_files(&mut self) -> usize {
        let mut failures = 0;
        for file in self.temp_files.drain(..) {
            let path = file.path().display().to_string();
            if let Err(source) = file.close() {
                failures += 1;
                log::warn!("{}", ExportError::ResourceCleanup { path, source });
            }
        }
        failures
    }

    pub(crate) fn into_generated_files(mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.generated_files)
    }
}

impl Write for ExportRun<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options_in(root: &Path) -> ExportOptions {
        ExportOptions {
            temp_root: Some(root.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_temp_files_are_deleted() {
        let root = tempfile::tempdir().unwrap();
        let mut out: Vec<u8> = Vec::new();
        let mut run = ExportRun::new(&mut out, options_in(root.path()), vec![0]);

        let path = {
            let file = run.create_temp_file().unwrap();
            file.write_all(b"staged").unwrap();
            file.path().to_path_buf()
        };
        assert!(path.starts_with(root.path().join("TempExport")));
        assert!(path.exists());
        assert_eq!(run.temp_file_count(), 1);

        assert_eq!(run.delete_temp_files(), 0);
        assert!(!path.exists());
        assert_eq!(run.temp_file_count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_undeletable_temp_file_is_counted() {
        let root = tempfile::tempdir().unwrap();
        let mut out: Vec<u8> = Vec::new();
        let mut run = ExportRun::new(&mut out, options_in(root.path()), vec![0]);
        let path = run.create_temp_file().unwrap().path().to_path_buf();

        // Removing the file behind the run's back makes the close fail with NotFound.
        fs::remove_file(&path).unwrap();
        assert_eq!(run.delete_temp_files(), 1);
        assert_eq!(run.temp_file_count(), 0);
    }

    #[test]
    fn test_drop_deletes_temp_files() {
        let root = tempfile::tempdir().unwrap();
        let mut out: Vec<u8> = Vec::new();
        let path = {
            let mut run = ExportRun::new(&mut out, options_in(root.path()), vec![0]);
            run.create_temp_file().unwrap().path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_write_goes_to_target() {
        let mut out: Vec<u8> = Vec::new();
        {
            let mut run = ExportRun::new(&mut out, ExportOptions::default(), vec![2, 4]);
            write!(run, "page").unwrap();
            run.set_cursor(Some(1));
            assert_eq!(run.current_page(), Some(4));
        }
        assert_eq!(out, b"page");
    }

    #[test]
    fn test_generated_files() {
        let mut out: Vec<u8> = Vec::new();
        let mut run = ExportRun::new(&mut out, ExportOptions::default(), vec![0]);
        run.set_file_name(Path::new("report.html"));
        run.add_generated_file("report_1.png");
        assert_eq!(run.file_name(), Some(Path::new("report.html")));
        assert_eq!(
            run.into_generated_files(),
            vec![PathBuf::from("report.html"), PathBuf::from("report_1.png")]
        );
    }
}
