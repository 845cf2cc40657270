//! Progress reporting and result viewing seams

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

/// Receives progress notifications while an export runs with
/// [`crate::ExportOptions::show_progress`] set
pub trait ProgressReporter {
    fn start(&mut self) {}

    /// Called before each page with a one-based position
    fn progress(&mut self, message: &str, current: usize, total: usize);

    fn finish(&mut self) {}
}

/// Progress line shown before a page is exported
pub fn progress_message(current: usize, total: usize) -> String {
    format!("Exporting page {current} of {total}")
}

/// Progress reporter writing to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn progress(&mut self, message: &str, _current: usize, _total: usize) {
        log::info!("{message}");
    }
}

/// Opens an exported file for the user
pub trait ViewerLauncher {
    fn launch(&self, path: &Path) -> io::Result<()>;
}

/// Opens files with the platform default application
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemViewer;

impl SystemViewer {
    fn command(path: &Path) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.arg("/c").arg("start").arg("").arg(path);
            cmd
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
    }
}

impl ViewerLauncher for SystemViewer {
    fn launch(&self, path: &Path) -> io::Result<()> {
        let mut cmd = Self::command(path);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        log::debug!("opening viewer: {:?}", cmd);
        spawn_detached(cmd)
    }
}

/// Start `cmd` without blocking the export; a background thread waits on the
/// child so it does not linger as a zombie once it exits.
fn spawn_detached(mut cmd: Command) -> io::Result<()> {
    let mut child = cmd.spawn()?;
    thread::Builder::new()
        .name("folio-viewer".into())
        .spawn(move || {
            if let Err(e) = child.wait() {
                log::debug!("viewer process could not be reaped: {}", e);
            }
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_message() {
        assert_eq!(progress_message(2, 5), "Exporting page 2 of 5");
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_detached() {
        assert!(spawn_detached(Command::new("true")).is_ok());
        let err = spawn_detached(Command::new("folio-no-such-viewer")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
