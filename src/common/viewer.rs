//! Hands rendered charts to the platform's default image viewer

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Errors that can occur when opening a chart in the system viewer
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Failed to launch image viewer: {0}")]
    Launch(#[from] io::Error),

    #[error("Image viewer exited with {0}")]
    Failed(ExitStatus),
}

/// Opens `path` with the system's default viewer
///
/// Returns once the launcher has handed the file off; most viewers keep running detached.
pub fn open_in_viewer(path: &Path) -> Result<(), ViewerError> {
    let output = viewer_command(path).output()?;

    if !output.status.success() {
        return Err(ViewerError::Failed(output.status));
    }

    Ok(())
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    fn uses_xdg_open() {
        let command = viewer_command(Path::new("plots/run/join_times_plot.png"));
        assert_eq!(command.get_program(), "xdg-open");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, vec!["plots/run/join_times_plot.png"]);
    }

    #[test]
    fn error_messages() {
        let err = ViewerError::from(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        assert!(matches!(err, ViewerError::Launch(_)));
        assert_eq!(err.to_string(), "Failed to launch image viewer: no such file");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    #[cfg(unix)]
    fn failed_exit_is_reported() {
        use std::os::unix::process::ExitStatusExt;

        let err = ViewerError::Failed(ExitStatus::from_raw(1 << 8));
        assert_eq!(err.to_string(), "Image viewer exited with exit status: 1");
    }
}
