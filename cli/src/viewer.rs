use std::io;
use std::path::Path;
use std::process::Command;
use std::thread;

use tracing::debug;

#[cfg(target_os = "windows")]
const DEFAULT_VIEWER: &str = "notepad.exe";
#[cfg(target_os = "macos")]
const DEFAULT_VIEWER: &str = "open";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const DEFAULT_VIEWER: &str = "xdg-open";

/// Launches an external program to show `path` and returns once it has
/// started. A detached thread reaps the child when it exits.
/// `viewer` may carry arguments, e.g. `"code --wait"`.
pub fn open_document(path: &Path, viewer: Option<&str>) -> io::Result<()> {
    let command_line = viewer.unwrap_or(DEFAULT_VIEWER);
    let mut parts = command_line.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "viewer command is empty"))?;

    debug!("opening {} with {}", path.display(), command_line);
    let mut child = Command::new(program).args(parts).arg(path).spawn()?;
    thread::spawn(move || match child.wait() {
        Ok(status) => debug!("viewer exited with {}", status),
        Err(e) => debug!("failed to wait for viewer: {}", e),
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_viewer_is_rejected() {
        let err = open_document(Path::new("Jane.txt"), Some("   ")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_missing_viewer_reports_error() {
        let result = open_document(Path::new("Jane.txt"), Some("definitely-not-a-real-viewer-binary"));
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_viewer_runs_detached() {
        use std::time::{Duration, Instant};

        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("marker");
        open_document(&marker, Some("touch")).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while !marker.exists() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(20));
        }
        assert!(marker.exists());
    }
}
