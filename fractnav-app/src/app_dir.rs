//! Where preferences live and where frames are written.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::error::AppError;

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// `Pictures/FractNav` for the current user, or `images/` next to the executable.
pub fn default_output_root() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.picture_dir().map(|p| p.join("FractNav")))
        .unwrap_or_else(|| exe_directory().join("images"))
}

/// A fresh per-session subdirectory named after the current Unix time.
pub fn session_directory(root: &Path) -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    root.join(secs.to_string())
}

/// Create `path` and its parents. Failure is fatal for a session.
pub fn ensure_dir(path: &Path) -> Result<(), AppError> {
    fs::create_dir_all(path).map_err(|source| AppError::OutputDir {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Output directory {}", path.display());
    Ok(())
}

/// Where the terminal display writes its navigation preview.
///
/// An explicit path wins. Otherwise `preview.png` in the session directory,
/// or in the temp directory when nothing is written to disk.
pub fn preview_path(configured: &str, output_dir: &Path, write_to_disk: bool) -> PathBuf {
    if !configured.is_empty() {
        PathBuf::from(configured)
    } else if write_to_disk {
        output_dir.join("preview.png")
    } else {
        std::env::temp_dir().join("fractnav-preview.png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_directory_is_numeric_child() {
        let root = Path::new("/tmp/frames");
        let dir = session_directory(root);
        assert_eq!(dir.parent(), Some(root));
        let name = dir.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.parse::<u64>().unwrap() > 0);
    }

    #[test]
    fn preview_defaults_into_session_directory() {
        let out = Path::new("/tmp/frames/123");
        assert_eq!(preview_path("", out, true), out.join("preview.png"));
        assert_eq!(preview_path("watch.png", out, true), PathBuf::from("watch.png"));
        assert_eq!(
            preview_path("", out, false),
            std::env::temp_dir().join("fractnav-preview.png")
        );
    }

    #[test]
    fn ensure_dir_creates_nested() {
        let base = std::env::temp_dir().join(format!("fractnav_dir_{}", std::process::id()));
        let nested = base.join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
        let _ = fs::remove_dir_all(&base);
    }

    #[test]
    fn ensure_dir_fails_under_a_file() {
        let base = std::env::temp_dir().join(format!("fractnav_dir_file_{}", std::process::id()));
        fs::write(&base, b"x").unwrap();
        let err = ensure_dir(&base.join("sub")).unwrap_err();
        assert!(matches!(err, AppError::OutputDir { .. }));
        let _ = fs::remove_file(&base);
    }
}
