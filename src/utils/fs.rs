//! File system utilities.

use crate::Result;
use std::path::Path;

/// Check that a database file exists and is a regular file.
pub fn ensure_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(crate::Error::DatabaseNotFound(path.display().to_string()));
    }
    Ok(())
}

/// Remove a file if it exists. Returns whether a file was removed.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Directory a database file lives in; the current directory for bare file names.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Check whether new files can be created next to `path` by creating and
/// removing a scratch file there.
pub fn is_parent_writable(path: &Path) -> bool {
    let dir = parent_dir(path);
    if !dir.is_dir() {
        return false;
    }
    tempfile::Builder::new()
        .prefix(".coursedb-")
        .tempfile_in(dir)
        .is_ok()
}
