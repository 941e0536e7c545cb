//! Atomic file replacement.
//!
//! Content goes to a temporary file in the target's directory, is synced to
//! disk, then renamed over the target. A failure mid-write leaves the original
//! untouched.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::CodetoolsError;
use crate::Result;

/// Replace the content of `path` atomically.
///
/// An existing file keeps its permissions.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let write_error = |e: std::io::Error| CodetoolsError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
    temp.write_all(content).map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;

    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_error)?;
    }

    temp.persist(path).map_err(|e| write_error(e.error))?;

    Ok(())
}
