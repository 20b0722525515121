//! Atomic file writing via tempfile + rename.
//!
//! Uses [`tempfile::NamedTempFile`] to write to a temporary file in the same
//! directory as the target, then atomically renames it, so a reader never
//! sees a half-written ground-truth file.

use std::io::Write;
use std::path::Path;

use crate::error::{SimcheckError, SimcheckResult};

/// Atomically write `content` to `path`.
///
/// # Errors
///
/// Returns [`SimcheckError::Io`] if the temp file cannot be created in the
/// target directory, writing fails, or the rename fails (e.g., cross-device).
pub fn atomic_write(path: &Path, content: &str) -> SimcheckResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| SimcheckError::io(parent, e))?;

    tmp.write_all(content.as_bytes())
        .map_err(|e| SimcheckError::io(tmp.path(), e))?;

    tmp.flush().map_err(|e| SimcheckError::io(tmp.path(), e))?;

    tmp.persist(path)
        .map_err(|e| SimcheckError::io(path, e.error))?;

    Ok(())
}
