//! Sampled inputs materialized as temporary files.
//!
//! A sample is the order-preserving prefix of a word list (the loader's
//! `limit`); this module writes it back out so the external searcher and
//! builder see exactly the words the oracle sees. The returned
//! [`tempfile::TempPath`] deletes the file when dropped.

use std::io::{BufWriter, Write};

use tempfile::TempPath;

use crate::error::{SimcheckError, SimcheckResult};

/// Write `words` one per line to a fresh temporary file.
///
/// `prefix` names the file (e.g. `db_sample_`), which helps when inspecting
/// a temp directory after a crash.
///
/// # Errors
///
/// Returns [`SimcheckError::Io`] if the file cannot be created or written.
pub fn materialize<S: AsRef<str>>(words: &[S], prefix: &str) -> SimcheckResult<TempPath> {
    let tmp = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".txt")
        .tempfile()
        .map_err(|e| SimcheckError::io(std::env::temp_dir(), e))?;
    let path = tmp.path().to_path_buf();

    let mut out = BufWriter::new(tmp.as_file());
    for word in words {
        writeln!(out, "{}", word.as_ref()).map_err(|e| SimcheckError::io(&path, e))?;
    }
    out.flush().map_err(|e| SimcheckError::io(&path, e))?;
    drop(out);

    Ok(tmp.into_temp_path())
}
