//! Newline-delimited word list loading.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{SimcheckError, SimcheckResult};
use crate::util::lines::split_lines;

/// Read words from `path`, one per line, in file order.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Surrounding whitespace is
/// trimmed and blank lines are skipped. With `limit = Some(n)` reading stops
/// after `n` words; `Some(0)` yields an empty list.
///
/// # Errors
///
/// Returns [`SimcheckError::Io`] if the file cannot be opened or read.
pub fn read_words(path: &Path, limit: Option<usize>) -> SimcheckResult<Vec<String>> {
    let file = File::open(path).map_err(|e| SimcheckError::io(path, e))?;
    read_words_from(BufReader::new(file), limit)
        .map_err(|e| SimcheckError::io(path, e))
}

/// Same as [`read_words`] over any buffered reader.
pub fn read_words_from<R: BufRead>(
    reader: R,
    limit: Option<usize>,
) -> std::io::Result<Vec<String>> {
    let mut words = Vec::new();
    if limit == Some(0) {
        return Ok(words);
    }

    // `BufRead::lines` only breaks on `\n`; any `\r` left inside is a break too.
    'read: for chunk in reader.lines() {
        let chunk = chunk?;
        for line in split_lines(&chunk) {
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            words.push(word.to_owned());
            if limit.is_some_and(|n| words.len() >= n) {
                break 'read;
            }
        }
    }

    Ok(words)
}
