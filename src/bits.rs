//! Bit vectors and the parsers that produce them from 0/1 text.
//!
//! Two flavours of parsing:
//! - [`parse_strict`] for search output inside the validator: only `0`, `1`,
//!   whitespace and line breaks are allowed, anything else is an error.
//! - [`extract_lenient`] for the standalone comparator: every character other
//!   than `0`/`1` is dropped.

use std::fmt;
use std::ops::Deref;
use std::path::Path;

use serde::{Serialize, Serializer};

use crate::error::{SimcheckError, SimcheckResult};
use crate::util::lines::split_lines;

/// Ordered 0/1 values, one per query position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitVector(Vec<bool>);

impl BitVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.0.iter().filter(|b| **b).count()
    }
}

impl Deref for BitVector {
    type Target = [bool];

    fn deref(&self) -> &[bool] {
        &self.0
    }
}

impl FromIterator<bool> for BitVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<bool>> for BitVector {
    fn from(bits: Vec<bool>) -> Self {
        Self(bits)
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl Serialize for BitVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse search output into bits, in scan order.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Lines are trimmed and blank
/// lines skipped. Inside a line only `0` and `1` are accepted; the first
/// other character fails the whole parse with its 1-based line and column.
///
/// # Errors
///
/// Returns [`SimcheckError::Parse`] on any character other than `0`/`1`.
pub fn parse_strict(text: &str) -> SimcheckResult<BitVector> {
    let mut bits = BitVector::new();

    for (line_idx, line) in split_lines(text).enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lead = line.len() - line.trim_start().len();
        for (col_idx, ch) in line[lead..lead + trimmed.len()].chars().enumerate() {
            match ch {
                '0' => bits.push(false),
                '1' => bits.push(true),
                found => {
                    return Err(SimcheckError::Parse {
                        line: line_idx + 1,
                        column: line[..lead].chars().count() + col_idx + 1,
                        found,
                    });
                }
            }
        }
    }

    Ok(bits)
}

/// Keep only the `0`/`1` characters of `text`.
pub fn extract_lenient(text: &str) -> BitVector {
    text.chars()
        .filter_map(|ch| match ch {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        })
        .collect()
}

/// Read a file and keep only its `0`/`1` characters.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or
/// [`SimcheckError::NoBits`] if it holds no `0`/`1` data at all.
pub fn load_lenient(path: &Path) -> SimcheckResult<BitVector> {
    let text = std::fs::read_to_string(path).map_err(|e| SimcheckError::io(path, e))?;
    let bits = extract_lenient(&text);
    if bits.is_empty() {
        return Err(SimcheckError::NoBits {
            path: path.to_path_buf(),
        });
    }
    Ok(bits)
}
