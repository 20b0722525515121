//! Positional comparison of expected and actual bit vectors.

use serde::Serialize;

/// A position where expected and actual disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub position: usize,
    pub expected: bool,
    pub actual: bool,
}

/// Outcome of aligning two bit vectors position by position.
///
/// Only the common prefix is compared bit-wise; a length difference is kept
/// separately and never truncated away or padded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub expected_len: usize,
    pub actual_len: usize,
    /// Disagreements within the common prefix, in ascending position.
    pub mismatches: Vec<Mismatch>,
}

impl Comparison {
    /// Compare `expected` against `actual`.
    pub fn new(expected: &[bool], actual: &[bool]) -> Self {
        let mismatches = expected
            .iter()
            .zip(actual)
            .enumerate()
            .filter(|(_, (e, a))| e != a)
            .map(|(position, (e, a))| Mismatch {
                position,
                expected: *e,
                actual: *a,
            })
            .collect();

        Self {
            expected_len: expected.len(),
            actual_len: actual.len(),
            mismatches,
        }
    }

    pub fn length_mismatch(&self) -> bool {
        self.expected_len != self.actual_len
    }

    /// Both conditions gate the verdict independently.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty() && !self.length_mismatch()
    }

    /// Number of positions compared bit-wise.
    pub fn compared(&self) -> usize {
        self.expected_len.min(self.actual_len)
    }

    /// Extra positions on the longer side.
    pub fn tail_diff(&self) -> usize {
        self.expected_len.abs_diff(self.actual_len)
    }

    /// Hamming distance with the length excess counted as differences.
    pub fn hamming(&self) -> usize {
        self.mismatches.len() + self.tail_diff()
    }

    /// `100 * (1 - hamming / max_len)`; 100 when both sides are empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy(&self) -> f64 {
        let max_len = self.expected_len.max(self.actual_len);
        if max_len == 0 {
            return 100.0;
        }
        100.0 * (1.0 - self.hamming() as f64 / max_len as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::extract_lenient;

    fn cmp(expected: &str, actual: &str) -> Comparison {
        Comparison::new(&extract_lenient(expected), &extract_lenient(actual))
    }

    #[test]
    fn test_identical_passes() {
        let c = cmp("1010", "1010");
        assert!(c.passed());
        assert_eq!(c.hamming(), 0);
        assert!((c.accuracy() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_mismatch() {
        let c = cmp("1010", "1110");
        assert!(!c.passed());
        assert_eq!(
            c.mismatches,
            vec![Mismatch {
                position: 1,
                expected: false,
                actual: true
            }]
        );
        assert!((c.accuracy() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_length_mismatch_alone_fails() {
        let c = cmp("1010", "101");
        assert!(c.mismatches.is_empty());
        assert!(c.length_mismatch());
        assert!(!c.passed());
        assert_eq!(c.compared(), 3);
        assert_eq!(c.hamming(), 1);
    }

    #[test]
    fn test_tail_and_positional_add_up() {
        let c = cmp("00", "1111");
        assert_eq!(c.mismatches.len(), 2);
        assert_eq!(c.tail_diff(), 2);
        assert_eq!(c.hamming(), 4);
        assert!(c.accuracy().abs() < 1e-9);
    }

    #[test]
    fn test_mismatches_ascending() {
        let c = cmp("000000", "101011");
        let positions: Vec<usize> = c.mismatches.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![0, 2, 4, 5]);
    }
}
