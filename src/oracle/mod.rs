//! Brute-force reference oracle.
//!
//! - `levenshtein` — band-limited, early-terminating edit distance
//! - `membership` — per-query "any database word within k edits" bits

pub mod levenshtein;
pub mod membership;

pub use levenshtein::{bounded_distance, distance, within};
pub use membership::expected_bits;
