//! `oa-simcheck` — correctness harness for fuzzy word-search indexes.
//!
//! A system under test answers, for each query word, whether some database
//! word lies within edit distance `k`. The harness runs that system's index
//! builder and searcher as external processes, recomputes the answer with a
//! brute-force oracle, and compares the two bit vectors position by position.
//!
//! # Modules
//!
//! - `words` — word list loading and sampled temp-file inputs
//! - `oracle` — band-limited Levenshtein and membership bits
//! - `process` — process-execution capability and the builder/searcher runner
//! - `bits` — bit vectors, strict and lenient 0/1 parsing
//! - `compare` — positional comparison and Hamming accuracy
//! - `validate` — the end-to-end protocol
//! - `report` — text and JSON output
//!
//! # Architecture
//!
//! ```text
//! db/query files → words ──────────────→ oracle ─→ expected ─┐
//!        └────────→ process (prep, search) → bits ─→ actual ─┴→ compare → report
//! ```

pub mod bits;
pub mod compare;
pub mod error;
pub mod oracle;
pub mod process;
pub mod report;
pub mod util;
pub mod validate;
pub mod words;

pub use bits::BitVector;
pub use error::{SimcheckError, SimcheckResult};
pub use process::{ProcessExecutor, SystemExecutor};
pub use validate::{ValidateConfig, ValidationResult, Validator};
