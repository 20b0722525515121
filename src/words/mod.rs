//! Word list inputs: loading and sampling.

pub mod loader;
pub mod sample;

pub use loader::{read_words, read_words_from};
pub use sample::materialize;
