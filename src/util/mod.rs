pub mod atomic;
pub mod lines;
