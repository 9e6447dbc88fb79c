//! File-based input collaborators.

pub mod input;

pub use input::{parse_entries, read_entries};
