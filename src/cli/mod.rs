#![forbid(unsafe_code)]

//! File input and output used by the `graphsim` binary.
//!
//! Loaders turn edge lists, pattern files and label files into the in-memory
//! inputs of a run; writers dump results as CSV.

/// Writers for run results.
pub mod export;
/// Loaders for edge lists, patterns and label files.
pub mod import;

pub use export::{write_matches, write_values};
pub use import::{load_edge_list, load_labels, load_pattern};
