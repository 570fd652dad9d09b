//! Genescope Data - expression sheet loading and per-gene analysis.
//!
//! The loader runs once at process start; everything downstream treats the
//! analyzed [`Dataset`] as read-only shared data.

pub mod analyzer;
pub mod loader;

pub use analyzer::{analyze, Dataset};
pub use loader::{read_rows, ExpressionRow, ParsedSheet};
