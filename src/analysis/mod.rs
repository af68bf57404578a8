//! Derivation of classifications and trends from learning patterns
//!
//! Pure functions only; all state lives in the pattern store.

pub mod classifier;
pub mod trend;

pub use classifier::{classify, reclassify, topic_averages};
pub use trend::is_improving;
