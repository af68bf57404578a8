//! Error types for the learning engine
//!
//! Only validation failures cross the public API boundary; backend and
//! provider faults are absorbed internally and degrade to in-memory
//! behavior.

use thiserror::Error;

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the engine's public API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Attempt score outside the accepted range. Rejected, never clamped.
    #[error("invalid_score: {score} is outside the 0-100 range")]
    InvalidScore { score: u32 },

    /// A required event field was empty or missing
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
