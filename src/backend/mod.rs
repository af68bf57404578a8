//! Pluggable persistence backend
//!
//! The engine mirrors raw attempt data into an optional vector store.
//! There are exactly two implementations of the capability interface —
//! a real HTTP vector index and an in-process map — selected once at
//! construction. Engine logic never branches on which one is active:
//! forwarding is best-effort, and recommendation/similarity results are
//! derived from the [`crate::pattern::PatternStore`] alone.

pub mod encode;
pub mod http;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use http::HttpVectorBackend;
pub use memory::MemoryBackend;

/// A scored match returned by a similarity query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorMatch {
    /// Identifier of the stored vector
    pub id: String,
    /// Similarity score, higher is closer
    pub score: f32,
    /// Metadata stored alongside the vector
    pub metadata: Value,
}

/// Write-through vector storage for attempt and profile data
///
/// Implementations must be safe to call concurrently. Errors are absorbed
/// by the caller; an implementation that fails only degrades persistence,
/// never ingestion or queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersistenceBackend: Send + Sync {
    /// Insert or overwrite a vector with its metadata
    async fn upsert(&self, id: &str, vector: Vec<f32>, metadata: Value) -> Result<()>;

    /// Return the `top_k` stored vectors closest to `vector`
    async fn query_similar(&self, vector: Vec<f32>, top_k: usize) -> Result<Vec<VectorMatch>>;

    /// Short backend name for log lines
    fn name(&self) -> &'static str;
}
