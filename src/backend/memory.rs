//! In-process persistence backend
//!
//! Keeps upserted vectors in a map and ranks queries by cosine
//! similarity. The default when no vector index is configured, and the
//! path the engine degrades to when the real backend is unreachable.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::encode::cosine_similarity;
use super::{PersistenceBackend, VectorMatch};

struct StoredVector {
    values: Vec<f32>,
    metadata: Value,
}

/// Map-backed vector store, as durable as the process
#[derive(Default)]
pub struct MemoryBackend {
    vectors: RwLock<HashMap<String, StoredVector>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored vectors
    pub async fn len(&self) -> usize {
        self.vectors.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.vectors.read().await.is_empty()
    }
}

#[async_trait]
impl PersistenceBackend for MemoryBackend {
    async fn upsert(&self, id: &str, vector: Vec<f32>, metadata: Value) -> Result<()> {
        let mut vectors = self.vectors.write().await;
        vectors.insert(
            id.to_string(),
            StoredVector {
                values: vector,
                metadata,
            },
        );
        Ok(())
    }

    async fn query_similar(&self, vector: Vec<f32>, top_k: usize) -> Result<Vec<VectorMatch>> {
        let vectors = self.vectors.read().await;

        let mut matches: Vec<VectorMatch> = vectors
            .iter()
            .map(|(id, stored)| VectorMatch {
                id: id.clone(),
                score: cosine_similarity(&vector, &stored.values),
                metadata: stored.metadata.clone(),
            })
            .collect();

        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        matches.truncate(top_k);
        Ok(matches)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
