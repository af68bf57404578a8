//! Peer matching by topic overlap
//!
//! Similarity is a deterministic heuristic over the topics two learners
//! have attempted, not an embedding distance: the size of the topic
//! intersection divided by the size of the larger topic set. Peers below
//! the threshold are dropped entirely.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pattern::PatternStore;

/// A matched peer with the overlap that produced the match
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarUser {
    pub peer_id: String,
    /// Overlap ratio in (threshold, 1.0]
    pub similarity: f64,
    /// Shared topics, in the querying user's topic order
    pub common_topics: Vec<String>,
}

/// Finds learners with overlapping topic histories
pub struct PeerMatcher {
    store: Arc<PatternStore>,
    threshold: f64,
}

impl PeerMatcher {
    /// Create a matcher over the given store
    pub fn new(store: Arc<PatternStore>, threshold: f64) -> Self {
        Self { store, threshold }
    }

    /// Return up to `top_k` peers ordered by similarity descending.
    ///
    /// Ties keep the peers' first-seen order in the store. A user with
    /// no attempted topics matches nobody.
    pub async fn similar_users(&self, user_id: &str, top_k: usize) -> Vec<SimilarUser> {
        let user_pattern = self.store.get(user_id).await;
        let user_topics: Vec<String> = user_pattern.topics.keys().cloned().collect();
        if user_topics.is_empty() {
            return Vec::new();
        }
        let user_set: HashSet<&str> = user_topics.iter().map(String::as_str).collect();

        let mut matches = Vec::new();
        for (peer_id, peer_pattern) in self.store.all_patterns().await {
            if peer_id == user_id {
                continue;
            }

            let peer_set: HashSet<&str> = peer_pattern.topics.keys().map(String::as_str).collect();
            let common_topics: Vec<String> = user_topics
                .iter()
                .filter(|topic| peer_set.contains(topic.as_str()))
                .cloned()
                .collect();

            let denominator = user_set.len().max(peer_set.len()).max(1);
            let similarity = common_topics.len() as f64 / denominator as f64;

            if similarity > self.threshold {
                matches.push(SimilarUser {
                    peer_id,
                    similarity,
                    common_topics,
                });
            }
        }

        // Stable sort keeps store order among equal similarities.
        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(top_k);

        debug!(
            "Found {} peer(s) for {} above threshold {}",
            matches.len(),
            user_id,
            self.threshold
        );
        matches
    }
}
