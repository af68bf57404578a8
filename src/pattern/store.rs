//! Pattern store - source of truth for per-user learning patterns
//!
//! Owns the user -> pattern map, applies ingestion updates, and hands out
//! snapshots to the recommendation, similarity, and analytics layers.
//! Each user's pattern sits behind its own lock; ingestion for different
//! users never contends, and no I/O happens while a pattern lock is held.

use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{AttemptEvent, LearningPattern, PatternSummary};
use crate::analysis::classifier;
use crate::backend::{encode, PersistenceBackend};
use crate::error::EngineResult;

type UserMap = IndexMap<String, Arc<RwLock<LearningPattern>>>;

/// Owner of all per-user learning patterns
pub struct PatternStore {
    /// user id -> pattern, in first-seen order
    users: RwLock<UserMap>,
    backend: Arc<dyn PersistenceBackend>,
    backend_timeout: Duration,
}

impl PatternStore {
    /// Create a store mirroring raw events into the given backend
    pub fn new(backend: Arc<dyn PersistenceBackend>, backend_timeout: Duration) -> Self {
        Self {
            users: RwLock::new(IndexMap::new()),
            backend,
            backend_timeout,
        }
    }

    /// Record a validated attempt event
    ///
    /// Appends to the topic, difficulty, and trend histories and
    /// recomputes the derived classifications before the user's lock is
    /// released, so readers never see a half-applied update. The backend
    /// forward afterwards is best-effort.
    pub async fn record(&self, event: AttemptEvent) -> EngineResult<()> {
        event.validate()?;

        let entry = self.entry_for(&event.user_id).await;
        {
            let mut pattern = entry.write().await;
            pattern.apply(&event);
            classifier::reclassify(&mut pattern);
        }
        debug!(
            "Recorded attempt for {}: {} scored {} ({})",
            event.user_id, event.topic, event.score, event.difficulty
        );

        self.forward(&event).await;
        Ok(())
    }

    /// Snapshot of one user's pattern; an empty default when the user has
    /// no recorded attempts
    pub async fn get(&self, user_id: &str) -> LearningPattern {
        let entry = {
            let users = self.users.read().await;
            users.get(user_id).cloned()
        };
        match entry {
            Some(entry) => entry.read().await.clone(),
            None => LearningPattern::default(),
        }
    }

    /// Compact summary of one user's history
    pub async fn summary(&self, user_id: &str) -> PatternSummary {
        let pattern = self.get(user_id).await;
        PatternSummary {
            attempts: pattern.total_attempts,
            topics_covered: pattern.topics.len(),
            average_score: pattern.overall_average().unwrap_or(0.0),
            diagnostic_completed: pattern.diagnostic_completed,
        }
    }

    /// Snapshot of every stored pattern, in user first-seen order
    pub async fn all_patterns(&self) -> Vec<(String, LearningPattern)> {
        let entries: Vec<(String, Arc<RwLock<LearningPattern>>)> = {
            let users = self.users.read().await;
            users
                .iter()
                .map(|(id, entry)| (id.clone(), entry.clone()))
                .collect()
        };

        let mut patterns = Vec::with_capacity(entries.len());
        for (id, entry) in entries {
            patterns.push((id, entry.read().await.clone()));
        }
        patterns
    }

    /// Number of users with at least one recorded attempt
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Fetch or lazily create the lock entry for a user
    async fn entry_for(&self, user_id: &str) -> Arc<RwLock<LearningPattern>> {
        {
            let users = self.users.read().await;
            if let Some(entry) = users.get(user_id) {
                return entry.clone();
            }
        }

        let mut users = self.users.write().await;
        users
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(LearningPattern::default())))
            .clone()
    }

    /// Best-effort mirror of the raw event into the persistence backend.
    ///
    /// Failure or timeout is logged and swallowed; ingestion has already
    /// succeeded by the time this runs.
    async fn forward(&self, event: &AttemptEvent) {
        let id = format!("{}_{}", event.user_id, Uuid::new_v4());
        let vector = encode::attempt_vector(event);
        let metadata = match serde_json::to_value(event) {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not serialize attempt metadata: {}", e);
                return;
            }
        };

        match tokio::time::timeout(
            self.backend_timeout,
            self.backend.upsert(&id, vector, metadata),
        )
        .await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(
                "Persistence backend '{}' rejected attempt {}: {:#}",
                self.backend.name(),
                id,
                e
            ),
            Err(_) => warn!(
                "Persistence backend '{}' timed out after {:?}; continuing in-memory",
                self.backend.name(),
                self.backend_timeout
            ),
        }
    }
}
