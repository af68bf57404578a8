//! Recommendation engine façade
//!
//! The single entry point callers use: ingests attempt events into the
//! pattern store and composes recommendation queries from the classifier,
//! trend detector, and path builder. Queries never mutate state, and a
//! user without history gets a fixed cold-start result rather than an
//! error.

pub mod feedback;
pub mod path;

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::{classifier, trend};
use crate::analytics::{self, CohortOverview, LearnerProgress};
use crate::backend::PersistenceBackend;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::pattern::{AttemptEvent, PatternStore, PatternSummary};
use crate::similarity::{PeerMatcher, SimilarUser};
use crate::types::{Difficulty, TrendLabel};

pub use feedback::feedback_for;
pub use path::PathStep;

/// Default number of peers returned by similarity queries
pub const DEFAULT_TOP_K: usize = 5;

/// Personalized recommendation derived from a learner's pattern
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    /// Up to three topics to work on next
    pub recommended_topics: Vec<String>,
    pub recommended_difficulty: Difficulty,
    /// All weak areas, in first-classified order
    pub focus_areas: Vec<String>,
    pub preferred_topics: Vec<String>,
    /// Average score per topic with at least one attempt
    pub topic_performance: IndexMap<String, f64>,
    pub learning_path: Vec<PathStep>,
    /// Free-text guidance for the learner
    pub next_steps: String,
    pub trend: TrendLabel,
    /// Mean of the most recent attempts
    pub overall_score: f64,
}

/// Top-level façade over the store and the derivation components
pub struct RecommendationEngine {
    store: Arc<PatternStore>,
    matcher: PeerMatcher,
    config: EngineConfig,
}

impl RecommendationEngine {
    /// Create an engine with the backend the configuration selects
    pub fn new(config: EngineConfig) -> Self {
        let backend = config.backend.connect();
        Self::with_backend(config, backend)
    }

    /// Create an engine over an explicit backend (used by tests and by
    /// embedders that construct the backend themselves)
    pub fn with_backend(config: EngineConfig, backend: Arc<dyn PersistenceBackend>) -> Self {
        let store = Arc::new(PatternStore::new(backend, config.backend.timeout()));
        let matcher = PeerMatcher::new(store.clone(), config.similarity_threshold);
        Self {
            store,
            matcher,
            config,
        }
    }

    /// The underlying pattern store
    pub fn store(&self) -> Arc<PatternStore> {
        self.store.clone()
    }

    /// Ingest one quiz-attempt event
    pub async fn record_attempt(&self, event: AttemptEvent) -> EngineResult<()> {
        self.store.record(event).await
    }

    /// Compose the recommendation for a learner
    pub async fn get_recommendations(&self, user_id: &str) -> RecommendationResult {
        let pattern = self.store.get(user_id).await;
        if pattern.is_empty() {
            info!("No history for {}, returning cold-start recommendation", user_id);
            return self.cold_start();
        }

        let recent_scores: Vec<f64> = pattern
            .performance_trend
            .iter()
            .rev()
            .take(5)
            .map(|e| e.score as f64)
            .collect();
        // Defensive fallback; with recorded attempts the window is never empty.
        let overall_avg = if recent_scores.is_empty() {
            50.0
        } else {
            recent_scores.iter().sum::<f64>() / recent_scores.len() as f64
        };

        let topic_performance = classifier::topic_averages(&pattern);

        let recommended_topics: Vec<String> = if pattern.weak_areas.is_empty() {
            pattern.topics.keys().take(3).cloned().collect()
        } else {
            pattern.weak_areas.iter().take(3).cloned().collect()
        };

        let learning_path = path::build(
            &topic_performance,
            &pattern.weak_areas,
            &pattern.preferred_topics,
            &self.config.topic_catalog,
        );

        let next_steps = next_steps_text(overall_avg, &pattern.weak_areas);
        let trend = if trend::is_improving(&pattern.performance_trend) {
            TrendLabel::Improving
        } else {
            TrendLabel::Stable
        };

        debug!(
            "Recommendation for {}: difficulty {}, {} path step(s), trend {}",
            user_id,
            recommended_difficulty(overall_avg),
            learning_path.len(),
            trend
        );

        RecommendationResult {
            recommended_topics,
            recommended_difficulty: recommended_difficulty(overall_avg),
            focus_areas: pattern.weak_areas.clone(),
            preferred_topics: pattern.preferred_topics.clone(),
            topic_performance,
            learning_path,
            next_steps,
            trend,
            overall_score: overall_avg,
        }
    }

    /// Peers with overlapping topic histories
    pub async fn get_similar_users(&self, user_id: &str, top_k: usize) -> Vec<SimilarUser> {
        self.matcher.similar_users(user_id, top_k).await
    }

    /// Compact history summary for a learner
    pub async fn get_pattern_summary(&self, user_id: &str) -> PatternSummary {
        self.store.summary(user_id).await
    }

    /// Per-learner progress across the whole store (educator view)
    pub async fn learner_progress(&self) -> Vec<LearnerProgress> {
        analytics::learner_progress(&self.store).await
    }

    /// Cohort-wide totals and topic averages (educator view)
    pub async fn cohort_overview(&self) -> CohortOverview {
        analytics::cohort_overview(&self.store).await
    }

    /// The fixed result for a learner with no recorded attempts.
    ///
    /// A deliberate separate branch, not the general algorithm run on an
    /// empty pattern.
    fn cold_start(&self) -> RecommendationResult {
        RecommendationResult {
            recommended_topics: self.config.starter_topics.clone(),
            recommended_difficulty: Difficulty::Medium,
            focus_areas: Vec::new(),
            preferred_topics: Vec::new(),
            topic_performance: IndexMap::new(),
            learning_path: Vec::new(),
            next_steps: "Start with a diagnostic test to assess your current level.".to_string(),
            trend: TrendLabel::Stable,
            overall_score: 0.0,
        }
    }
}

/// Difficulty as a step function of the recent average
fn recommended_difficulty(overall_avg: f64) -> Difficulty {
    if overall_avg >= 85.0 {
        Difficulty::Hard
    } else if overall_avg >= 70.0 {
        Difficulty::Medium
    } else {
        Difficulty::Easy
    }
}

/// Guidance text selected by the recent average
fn next_steps_text(overall_avg: f64, weak_areas: &[String]) -> String {
    if overall_avg >= 90.0 {
        "Excellent progress! Consider exploring advanced topics or helping other students."
            .to_string()
    } else if overall_avg >= 75.0 {
        if weak_areas.is_empty() {
            "Great job! Try increasing the difficulty level for more challenge.".to_string()
        } else {
            format!(
                "Good work! Focus on improving in {} to reach the next level.",
                join_first_two(weak_areas)
            )
        }
    } else if overall_avg >= 60.0 {
        format!(
            "You're making progress. Concentrate on {} and practice regularly.",
            join_first_two(weak_areas)
        )
    } else {
        "Keep practicing! Start with easier questions and gradually increase difficulty."
            .to_string()
    }
}

fn join_first_two(topics: &[String]) -> String {
    topics
        .iter()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}
