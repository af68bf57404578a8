//! Cohort-level aggregations
//!
//! Read-only educator views over every stored pattern: per-learner
//! progress and whole-cohort topic statistics.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::analysis::classifier;
use crate::pattern::PatternStore;

/// Progress of a single learner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerProgress {
    pub user_id: String,
    /// Total attempts recorded
    pub attempts: u64,
    /// Mean over the learner's full score history
    pub average_score: f64,
    /// Average score per topic, in first-attempt order
    pub topic_averages: IndexMap<String, f64>,
    /// Timestamp of the most recent attempt in the trend window
    pub last_activity: Option<DateTime<Utc>>,
}

/// Aggregate statistics for one topic across the cohort
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicStats {
    pub average: f64,
    pub attempts: u64,
}

/// Whole-cohort overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortOverview {
    pub total_learners: usize,
    pub total_attempts: u64,
    /// Topic -> cohort-wide stats, in first-seen order
    pub topic_performance: IndexMap<String, TopicStats>,
}

/// Per-learner progress for every user in the store
pub async fn learner_progress(store: &PatternStore) -> Vec<LearnerProgress> {
    store
        .all_patterns()
        .await
        .into_iter()
        .map(|(user_id, pattern)| LearnerProgress {
            user_id,
            attempts: pattern.total_attempts,
            average_score: pattern.overall_average().unwrap_or(0.0),
            topic_averages: classifier::topic_averages(&pattern),
            last_activity: pattern.performance_trend.back().map(|e| e.timestamp),
        })
        .collect()
}

/// Cohort-wide totals and per-topic averages
pub async fn cohort_overview(store: &PatternStore) -> CohortOverview {
    let patterns = store.all_patterns().await;

    let mut sums: IndexMap<String, (f64, u64)> = IndexMap::new();
    let mut total_attempts = 0u64;

    for (_, pattern) in &patterns {
        total_attempts += pattern.total_attempts;
        for (topic, history) in &pattern.topics {
            let entry = sums.entry(topic.clone()).or_default();
            entry.0 += history.scores.iter().map(|&s| s as f64).sum::<f64>();
            entry.1 += history.scores.len() as u64;
        }
    }

    let topic_performance = sums
        .into_iter()
        .map(|(topic, (sum, count))| {
            let average = if count == 0 { 0.0 } else { sum / count as f64 };
            (
                topic,
                TopicStats {
                    average,
                    attempts: count,
                },
            )
        })
        .collect();

    CohortOverview {
        total_learners: patterns.len(),
        total_attempts,
        topic_performance,
    }
}
