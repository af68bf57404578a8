//! Learning-pattern data model
//!
//! Defines the quiz-attempt event that enters the engine and the per-user
//! aggregate derived from it. Patterns are owned exclusively by the
//! [`store::PatternStore`]; everything else reads snapshots.

pub mod store;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::error::{EngineError, EngineResult};
use crate::types::Difficulty;

pub use store::PatternStore;

/// Maximum number of entries kept in the performance-trend window
pub const TREND_WINDOW: usize = 20;

/// A single quiz-attempt event entering the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptEvent {
    /// Opaque learner identifier
    pub user_id: String,
    /// Subject the quiz covered
    pub topic: String,
    pub difficulty: Difficulty,
    /// Score in percent, 0-100 inclusive
    pub score: u32,
    /// When the attempt completed. Informative only; the trend window
    /// follows ingestion order, not timestamp order.
    pub timestamp: DateTime<Utc>,
    /// Whether the attempt came from a diagnostic assessment
    pub is_diagnostic: bool,
}

impl AttemptEvent {
    /// Check the event against the ingestion contract.
    ///
    /// Out-of-range scores and empty identifiers are rejected outright;
    /// nothing is clamped or defaulted.
    pub fn validate(&self) -> EngineResult<()> {
        if self.user_id.trim().is_empty() {
            return Err(EngineError::MissingField("user_id"));
        }
        if self.topic.trim().is_empty() {
            return Err(EngineError::MissingField("topic"));
        }
        if self.score > 100 {
            return Err(EngineError::InvalidScore { score: self.score });
        }
        Ok(())
    }
}

/// Score history for one topic or one difficulty level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreHistory {
    /// All recorded scores in ingestion order. The full history is
    /// retained; averages are recomputed from it on every update.
    pub scores: Vec<u32>,
    /// Number of attempts recorded
    pub attempts: u32,
}

impl ScoreHistory {
    /// Append a score to the history
    pub fn push(&mut self, score: u32) {
        self.scores.push(score);
        self.attempts += 1;
    }

    /// Mean over the full history, `None` when no scores are recorded
    pub fn average(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        Some(self.scores.iter().map(|&s| s as f64).sum::<f64>() / self.scores.len() as f64)
    }
}

/// One entry of the bounded performance-trend window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendEntry {
    pub score: u32,
    pub timestamp: DateTime<Utc>,
    pub topic: String,
}

/// Per-user aggregate of score histories and derived classifications
///
/// Created lazily on the first attempt for a user, mutated only by
/// ingestion, never deleted while the process runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearningPattern {
    /// Topic -> score history, in first-attempt order
    pub topics: IndexMap<String, ScoreHistory>,
    /// Difficulty level -> score history
    pub difficulties: IndexMap<Difficulty, ScoreHistory>,
    /// Sliding window of the most recent attempts (FIFO, capped at
    /// [`TREND_WINDOW`])
    pub performance_trend: VecDeque<TrendEntry>,
    /// Topics with a mean score of at least 75, recomputed after every
    /// ingestion; ordered by topic insertion order
    pub preferred_topics: Vec<String>,
    /// Topics with a mean score below 60, recomputed after every
    /// ingestion; ordered by topic insertion order
    pub weak_areas: Vec<String>,
    /// Total events ingested for this user
    pub total_attempts: u64,
    /// Set once any diagnostic attempt is recorded
    pub diagnostic_completed: bool,
}

impl LearningPattern {
    /// Whether any attempt has been recorded
    pub fn is_empty(&self) -> bool {
        self.total_attempts == 0
    }

    /// Append an already-validated event to the raw histories.
    ///
    /// Derived classifications are recomputed separately; callers must
    /// not expose the pattern between the two steps.
    pub(crate) fn apply(&mut self, event: &AttemptEvent) {
        self.topics
            .entry(event.topic.clone())
            .or_default()
            .push(event.score);
        self.difficulties
            .entry(event.difficulty)
            .or_default()
            .push(event.score);

        self.performance_trend.push_back(TrendEntry {
            score: event.score,
            timestamp: event.timestamp,
            topic: event.topic.clone(),
        });
        while self.performance_trend.len() > TREND_WINDOW {
            self.performance_trend.pop_front();
        }

        self.total_attempts += 1;
        if event.is_diagnostic {
            self.diagnostic_completed = true;
        }
    }

    /// Mean over every recorded score across all topics
    pub fn overall_average(&self) -> Option<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for history in self.topics.values() {
            sum += history.scores.iter().map(|&s| s as f64).sum::<f64>();
            count += history.scores.len();
        }
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}

/// Compact per-user summary exposed by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSummary {
    /// Total attempts recorded
    pub attempts: u64,
    /// Distinct topics with at least one attempt
    pub topics_covered: usize,
    /// Mean over the full score history, 0.0 when empty
    pub average_score: f64,
    /// Whether a diagnostic attempt has been recorded
    pub diagnostic_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(topic: &str, score: u32) -> AttemptEvent {
        AttemptEvent {
            user_id: "u1".to_string(),
            topic: topic.to_string(),
            difficulty: Difficulty::Medium,
            score,
            timestamp: Utc::now(),
            is_diagnostic: false,
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_score() {
        let mut e = event("Mathematics", 101);
        assert_eq!(
            e.validate(),
            Err(EngineError::InvalidScore { score: 101 })
        );
        e.score = 100;
        assert!(e.validate().is_ok());
        e.score = 0;
        assert!(e.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let mut e = event("Mathematics", 80);
        e.user_id = "  ".to_string();
        assert_eq!(e.validate(), Err(EngineError::MissingField("user_id")));

        let e = event("", 80);
        assert_eq!(e.validate(), Err(EngineError::MissingField("topic")));
    }

    #[test]
    fn test_trend_window_is_capped() {
        let mut pattern = LearningPattern::default();
        for i in 0..25 {
            pattern.apply(&event("Mathematics", i * 4));
        }
        assert_eq!(pattern.performance_trend.len(), TREND_WINDOW);
        // The oldest five entries were evicted; the window holds 5*4..=24*4.
        assert_eq!(pattern.performance_trend.front().unwrap().score, 20);
        assert_eq!(pattern.performance_trend.back().unwrap().score, 96);
        // Raw topic history is unbounded.
        assert_eq!(pattern.topics["Mathematics"].scores.len(), 25);
    }

    #[test]
    fn test_score_history_average() {
        let mut history = ScoreHistory::default();
        assert_eq!(history.average(), None);
        history.push(40);
        history.push(60);
        assert_eq!(history.average(), Some(50.0));
    }

    #[test]
    fn test_diagnostic_flag_sticks() {
        let mut pattern = LearningPattern::default();
        let mut e = event("Physics", 70);
        e.is_diagnostic = true;
        pattern.apply(&e);
        assert!(pattern.diagnostic_completed);

        pattern.apply(&event("Physics", 70));
        assert!(pattern.diagnostic_completed);
    }
}
