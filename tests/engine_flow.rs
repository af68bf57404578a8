//! End-to-end engine scenarios
//!
//! Drives the public façade the way the surrounding application would:
//! ingest attempts, then read recommendations, peers, summaries, and
//! cohort analytics.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use edututor::backend::{PersistenceBackend, VectorMatch};
use edututor::{
    AttemptEvent, Difficulty, EngineConfig, EngineError, MemoryBackend, Priority,
    RecommendationEngine, TrendLabel,
};

fn engine() -> RecommendationEngine {
    RecommendationEngine::with_backend(EngineConfig::default(), Arc::new(MemoryBackend::new()))
}

fn event(user: &str, topic: &str, score: u32) -> AttemptEvent {
    AttemptEvent {
        user_id: user.to_string(),
        topic: topic.to_string(),
        difficulty: Difficulty::Medium,
        score,
        timestamp: Utc::now(),
        is_diagnostic: false,
    }
}

async fn ingest(engine: &RecommendationEngine, user: &str, topic: &str, scores: &[u32]) {
    for &score in scores {
        engine.record_attempt(event(user, topic, score)).await.unwrap();
    }
}

/// A backend that always fails, standing in for an unreachable index
struct DeadBackend;

#[async_trait]
impl PersistenceBackend for DeadBackend {
    async fn upsert(&self, _id: &str, _vector: Vec<f32>, _metadata: Value) -> Result<()> {
        anyhow::bail!("index unreachable")
    }

    async fn query_similar(&self, _vector: Vec<f32>, _top_k: usize) -> Result<Vec<VectorMatch>> {
        anyhow::bail!("index unreachable")
    }

    fn name(&self) -> &'static str {
        "dead"
    }
}

#[tokio::test]
async fn strong_scores_mark_topic_preferred() {
    // Scenario A: 90, 95, 92 in Mathematics.
    let engine = engine();
    ingest(&engine, "u1", "Mathematics", &[90, 95, 92]).await;

    let result = engine.get_recommendations("u1").await;
    assert_eq!(result.preferred_topics, vec!["Mathematics"]);
    assert!(result.focus_areas.is_empty());
    assert!((result.topic_performance["Mathematics"] - 92.333333).abs() < 0.001);
}

#[tokio::test]
async fn weak_topic_leads_recommendations_and_path() {
    // Scenario B: 40, 55 in Chemistry.
    let engine = engine();
    ingest(&engine, "u1", "Chemistry", &[40, 55]).await;

    let result = engine.get_recommendations("u1").await;
    assert_eq!(result.focus_areas, vec!["Chemistry"]);
    assert!(result.recommended_topics.contains(&"Chemistry".to_string()));

    let step = &result.learning_path[0];
    assert_eq!(step.topic, "Chemistry");
    assert_eq!(step.priority, Priority::High);
    assert_eq!(step.suggested_difficulty, Difficulty::Easy);
}

#[tokio::test]
async fn rising_scores_read_as_improving() {
    // Scenario C: 50, 50, 50, 80, 85, 90 oldest to newest.
    let engine = engine();
    ingest(&engine, "u1", "Mathematics", &[50, 50, 50, 80, 85, 90]).await;

    let result = engine.get_recommendations("u1").await;
    assert_eq!(result.trend, TrendLabel::Improving);

    // Flat history stays stable.
    ingest(&engine, "u2", "Mathematics", &[70, 70, 70, 70, 70, 70]).await;
    let result = engine.get_recommendations("u2").await;
    assert_eq!(result.trend, TrendLabel::Stable);
}

#[tokio::test]
async fn peer_matching_respects_the_overlap_threshold() {
    // Scenario D: 1 of 4 shared topics (0.25) is out, 2 of 4 (0.5) is in.
    let engine = engine();
    for topic in ["Mathematics", "Physics", "Chemistry", "Biology"] {
        ingest(&engine, "u1", topic, &[70]).await;
    }
    for topic in ["Mathematics", "History", "Art", "Music"] {
        ingest(&engine, "barely", topic, &[70]).await;
    }
    for topic in ["Mathematics", "Physics", "Art", "Music"] {
        ingest(&engine, "overlapping", topic, &[70]).await;
    }

    let peers = engine.get_similar_users("u1", 5).await;
    assert_eq!(peers.len(), 1);
    assert_eq!(peers[0].peer_id, "overlapping");
    assert!((peers[0].similarity - 0.5).abs() < f64::EPSILON);
    assert_eq!(peers[0].common_topics, vec!["Mathematics", "Physics"]);
}

#[tokio::test]
async fn cold_start_is_the_fixed_starter_result() {
    let engine = engine();
    let result = engine.get_recommendations("nobody").await;

    assert_eq!(
        result.recommended_topics,
        vec!["Mathematics", "Physics", "Chemistry"]
    );
    assert_eq!(result.recommended_difficulty, Difficulty::Medium);
    assert!(result.focus_areas.is_empty());
    assert!(result.learning_path.is_empty());
    assert!(result.next_steps.contains("diagnostic test"));
}

#[tokio::test]
async fn invalid_events_are_rejected_without_partial_updates() {
    let engine = engine();

    let err = engine
        .record_attempt(event("u1", "Mathematics", 150))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidScore { score: 150 });
    assert!(err.to_string().starts_with("invalid_score"));

    let err = engine
        .record_attempt(event("u1", "", 80))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::MissingField("topic"));

    // Nothing was recorded; the user still cold-starts.
    let summary = engine.get_pattern_summary("u1").await;
    assert_eq!(summary.attempts, 0);
}

#[tokio::test]
async fn dead_backend_never_surfaces_to_callers() {
    let engine =
        RecommendationEngine::with_backend(EngineConfig::default(), Arc::new(DeadBackend));

    ingest(&engine, "u1", "Chemistry", &[40, 55]).await;
    ingest(&engine, "u2", "Chemistry", &[90]).await;

    // Ingestion succeeded and every query path still works.
    let result = engine.get_recommendations("u1").await;
    assert_eq!(result.focus_areas, vec!["Chemistry"]);

    let peers = engine.get_similar_users("u1", 5).await;
    assert_eq!(peers.len(), 1);
    assert_eq!(peers[0].peer_id, "u2");

    let summary = engine.get_pattern_summary("u1").await;
    assert_eq!(summary.attempts, 2);
}

#[tokio::test]
async fn summaries_and_analytics_agree() {
    let engine = engine();
    ingest(&engine, "u1", "Mathematics", &[80, 90]).await;
    ingest(&engine, "u1", "Physics", &[40]).await;
    ingest(&engine, "u2", "Mathematics", &[60]).await;

    let summary = engine.get_pattern_summary("u1").await;
    assert_eq!(summary.attempts, 3);
    assert_eq!(summary.topics_covered, 2);
    assert!((summary.average_score - 70.0).abs() < f64::EPSILON);

    let overview = engine.cohort_overview().await;
    assert_eq!(overview.total_learners, 2);
    assert_eq!(overview.total_attempts, 4);
    let math = &overview.topic_performance["Mathematics"];
    assert_eq!(math.attempts, 3);
    assert!((math.average - 76.666666).abs() < 0.001);

    let progress = engine.learner_progress().await;
    assert_eq!(progress.len(), 2);
    assert_eq!(progress[0].user_id, "u1");
    assert_eq!(progress[0].attempts, summary.attempts);
}

#[tokio::test]
async fn trend_window_reflects_ingestion_order_not_timestamps() {
    let engine = engine();

    // Submit events with timestamps running backwards.
    let base = Utc::now();
    for (i, score) in [10u32, 20, 30].iter().enumerate() {
        let mut e = event("u1", "Mathematics", *score);
        e.timestamp = base - chrono::Duration::minutes(i as i64);
        engine.record_attempt(e).await.unwrap();
    }

    let pattern = engine.store().get("u1").await;
    let scores: Vec<u32> = pattern.performance_trend.iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![10, 20, 30]);
}

#[tokio::test]
async fn concurrent_ingestion_for_many_users_stays_consistent() {
    let engine = Arc::new(engine());

    let mut handles = Vec::new();
    for user in 0..8 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            let user_id = format!("user-{user}");
            for score in [40, 55, 90, 95] {
                engine
                    .record_attempt(event(&user_id, "Mathematics", score))
                    .await
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    for user in 0..8 {
        let summary = engine.get_pattern_summary(&format!("user-{user}")).await;
        assert_eq!(summary.attempts, 4);
        assert!((summary.average_score - 70.0).abs() < f64::EPSILON);
    }
}
