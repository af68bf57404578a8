//! EduTutor - Adaptive Learning Engine Library
//!
//! An adaptive learning core with:
//! - Quiz-attempt ingestion with per-user learning patterns
//! - Strength/weakness classification and trend detection
//! - Personalized recommendations and prioritized learning paths
//! - Peer matching by topic overlap
//! - Optional vector-index persistence with graceful degradation
//! - A question-generation boundary for upstream LLM providers
//!
//! # Example
//!
//! ```ignore
//! use edututor::{EngineConfig, RecommendationEngine};
//! use edututor::pattern::AttemptEvent;
//! use edututor::types::Difficulty;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = RecommendationEngine::new(EngineConfig::load()?);
//!     engine.record_attempt(AttemptEvent {
//!         user_id: "student1".into(),
//!         topic: "Mathematics".into(),
//!         difficulty: Difficulty::Medium,
//!         score: 85,
//!         timestamp: chrono::Utc::now(),
//!         is_diagnostic: false,
//!     }).await?;
//!     let result = engine.get_recommendations("student1").await;
//!     println!("{}", result.next_steps);
//!     Ok(())
//! }
//! ```

// Core modules (order matters for cross-module dependencies)
pub mod types;
pub mod error;
pub mod pattern; // Must come before analysis since analysis reads patterns
pub mod analysis;
pub mod backend;
pub mod config;
pub mod recommend;
pub mod similarity;
pub mod analytics;

// Boundary modules
pub mod quizgen; // Upstream question-provider interface

// Re-export commonly used types for convenience
pub use config::{BackendConfig, BackendKind, EngineConfig, GeneratorConfig};

pub use error::{EngineError, EngineResult};

pub use pattern::{
    AttemptEvent,
    LearningPattern,
    PatternStore,
    PatternSummary,
};

pub use recommend::{
    feedback_for,
    PathStep,
    RecommendationEngine,
    RecommendationResult,
};

pub use similarity::{PeerMatcher, SimilarUser};

pub use backend::{MemoryBackend, PersistenceBackend};

pub use types::{Difficulty, Priority, TrendLabel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get the library info
pub fn info() -> String {
    format!("{} v{} - Adaptive Learning Engine Library", NAME, VERSION)
}
