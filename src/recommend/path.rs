//! Learning-path construction
//!
//! Composes a short, prioritized path in a fixed order: weak areas
//! first, then reinforcement of strong topics, then one unexplored
//! subject from the catalog.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{Difficulty, Priority};

/// One step of a learning path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathStep {
    pub topic: String,
    pub priority: Priority,
    pub reason: String,
    pub suggested_difficulty: Difficulty,
}

/// Build a 0-5 step path.
///
/// Composition order is fixed: up to two weak areas (high priority,
/// easy), up to two preferred topics not already listed as weak (medium,
/// medium), and the first catalog topic without any recorded performance
/// (low, easy), omitted when the catalog is fully covered.
pub fn build(
    topic_performance: &IndexMap<String, f64>,
    weak_areas: &[String],
    preferred_topics: &[String],
    catalog: &[String],
) -> Vec<PathStep> {
    let mut path = Vec::new();

    for topic in weak_areas.iter().take(2) {
        path.push(PathStep {
            topic: topic.clone(),
            priority: Priority::High,
            reason: "Needs improvement".to_string(),
            suggested_difficulty: Difficulty::Easy,
        });
    }

    for topic in preferred_topics
        .iter()
        .filter(|t| !weak_areas.contains(t))
        .take(2)
    {
        path.push(PathStep {
            topic: topic.clone(),
            priority: Priority::Medium,
            reason: "Strengthen existing knowledge".to_string(),
            suggested_difficulty: Difficulty::Medium,
        });
    }

    if let Some(topic) = catalog
        .iter()
        .find(|t| !topic_performance.contains_key(t.as_str()))
    {
        path.push(PathStep {
            topic: topic.clone(),
            priority: Priority::Low,
            reason: "Explore new subject".to_string(),
            suggested_difficulty: Difficulty::Easy,
        });
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<String> {
        ["Mathematics", "Physics", "Chemistry", "Biology", "Computer Science"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn performance(topics: &[(&str, f64)]) -> IndexMap<String, f64> {
        topics
            .iter()
            .map(|(t, avg)| (t.to_string(), *avg))
            .collect()
    }

    #[test]
    fn test_weak_areas_come_first() {
        let path = build(
            &performance(&[("Chemistry", 45.0), ("Biology", 50.0), ("Mathematics", 90.0)]),
            &["Chemistry".to_string(), "Biology".to_string()],
            &["Mathematics".to_string()],
            &catalog(),
        );

        assert_eq!(path.len(), 4);
        assert_eq!(path[0].topic, "Chemistry");
        assert_eq!(path[0].priority, Priority::High);
        assert_eq!(path[0].suggested_difficulty, Difficulty::Easy);
        assert_eq!(path[1].topic, "Biology");
        assert_eq!(path[2].topic, "Mathematics");
        assert_eq!(path[2].priority, Priority::Medium);
        // Physics is the first catalog entry with no recorded performance.
        assert_eq!(path[3].topic, "Physics");
        assert_eq!(path[3].priority, Priority::Low);
    }

    #[test]
    fn test_weak_and_preferred_capped_at_two_each() {
        let weak: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let preferred: Vec<String> = ["D", "E", "F"].iter().map(|s| s.to_string()).collect();
        let perf = performance(&[
            ("A", 10.0),
            ("B", 10.0),
            ("C", 10.0),
            ("D", 90.0),
            ("E", 90.0),
            ("F", 90.0),
        ]);

        let path = build(&perf, &weak, &preferred, &catalog());
        assert_eq!(path.len(), 5);
        assert_eq!(path[0].topic, "A");
        assert_eq!(path[1].topic, "B");
        assert_eq!(path[2].topic, "D");
        assert_eq!(path[3].topic, "E");
        assert_eq!(path[4].topic, "Mathematics");
    }

    #[test]
    fn test_preferred_already_weak_is_skipped() {
        // A topic cannot be both under the thresholds, but the exclusion
        // is explicit: anything listed weak never reappears as reinforcement.
        let weak = vec!["Physics".to_string()];
        let preferred = vec!["Physics".to_string(), "Mathematics".to_string()];
        let perf = performance(&[("Physics", 50.0), ("Mathematics", 80.0)]);

        let path = build(&perf, &weak, &preferred, &catalog());
        assert_eq!(path[0].topic, "Physics");
        assert_eq!(path[1].topic, "Mathematics");
        assert_eq!(path[1].priority, Priority::Medium);
    }

    #[test]
    fn test_fully_covered_catalog_omits_exploration() {
        let perf = performance(&[
            ("Mathematics", 70.0),
            ("Physics", 70.0),
            ("Chemistry", 70.0),
            ("Biology", 70.0),
            ("Computer Science", 70.0),
        ]);

        let path = build(&perf, &[], &[], &catalog());
        assert!(path.is_empty());
    }
}
