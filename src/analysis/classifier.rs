//! Preferred-topic and weak-area classification
//!
//! Thresholds are fixed, explainable rules: a topic with a mean score of
//! at least 75 is preferred, below 60 is weak, and the band between is
//! neither. Averages are always recomputed from the full score history,
//! so classification is independent of ingestion order.

use indexmap::IndexMap;

use crate::pattern::LearningPattern;

/// Mean score at or above which a topic counts as preferred
pub const PREFERRED_MIN: f64 = 75.0;

/// Mean score below which a topic counts as a weak area
pub const WEAK_MAX: f64 = 60.0;

/// Average score per topic, restricted to topics with at least one score.
/// Keys keep the topic insertion order of the pattern.
pub fn topic_averages(pattern: &LearningPattern) -> IndexMap<String, f64> {
    pattern
        .topics
        .iter()
        .filter_map(|(topic, history)| history.average().map(|avg| (topic.clone(), avg)))
        .collect()
}

/// Split topic averages into (preferred, weak), both in topic insertion
/// order. A topic with no recorded scores lands in neither list.
pub fn classify(averages: &IndexMap<String, f64>) -> (Vec<String>, Vec<String>) {
    let preferred = averages
        .iter()
        .filter(|(_, &avg)| avg >= PREFERRED_MIN)
        .map(|(topic, _)| topic.clone())
        .collect();
    let weak = averages
        .iter()
        .filter(|(_, &avg)| avg < WEAK_MAX)
        .map(|(topic, _)| topic.clone())
        .collect();
    (preferred, weak)
}

/// Recompute the derived lists on a pattern in place
pub fn reclassify(pattern: &mut LearningPattern) {
    let averages = topic_averages(pattern);
    let (preferred, weak) = classify(&averages);
    pattern.preferred_topics = preferred;
    pattern.weak_areas = weak;
}
