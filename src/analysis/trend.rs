//! Performance-trend detection
//!
//! Compares the three most recent attempts against the three before
//! them. Without six entries there is no baseline, and improvement is
//! never asserted.

use std::collections::VecDeque;

use crate::pattern::TrendEntry;

/// Whether recent performance is strictly better than the baseline
pub fn is_improving(window: &VecDeque<TrendEntry>) -> bool {
    if window.len() < 3 {
        return false;
    }

    let scores: Vec<f64> = window.iter().map(|e| e.score as f64).collect();
    let recent = &scores[scores.len() - 3..];
    if scores.len() < 6 {
        return false;
    }
    let earlier = &scores[scores.len() - 6..scores.len() - 3];

    mean(recent) > mean(earlier)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn window(scores: &[u32]) -> VecDeque<TrendEntry> {
        scores
            .iter()
            .map(|&score| TrendEntry {
                score,
                timestamp: Utc::now(),
                topic: "Mathematics".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_needs_three_entries() {
        assert!(!is_improving(&window(&[])));
        assert!(!is_improving(&window(&[10, 90])));
    }

    #[test]
    fn test_needs_six_for_a_baseline() {
        // Rising scores, but no earlier window to compare against.
        assert!(!is_improving(&window(&[10, 50, 90])));
        assert!(!is_improving(&window(&[10, 20, 30, 40, 50])));
    }

    #[test]
    fn test_detects_improvement() {
        // Recent mean 85 > earlier mean 50.
        assert!(is_improving(&window(&[50, 50, 50, 80, 85, 90])));
    }

    #[test]
    fn test_equal_or_declining_is_not_improving() {
        assert!(!is_improving(&window(&[70, 70, 70, 70, 70, 70])));
        assert!(!is_improving(&window(&[90, 85, 80, 50, 50, 50])));
    }

    #[test]
    fn test_only_last_six_matter() {
        // Old low scores beyond the comparison range change nothing.
        assert!(is_improving(&window(&[95, 95, 5, 5, 5, 60, 65, 70])));
    }
}
