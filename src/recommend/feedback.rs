//! Per-attempt feedback text
//!
//! The fixed message shown right after a quiz submission. Distinct from
//! the next-steps guidance, which looks at the whole recent window.

/// Feedback for a single scored attempt
pub fn feedback_for(score: u32, topic: &str) -> String {
    if score >= 90 {
        format!(
            "Excellent work on {}! You've mastered this topic. Consider exploring advanced concepts.",
            topic
        )
    } else if score >= 70 {
        format!(
            "Good job on {}! You have a solid understanding. Review the areas you missed for improvement.",
            topic
        )
    } else if score >= 50 {
        format!(
            "You're making progress in {}. Focus on the fundamentals and practice more questions.",
            topic
        )
    } else {
        format!(
            "Keep practicing {}! Consider reviewing the basic concepts and taking additional quizzes.",
            topic
        )
    }
}
