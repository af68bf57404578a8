//! Question-generation boundary
//!
//! The engine consumes quiz questions from an upstream provider and only
//! ever sees the resulting scores; nothing in the core inspects question
//! content. This module defines the structured question record, its
//! validation, and the provider interface with its two implementations.

pub mod bank;
pub mod llm;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::Difficulty;

pub use bank::QuestionBank;
pub use llm::LlmQuestionGenerator;

/// Number of answer options every question carries
pub const OPTION_COUNT: usize = 4;

/// A structured multiple-choice question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizQuestion {
    pub question: String,
    /// Exactly four answer options
    pub options: Vec<String>,
    /// Index into `options`, 0-3
    pub correct_answer: usize,
    pub explanation: Option<String>,
}

impl QuizQuestion {
    /// Structural validity: four options, in-range answer, non-empty text
    pub fn is_valid(&self) -> bool {
        !self.question.trim().is_empty()
            && self.options.len() == OPTION_COUNT
            && self.correct_answer < OPTION_COUNT
    }
}

/// Upstream provider of quiz questions
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Generate `count` questions for a topic at a difficulty level
    async fn generate(
        &self,
        topic: &str,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<Vec<QuizQuestion>>;
}

/// Parse a provider response into validated questions.
///
/// Accepts a bare JSON array or one wrapped in a Markdown code fence;
/// structurally invalid questions are dropped, and a response with no
/// valid question at all is an error.
pub fn parse_questions(raw: &str) -> Result<Vec<QuizQuestion>> {
    let cleaned = strip_code_fence(raw);
    let parsed: Vec<QuizQuestion> =
        serde_json::from_str(cleaned).context("Provider response is not a JSON question array")?;

    let questions: Vec<QuizQuestion> = parsed.into_iter().filter(QuizQuestion::is_valid).collect();
    if questions.is_empty() {
        anyhow::bail!("Provider response contained no valid questions");
    }
    Ok(questions)
}

fn strip_code_fence(raw: &str) -> &str {
    let mut cleaned = raw.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}
