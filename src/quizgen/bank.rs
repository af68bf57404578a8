//! Fixed fallback question bank
//!
//! Serves canned questions when no provider is configured or a provider
//! call fails. Cycles through the bank when more questions are requested
//! than it holds, tagging repeats as variations.

use anyhow::Result;
use async_trait::async_trait;

use super::{QuestionGenerator, QuizQuestion};
use crate::types::Difficulty;

/// Offline question source with a small bank per topic and difficulty
#[derive(Debug, Default)]
pub struct QuestionBank;

impl QuestionBank {
    pub fn new() -> Self {
        Self
    }

    fn bank(topic: &str, difficulty: Difficulty) -> Vec<QuizQuestion> {
        let entries: &[(&str, &[&str; 4], usize, &str)] = match (topic, difficulty) {
            ("Mathematics", Difficulty::Easy) => &[
                (
                    "What is 8 × 7?",
                    &["54", "56", "58", "60"],
                    1,
                    "8 × 7 = 56. This is a basic multiplication fact.",
                ),
                (
                    "What is 50% of 80?",
                    &["30", "35", "40", "45"],
                    2,
                    "50% of 80 = 0.5 × 80 = 40.",
                ),
            ],
            ("Mathematics", Difficulty::Medium) => &[
                (
                    "What is the derivative of x²?",
                    &["2x", "x²", "2", "x"],
                    0,
                    "Using the power rule: d/dx(x²) = 2x.",
                ),
                (
                    "Solve for x: 2x + 5 = 13",
                    &["x = 4", "x = 6", "x = 8", "x = 9"],
                    0,
                    "2x = 13 - 5 = 8, so x = 4.",
                ),
            ],
            ("Mathematics", Difficulty::Hard) => &[(
                "What is the limit of (sin x)/x as x approaches 0?",
                &["0", "1", "∞", "undefined"],
                1,
                "This is a fundamental limit: lim(x→0) (sin x)/x = 1.",
            )],
            ("Physics", Difficulty::Easy) => &[(
                "What is the unit of force?",
                &["Joule", "Newton", "Watt", "Pascal"],
                1,
                "The Newton (N) is the SI unit of force.",
            )],
            ("Physics", Difficulty::Medium) => &[(
                "What is Newton's second law of motion?",
                &["F = ma", "E = mc²", "v = u + at", "s = ut + ½at²"],
                0,
                "Newton's second law states that force equals mass times acceleration.",
            )],
            ("Physics", Difficulty::Hard) => &[(
                "What is the uncertainty principle?",
                &["ΔxΔp ≥ ℏ/2", "E = hf", "λ = h/p", "F = qE"],
                0,
                "Heisenberg's uncertainty principle bounds the product of position and momentum uncertainties.",
            )],
            ("Chemistry", _) => &[(
                "What is the chemical formula for water?",
                &["H₂O", "CO₂", "NaCl", "O₂"],
                0,
                "Water consists of two hydrogen atoms bonded to one oxygen atom.",
            )],
            ("Biology", _) => &[(
                "What is the powerhouse of the cell?",
                &["Nucleus", "Mitochondria", "Ribosome", "Golgi apparatus"],
                1,
                "Mitochondria produce ATP, the cell's energy currency.",
            )],
            ("Computer Science", _) => &[(
                "Which data structure follows the LIFO principle?",
                &["Queue", "Stack", "Array", "Linked List"],
                1,
                "A stack is last in, first out.",
            )],
            // Unknown topics fall back to the Mathematics bank.
            (_, difficulty) => return Self::bank("Mathematics", difficulty),
        };

        entries
            .iter()
            .map(|(question, options, correct_answer, explanation)| QuizQuestion {
                question: question.to_string(),
                options: options.iter().map(|s| s.to_string()).collect(),
                correct_answer: *correct_answer,
                explanation: Some(explanation.to_string()),
            })
            .collect()
    }
}

#[async_trait]
impl QuestionGenerator for QuestionBank {
    async fn generate(
        &self,
        topic: &str,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<Vec<QuizQuestion>> {
        let bank = Self::bank(topic, difficulty);
        if bank.is_empty() {
            return Ok(Vec::new());
        }

        let mut questions = Vec::with_capacity(count);
        for i in 0..count {
            let mut question = bank[i % bank.len()].clone();
            if i >= bank.len() {
                question.question =
                    format!("{} (Variation {})", question.question, i / bank.len() + 1);
            }
            questions.push(question);
        }
        Ok(questions)
    }
}
