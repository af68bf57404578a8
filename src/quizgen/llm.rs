//! LLM-backed question provider
//!
//! Calls an OpenAI-compatible chat-completions endpoint and parses the
//! strict JSON array it is prompted to produce. Any failure — transport,
//! parse, or an empty valid set — falls back to the fixed bank, so the
//! caller always receives questions.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{bank::QuestionBank, parse_questions, QuestionGenerator, QuizQuestion};
use crate::config::GeneratorConfig;
use crate::types::Difficulty;

/// Question provider backed by a chat-completions API
pub struct LlmQuestionGenerator {
    client: Client,
    config: GeneratorConfig,
    fallback: QuestionBank,
}

impl LlmQuestionGenerator {
    /// Create a provider from configuration
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build question-provider HTTP client")?;

        Ok(Self {
            client,
            config,
            fallback: QuestionBank::new(),
        })
    }

    async fn generate_via_api(
        &self,
        topic: &str,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<Vec<QuizQuestion>> {
        let api_key = self
            .config
            .resolve_api_key()
            .context("No API key configured for question generation")?;

        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(topic, difficulty, count),
            }],
            temperature: 0.7,
        };

        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.config.base_url.trim_end_matches('/')
            ))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
            .context("Failed to send question-generation request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Question provider error ({}): {}", status, error_text);
        }

        let result: CompletionResponse = response
            .json()
            .await
            .context("Failed to parse completion response")?;

        let content = result
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .context("Completion response had no choices")?;

        let mut questions = parse_questions(content)?;
        questions.truncate(count);
        Ok(questions)
    }
}

#[async_trait]
impl QuestionGenerator for LlmQuestionGenerator {
    async fn generate(
        &self,
        topic: &str,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<Vec<QuizQuestion>> {
        match self.generate_via_api(topic, difficulty, count).await {
            Ok(questions) => {
                info!(
                    "Generated {} question(s) for {} ({})",
                    questions.len(),
                    topic,
                    difficulty
                );
                Ok(questions)
            }
            Err(e) => {
                warn!(
                    "Question provider failed for {} ({}): {:#}. Using fallback bank.",
                    topic, difficulty, e
                );
                self.fallback.generate(topic, difficulty, count).await
            }
        }
    }
}

fn build_prompt(topic: &str, difficulty: Difficulty, count: usize) -> String {
    format!(
        "You are an expert educational content creator. Generate {count} high-quality \
         multiple choice questions about {topic} at {difficulty} difficulty level.\n\n\
         Requirements:\n\
         1. Each question must be clear, educational, and appropriate for the difficulty level\n\
         2. Provide exactly 4 answer options\n\
         3. Include a brief explanation for the correct answer\n\
         4. Questions should test understanding, not just memorization\n\n\
         Respond with only a valid JSON array in this exact structure:\n\
         [{{\"question\": \"What is the capital of France?\", \
         \"options\": [\"London\", \"Berlin\", \"Paris\", \"Madrid\"], \
         \"correct_answer\": 2, \
         \"explanation\": \"Paris is the capital of France.\"}}]"
    )
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_parameters() {
        let prompt = build_prompt("Chemistry", Difficulty::Hard, 5);
        assert!(prompt.contains("Chemistry"));
        assert!(prompt.contains("hard"));
        assert!(prompt.contains("5 high-quality"));
    }

    #[tokio::test]
    async fn test_missing_key_falls_back_to_bank() {
        let config = GeneratorConfig {
            api_key: None,
            base_url: "http://192.0.2.1:9".to_string(),
            timeout_secs: 1,
            ..Default::default()
        };
        // Without a key the API path errors immediately and the bank takes over.
        std::env::remove_var("EDUTUTOR_LLM_API_KEY");
        let generator = LlmQuestionGenerator::new(config).unwrap();

        let questions = generator
            .generate("Physics", Difficulty::Easy, 2)
            .await
            .unwrap();
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(QuizQuestion::is_valid));
    }
}
