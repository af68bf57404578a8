//! HTTP vector-index backend
//!
//! Talks to a Pinecone-style REST index. Every call carries a bounded
//! timeout so a slow or unreachable index can only degrade persistence,
//! never block ingestion.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

use super::{PersistenceBackend, VectorMatch};

/// Vector index reachable over HTTP
pub struct HttpVectorBackend {
    client: Client,
    base_url: String,
    api_key: String,
    index: String,
}

impl HttpVectorBackend {
    /// Create a backend for the given index endpoint
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        index: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build vector-index HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            index: index.into(),
        })
    }
}

#[async_trait]
impl PersistenceBackend for HttpVectorBackend {
    async fn upsert(&self, id: &str, vector: Vec<f32>, metadata: Value) -> Result<()> {
        let request = UpsertRequest {
            index: self.index.clone(),
            vectors: vec![VectorRecord {
                id: id.to_string(),
                values: vector,
                metadata,
            }],
        };

        let response = self
            .client
            .post(format!("{}/vectors/upsert", self.base_url))
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send upsert request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!("Vector index upsert error ({}): {}", status, error_text);
            anyhow::bail!("Vector index upsert error ({}): {}", status, error_text);
        }

        Ok(())
    }

    async fn query_similar(&self, vector: Vec<f32>, top_k: usize) -> Result<Vec<VectorMatch>> {
        let request = QueryRequest {
            index: self.index.clone(),
            vector,
            top_k,
            include_metadata: true,
        };

        let response = self
            .client
            .post(format!("{}/query", self.base_url))
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send similarity query")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Vector index query error ({}): {}", status, error_text);
        }

        let result: QueryResponse = response
            .json()
            .await
            .context("Failed to parse similarity query response")?;

        Ok(result
            .matches
            .into_iter()
            .map(|m| VectorMatch {
                id: m.id,
                score: m.score,
                metadata: m.metadata.unwrap_or(Value::Null),
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "vector-index"
    }
}

#[derive(Debug, Serialize)]
struct UpsertRequest {
    index: String,
    vectors: Vec<VectorRecord>,
}

#[derive(Debug, Serialize)]
struct VectorRecord {
    id: String,
    values: Vec<f32>,
    metadata: Value,
}

#[derive(Debug, Serialize)]
struct QueryRequest {
    index: String,
    vector: Vec<f32>,
    #[serde(rename = "topK")]
    top_k: usize,
    #[serde(rename = "includeMetadata")]
    include_metadata: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    id: String,
    score: f32,
    metadata: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_trimmed() {
        let backend = HttpVectorBackend::new(
            "https://index.example.com/",
            "key",
            "edututor",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(backend.base_url, "https://index.example.com");
        assert_eq!(backend.name(), "vector-index");
    }

    #[tokio::test]
    async fn test_unreachable_index_errors_instead_of_hanging() {
        // Reserved TEST-NET address; the bounded timeout turns this into
        // a prompt error the store can swallow.
        let backend = HttpVectorBackend::new(
            "http://192.0.2.1:9",
            "key",
            "edututor",
            Duration::from_millis(50),
        )
        .unwrap();

        let result = backend
            .upsert("id", vec![0.0; 4], Value::Null)
            .await;
        assert!(result.is_err());
    }
}
