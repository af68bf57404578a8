//! Configuration management
//!
//! Engine settings: topic catalog, similarity threshold, persistence
//! backend, and question-provider endpoint. The decision thresholds for
//! classification and recommendation are fixed rules, not configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::backend::{HttpVectorBackend, MemoryBackend, PersistenceBackend};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Topics recommended to a learner with no history
    #[serde(default = "default_starter_topics")]
    pub starter_topics: Vec<String>,
    /// Catalog used when suggesting unexplored subjects
    #[serde(default = "default_topic_catalog")]
    pub topic_catalog: Vec<String>,
    /// Minimum topic-overlap ratio for a peer match
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    /// Persistence backend settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Question-provider settings
    #[serde(default)]
    pub generator: GeneratorConfig,
}

fn default_starter_topics() -> Vec<String> {
    vec![
        "Mathematics".to_string(),
        "Physics".to_string(),
        "Chemistry".to_string(),
    ]
}

fn default_topic_catalog() -> Vec<String> {
    vec![
        "Mathematics".to_string(),
        "Physics".to_string(),
        "Chemistry".to_string(),
        "Biology".to_string(),
        "Computer Science".to_string(),
    ]
}

fn default_similarity_threshold() -> f64 {
    0.3
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starter_topics: default_starter_topics(),
            topic_catalog: default_topic_catalog(),
            similarity_threshold: default_similarity_threshold(),
            backend: BackendConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default location, falling back to
    /// defaults when no file exists
    pub fn load() -> Result<Self> {
        let config_path = config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: EngineConfig =
            toml::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

/// Which persistence backend to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process map, as durable as the process
    Memory,
    /// HTTP vector index
    Vector,
}

/// Persistence backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_kind")]
    pub kind: BackendKind,
    /// Base URL of the vector index (required for `kind = "vector"`)
    #[serde(default)]
    pub base_url: Option<String>,
    /// API key; falls back to the EDUTUTOR_VECTOR_API_KEY environment
    /// variable when unset
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Index name
    #[serde(default = "default_index_name")]
    pub index: String,
    /// Bound on every backend call, in seconds
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
}

fn default_backend_kind() -> BackendKind {
    BackendKind::Memory
}

fn default_index_name() -> String {
    "edututor".to_string()
}

fn default_backend_timeout() -> u64 {
    5
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: default_backend_kind(),
            base_url: None,
            api_key: None,
            index: default_index_name(),
            timeout_secs: default_backend_timeout(),
        }
    }
}

impl BackendConfig {
    /// Bound applied to every backend call
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Construct the configured backend.
    ///
    /// Selection happens exactly once, here; the engine never re-checks
    /// availability. A vector configuration missing its endpoint or key
    /// degrades to the in-memory backend at construction time.
    pub fn connect(&self) -> Arc<dyn PersistenceBackend> {
        if self.kind == BackendKind::Memory {
            return Arc::new(MemoryBackend::new());
        }

        let api_key = self
            .api_key
            .clone()
            .or_else(|| std::env::var("EDUTUTOR_VECTOR_API_KEY").ok());

        match (self.base_url.as_ref(), api_key) {
            (Some(base_url), Some(api_key)) => {
                match HttpVectorBackend::new(base_url, api_key, &self.index, self.timeout()) {
                    Ok(backend) => {
                        info!("Using vector index at {}", base_url);
                        Arc::new(backend)
                    }
                    Err(e) => {
                        warn!("Failed to initialize vector index: {:#}. Using in-memory storage.", e);
                        Arc::new(MemoryBackend::new())
                    }
                }
            }
            _ => {
                warn!("Vector backend configured without endpoint or API key, using in-memory storage");
                Arc::new(MemoryBackend::new())
            }
        }
    }
}

/// Question-provider settings (OpenAI-compatible chat completions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Base URL of the completions API
    #[serde(default = "default_generator_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_generator_model")]
    pub model: String,
    /// API key; falls back to the EDUTUTOR_LLM_API_KEY environment
    /// variable when unset
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Request timeout, in seconds
    #[serde(default = "default_generator_timeout")]
    pub timeout_secs: u64,
}

fn default_generator_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_generator_model() -> String {
    "ibm-granite/granite-3.3-8b-instruct".to_string()
}

fn default_generator_timeout() -> u64 {
    30
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: default_generator_url(),
            model: default_generator_model(),
            api_key: None,
            timeout_secs: default_generator_timeout(),
        }
    }
}

impl GeneratorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the API key from config or environment
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("EDUTUTOR_LLM_API_KEY").ok())
    }
}

/// Path of the configuration file
pub fn config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(dir.join("edututor").join("config.toml"))
}
