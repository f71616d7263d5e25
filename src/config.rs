//! Runtime configuration for the WikiMentor core.
//!
//! One explicitly constructed [`MentorConfig`] is passed to every component
//! constructor; there is no process-global state. The inference credential
//! comes from the environment or a config file, never from code.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Environment variable holding the inference bearer token
pub const API_KEY_ENV_VAR: &str = "GROQ_API_KEY";

/// Configuration shared by the resolver, the tutor, and the synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MentorConfig {
    /// Bearer token for the inference endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference_api_key: Option<String>,
    /// Model identifier sent with every inference request
    pub inference_model: String,
    /// Chat-completions endpoint URL
    pub inference_url: String,
    pub wikipedia_base_url: String,
    pub wikibooks_base_url: String,
    pub wikidata_base_url: String,
    pub wikiversity_base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Upper bound on resolved facts per topic
    pub max_fact_properties: usize,
    /// Hard character cutoff applied to flashcard source text
    pub max_source_text_length: usize,
}

impl Default for MentorConfig {
    fn default() -> Self {
        Self {
            inference_api_key: None,
            inference_model: "llama3-8b-8192".to_string(),
            inference_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            wikipedia_base_url: "https://en.wikipedia.org".to_string(),
            wikibooks_base_url: "https://en.wikibooks.org".to_string(),
            wikidata_base_url: "https://www.wikidata.org".to_string(),
            wikiversity_base_url: "https://en.wikiversity.org".to_string(),
            request_timeout_secs: 10,
            max_fact_properties: 5,
            max_source_text_length: 2000,
        }
    }
}

impl MentorConfig {
    /// Defaults plus the inference credential from the environment.
    pub fn from_env() -> Self {
        Self {
            inference_api_key: std::env::var(API_KEY_ENV_VAR).ok(),
            ..Self::default()
        }
    }

    /// Load from a TOML file; missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
