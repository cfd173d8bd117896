//! watsonx.ai text generation configuration

use serde::Deserialize;
use std::time::Duration;

use super::check_url;
use super::error::ValidationError;
use crate::ports::GenerationParams;

/// watsonx.ai configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WatsonxConfig {
    /// IBM Cloud API key, exchanged for IAM bearer tokens
    pub api_key: String,

    /// watsonx project the model is deployed in
    pub project_id: String,

    /// Regional watsonx endpoint
    #[serde(default = "default_url")]
    pub url: String,

    /// IAM token endpoint
    #[serde(default = "default_iam_url")]
    pub iam_url: String,

    /// Primary foundation model
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Model tried once when the primary fails with a retryable error
    pub fallback_model_id: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries on retryable errors, per model
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,

    #[serde(default = "default_min_new_tokens")]
    pub min_new_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_repetition_penalty")]
    pub repetition_penalty: f32,
}

impl WatsonxConfig {
    /// Create a config with defaults for everything except credentials
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            project_id: project_id.into(),
            url: default_url(),
            iam_url: default_iam_url(),
            model_id: default_model_id(),
            fallback_model_id: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            max_new_tokens: default_max_new_tokens(),
            min_new_tokens: default_min_new_tokens(),
            temperature: default_temperature(),
            repetition_penalty: default_repetition_penalty(),
        }
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Fallback model, ignoring blank values
    pub fn fallback_model(&self) -> Option<&str> {
        self.fallback_model_id
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// Generation parameters sent with every request
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams::default()
            .with_max_new_tokens(self.max_new_tokens)
            .with_min_new_tokens(self.min_new_tokens)
            .with_temperature(self.temperature)
            .with_repetition_penalty(self.repetition_penalty)
    }

    /// Validate watsonx configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if self.api_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("WATSONX__API_KEY"));
        }
        if self.project_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("WATSONX__PROJECT_ID"));
        }
        check_url(&self.url, "watsonx.url", production)?;
        check_url(&self.iam_url, "watsonx.iam_url", production)?;

        if self.min_new_tokens > self.max_new_tokens {
            return Err(ValidationError::InvalidGenerationParameter("min_new_tokens"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidGenerationParameter("temperature"));
        }
        if !(1.0..=2.0).contains(&self.repetition_penalty) {
            return Err(ValidationError::InvalidGenerationParameter("repetition_penalty"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_url() -> String {
    "https://us-south.ml.cloud.ibm.com".to_string()
}

fn default_iam_url() -> String {
    "https://iam.cloud.ibm.com/identity/token".to_string()
}

fn default_model_id() -> String {
    "ibm/granite-3-8b-instruct".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    1
}

fn default_max_new_tokens() -> u32 {
    1500
}

fn default_min_new_tokens() -> u32 {
    50
}

fn default_temperature() -> f32 {
    0.7
}

fn default_repetition_penalty() -> f32 {
    1.05
}
