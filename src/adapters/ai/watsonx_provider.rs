//! watsonx.ai Provider - Implementation of TextGenerator for IBM watsonx.ai.
//!
//! Calls the text generation endpoint with greedy decoding. Authentication is
//! an IAM bearer token obtained from the shared [`IamTokenProvider`].
//!
//! # Configuration
//!
//! ```ignore
//! let iam = Arc::new(IamTokenProvider::new(api_key, DEFAULT_IAM_URL, timeout));
//! let config = WatsonxConfig::new("project-id")
//!     .with_model("ibm/granite-3-8b-instruct")
//!     .with_base_url("https://us-south.ml.cloud.ibm.com");
//!
//! let generator = WatsonxTextGenerator::new(config, iam);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use super::iam::IamTokenProvider;
use crate::ports::{GenerationError, GenerationParams, ProviderInfo, TextGenerator};

pub const DEFAULT_WATSONX_URL: &str = "https://us-south.ml.cloud.ibm.com";
pub const DEFAULT_MODEL_ID: &str = "ibm/granite-3-8b-instruct";
const API_VERSION: &str = "2023-05-29";

/// Configuration for the watsonx.ai generator.
#[derive(Debug, Clone)]
pub struct WatsonxConfig {
    pub project_id: String,
    /// Model to use (e.g., "ibm/granite-3-8b-instruct").
    pub model: String,
    /// Regional base URL.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl WatsonxConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            model: DEFAULT_MODEL_ID.to_string(),
            base_url: DEFAULT_WATSONX_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 1,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// watsonx.ai text generation provider.
pub struct WatsonxTextGenerator {
    config: WatsonxConfig,
    client: Client,
    iam: Arc<IamTokenProvider>,
}

impl WatsonxTextGenerator {
    pub fn new(config: WatsonxConfig, iam: Arc<IamTokenProvider>) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        Self {
            config,
            client,
            iam,
        }
    }

    fn generation_url(&self) -> String {
        format!(
            "{}/ml/v1/text/generation?version={}",
            self.config.base_url.trim_end_matches('/'),
            API_VERSION
        )
    }

    fn to_watsonx_request<'a>(
        &'a self,
        prompt: &'a str,
        params: &'a GenerationParams,
    ) -> WatsonxRequest<'a> {
        WatsonxRequest {
            model_id: &self.config.model,
            project_id: &self.config.project_id,
            input: prompt,
            parameters: WatsonxParameters {
                decoding_method: "greedy",
                max_new_tokens: params.max_new_tokens,
                min_new_tokens: params.min_new_tokens,
                stop_sequences: &params.stop_sequences,
                repetition_penalty: params.repetition_penalty,
                temperature: params.temperature,
            },
        }
    }

    async fn send_request(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Response, GenerationError> {
        let token = self.iam.token().await?;

        self.client
            .post(self.generation_url())
            .bearer_auth(token)
            .header("Accept", "application/json")
            .json(&self.to_watsonx_request(prompt, params))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    GenerationError::network(format!("Connection failed: {}", e))
                } else {
                    GenerationError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, GenerationError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => {
                self.iam.invalidate().await;
                Err(GenerationError::AuthenticationFailed)
            }
            429 => Err(GenerationError::rate_limited(30)),
            400 | 404 => Err(GenerationError::InvalidRequest(error_body)),
            500..=599 => Err(GenerationError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(GenerationError::unavailable(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    async fn parse_response(&self, response: Response) -> Result<String, GenerationError> {
        let response = self.handle_response_status(response).await?;

        let body: WatsonxResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::parse(format!("Failed to parse response: {}", e)))?;

        first_generated_text(body)
    }
}

fn first_generated_text(body: WatsonxResponse) -> Result<String, GenerationError> {
    body.results
        .into_iter()
        .next()
        .map(|r| r.generated_text)
        .ok_or_else(|| GenerationError::parse("No results in response"))
}

#[async_trait]
impl TextGenerator for WatsonxTextGenerator {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let mut retry_count = 0;

        loop {
            let result = match self.send_request(prompt, params).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(text) => {
                    tracing::debug!(model = %self.config.model, chars = text.len(), "Generation complete");
                    return Ok(text);
                }
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    tracing::warn!("watsonx call failed ({}), retrying", err);
                }
                Err(err) => return Err(err),
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            sleep(Duration::from_secs(1 << retry_count)).await;
            retry_count += 1;
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("watsonx", &self.config.model)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// watsonx API types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct WatsonxRequest<'a> {
    model_id: &'a str,
    project_id: &'a str,
    input: &'a str,
    parameters: WatsonxParameters<'a>,
}

#[derive(Debug, Serialize)]
struct WatsonxParameters<'a> {
    decoding_method: &'static str,
    max_new_tokens: u32,
    min_new_tokens: u32,
    stop_sequences: &'a [String],
    repetition_penalty: f32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct WatsonxResponse {
    #[serde(default)]
    results: Vec<WatsonxResult>,
}

#[derive(Debug, Deserialize)]
struct WatsonxResult {
    generated_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn generator() -> WatsonxTextGenerator {
        let iam = Arc::new(IamTokenProvider::new(
            Secret::new("key".into()),
            "http://localhost/iam",
            Duration::from_secs(5),
        ));
        WatsonxTextGenerator::new(
            WatsonxConfig::new("project-1").with_base_url("https://example.test/"),
            iam,
        )
    }

    #[test]
    fn config_builder_works() {
        let config = WatsonxConfig::new("p")
            .with_model("ibm/other")
            .with_base_url("https://eu-de.ml.cloud.ibm.com")
            .with_timeout(Duration::from_secs(30))
            .with_max_retries(3);

        assert_eq!(config.model, "ibm/other");
        assert_eq!(config.base_url, "https://eu-de.ml.cloud.ibm.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn generation_url_includes_version() {
        assert_eq!(
            generator().generation_url(),
            "https://example.test/ml/v1/text/generation?version=2023-05-29"
        );
    }

    #[test]
    fn request_uses_greedy_decoding_and_params() {
        let gen = generator();
        let params = GenerationParams::default();
        let body = serde_json::to_value(gen.to_watsonx_request("hello", &params)).unwrap();

        assert_eq!(body["model_id"], "ibm/granite-3-8b-instruct");
        assert_eq!(body["project_id"], "project-1");
        assert_eq!(body["input"], "hello");
        assert_eq!(body["parameters"]["decoding_method"], "greedy");
        assert_eq!(body["parameters"]["max_new_tokens"], 1500);
        assert_eq!(body["parameters"]["min_new_tokens"], 50);
    }

    #[test]
    fn first_result_text_is_returned() {
        let body: WatsonxResponse = serde_json::from_str(
            r#"{"results":[{"generated_text":"{\"type\":\"chat\"}"}]}"#,
        )
        .unwrap();
        assert_eq!(first_generated_text(body).unwrap(), "{\"type\":\"chat\"}");
    }

    #[test]
    fn empty_results_is_parse_error() {
        let body: WatsonxResponse = serde_json::from_str(r#"{"results":[]}"#).unwrap();
        assert!(matches!(
            first_generated_text(body),
            Err(GenerationError::Parse(_))
        ));
    }

    #[test]
    fn provider_info_reports_model() {
        let info = generator().provider_info();
        assert_eq!(info.name, "watsonx");
        assert_eq!(info.model, "ibm/granite-3-8b-instruct");
    }
}
