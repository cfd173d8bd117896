use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::ports::SpeechError;

/// Connection settings shared by the Watson speech services.
#[derive(Debug, Clone)]
pub struct WatsonSpeechConfig {
    api_key: Secret<String>,
    /// Service instance URL.
    pub url: String,
    pub timeout: Duration,
}

impl WatsonSpeechConfig {
    pub fn new(api_key: Secret<String>, url: impl Into<String>) -> Self {
        Self {
            api_key,
            url: url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(super) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub(super) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), path)
    }

    pub(super) fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .unwrap_or_default()
    }

    pub(super) fn map_send_error(&self, e: reqwest::Error) -> SpeechError {
        if e.is_timeout() {
            SpeechError::Timeout {
                timeout_secs: self.timeout.as_secs() as u32,
            }
        } else {
            SpeechError::Network(e.to_string())
        }
    }
}

/// Turns a non-2xx response into `SpeechError::Unavailable`, keeping the body
/// so fallback conditions can inspect it.
pub(super) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, SpeechError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(SpeechError::Unavailable {
        status: status.as_u16(),
        message,
    })
}
