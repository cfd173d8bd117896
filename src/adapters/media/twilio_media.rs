//! Twilio media download - fetches WhatsApp voice notes from their media URL
//! using account credentials.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::ports::{MediaError, MediaFetcher};

pub struct TwilioMediaFetcher {
    account_sid: String,
    auth_token: Secret<String>,
    client: Client,
}

impl TwilioMediaFetcher {
    pub fn new(account_sid: impl Into<String>, auth_token: Secret<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            account_sid: account_sid.into(),
            auth_token,
            client,
        }
    }
}

#[async_trait]
impl MediaFetcher for TwilioMediaFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, MediaError> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.account_sid, Some(self.auth_token.expose_secret()))
            .send()
            .await
            .map_err(|e| MediaError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Media download failed with status {}", status);
            return Err(MediaError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MediaError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Fetcher used when no Twilio credentials are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredMediaFetcher;

#[async_trait]
impl MediaFetcher for UnconfiguredMediaFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, MediaError> {
        Err(MediaError::NotConfigured)
    }
}
