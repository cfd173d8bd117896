//! IBM Cloud IAM token exchange with an in-process cache.
//!
//! The API key is exchanged for a bearer token, which is reused until shortly
//! before it expires.

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::ports::GenerationError;

pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";

const GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Tokens are refreshed this long before their stated expiry.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

struct CachedToken {
    token: Secret<String>,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now + REFRESH_MARGIN < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Exchanges an API key for IAM bearer tokens.
pub struct IamTokenProvider {
    client: Client,
    api_key: Secret<String>,
    iam_url: String,
    cached: Mutex<Option<CachedToken>>,
}

impl IamTokenProvider {
    pub fn new(api_key: Secret<String>, iam_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            iam_url: iam_url.into(),
            cached: Mutex::new(None),
        }
    }

    /// Returns a valid bearer token, exchanging the API key when the cached
    /// token is missing or about to expire.
    pub async fn token(&self) -> Result<String, GenerationError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Instant::now()) {
                return Ok(token.token.expose_secret().clone());
            }
        }

        tracing::debug!("Exchanging API key for IAM token");
        let fresh = self.exchange().await?;
        let token = fresh.access_token.clone();
        *cached = Some(CachedToken {
            token: Secret::new(fresh.access_token),
            expires_at: Instant::now() + Duration::from_secs(fresh.expires_in),
        });
        Ok(token)
    }

    /// Drops the cached token so the next call exchanges again.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    async fn exchange(&self) -> Result<IamTokenResponse, GenerationError> {
        let response = self
            .client
            .post(&self.iam_url)
            .header("Accept", "application/json")
            .form(&[
                ("grant_type", GRANT_TYPE),
                ("apikey", self.api_key.expose_secret().as_str()),
            ])
            .send()
            .await
            .map_err(|e| GenerationError::network(format!("IAM request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("IAM token exchange failed with status {}", status);
            return Err(match status.as_u16() {
                400 | 401 | 403 => GenerationError::AuthenticationFailed,
                _ => GenerationError::unavailable(format!("IAM returned {}", status)),
            });
        }

        response
            .json()
            .await
            .map_err(|e| GenerationError::parse(format!("Invalid IAM response: {}", e)))
    }
}
