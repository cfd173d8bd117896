//! Watson NLU configuration

use serde::Deserialize;
use std::time::Duration;

use super::check_url;
use super::error::ValidationError;

/// Watson Natural Language Understanding configuration.
///
/// NLU is optional: without both a key and a URL every message is treated as
/// a symptom description with no annotation.
#[derive(Debug, Clone, Deserialize)]
pub struct NluConfig {
    pub api_key: Option<String>,

    pub url: Option<String>,

    /// API version date
    #[serde(default = "default_version")]
    pub version: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl NluConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Key and URL, when both are present
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let key = self.api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        let url = self.url.as_deref().filter(|u| !u.trim().is_empty())?;
        Some((key, url))
    }

    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if let Some((_, url)) = self.credentials() {
            check_url(url, "nlu.url", production)?;
        }
        Ok(())
    }
}

impl Default for NluConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            url: None,
            version: default_version(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_version() -> String {
    "2022-04-07".to_string()
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_by_default() {
        let config = NluConfig::default();
        assert!(config.credentials().is_none());
        assert_eq!(config.version, "2022-04-07");
        assert!(config.validate(true).is_ok());
    }

    #[test]
    fn test_key_without_url_is_unconfigured() {
        let config = NluConfig {
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let config = NluConfig {
            api_key: Some("key".to_string()),
            url: Some("nlu.example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(false), Err(ValidationError::InvalidUrl("nlu.url")));
    }
}
