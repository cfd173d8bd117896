//! Watson speech-to-text / text-to-speech configuration

use serde::Deserialize;
use std::time::Duration;

use super::check_url;
use super::error::ValidationError;

/// Speech service configuration. Either service may be left unconfigured;
/// its endpoints then answer with a "not configured" error.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    pub stt_api_key: Option<String>,
    pub stt_url: Option<String>,
    pub tts_api_key: Option<String>,
    pub tts_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SpeechConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn stt_credentials(&self) -> Option<(&str, &str)> {
        pair(&self.stt_api_key, &self.stt_url)
    }

    pub fn tts_credentials(&self) -> Option<(&str, &str)> {
        pair(&self.tts_api_key, &self.tts_url)
    }

    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if present(&self.stt_url) && !present(&self.stt_api_key) {
            return Err(ValidationError::IncompleteSpeechService("stt"));
        }
        if present(&self.tts_url) && !present(&self.tts_api_key) {
            return Err(ValidationError::IncompleteSpeechService("tts"));
        }
        if let Some((_, url)) = self.stt_credentials() {
            check_url(url, "speech.stt_url", production)?;
        }
        if let Some((_, url)) = self.tts_credentials() {
            check_url(url, "speech.tts_url", production)?;
        }
        Ok(())
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            stt_api_key: None,
            stt_url: None,
            tts_api_key: None,
            tts_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn pair<'a>(key: &'a Option<String>, url: &'a Option<String>) -> Option<(&'a str, &'a str)> {
    if present(key) && present(url) {
        Some((key.as_deref()?, url.as_deref()?))
    } else {
        None
    }
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unconfigured() {
        let config = SpeechConfig::default();
        assert!(config.stt_credentials().is_none());
        assert!(config.tts_credentials().is_none());
        assert!(config.validate(false).is_ok());
    }

    #[test]
    fn test_url_without_key_is_rejected() {
        let config = SpeechConfig {
            tts_url: Some("https://tts.example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(false),
            Err(ValidationError::IncompleteSpeechService("tts"))
        );
    }

    #[test]
    fn test_services_configure_independently() {
        let config = SpeechConfig {
            stt_api_key: Some("k".to_string()),
            stt_url: Some("https://stt.example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(config.stt_credentials(), Some(("k", "https://stt.example.com")));
        assert!(config.tts_credentials().is_none());
    }
}
