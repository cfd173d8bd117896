//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TRIAGE_ASSISTANT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use triage_assistant::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod error;
mod nlu;
mod server;
mod speech;
mod triage;
mod twilio;
mod watsonx;

pub use error::{ConfigError, ValidationError};
pub use nlu::NluConfig;
pub use server::{Environment, ServerConfig};
pub use speech::SpeechConfig;
pub use triage::TriageConfig;
pub use twilio::TwilioConfig;
pub use watsonx::WatsonxConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Only the `watsonx` section is required; every other collaborator degrades
/// when left unconfigured.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Text generation (watsonx.ai)
    pub watsonx: WatsonxConfig,

    /// Natural language understanding (optional)
    #[serde(default)]
    pub nlu: NluConfig,

    /// Speech-to-text and text-to-speech (optional)
    #[serde(default)]
    pub speech: SpeechConfig,

    /// WhatsApp media downloads (optional)
    #[serde(default)]
    pub twilio: TwilioConfig,

    /// Conversation limits and safety word lists
    #[serde(default)]
    pub triage: TriageConfig,
}

impl AppConfig {
    /// Reads `.env` (when present) and the process environment.
    ///
    /// `TRIAGE_ASSISTANT__WATSONX__API_KEY=...` sets `watsonx.api_key`;
    /// comma-separated lists such as `TRIAGE_ASSISTANT__TRIAGE__EMERGENCY_PHRASES`
    /// stay strings here and are split by [`TriageConfig`].
    ///
    /// # Errors
    ///
    /// `ConfigError::LoadError` when a required value is missing or a value
    /// does not parse into its field type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRIAGE_ASSISTANT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks every section; endpoint URLs must be HTTPS in production.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let production = self.is_production();
        self.server.validate()?;
        self.watsonx.validate(production)?;
        self.nlu.validate(production)?;
        self.speech.validate(production)?;
        self.twilio.validate()?;
        self.triage.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

/// Checks an endpoint URL; production endpoints must use HTTPS.
pub(crate) fn check_url(url: &str, name: &'static str, production: bool) -> Result<(), ValidationError> {
    let url = url.trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidUrl(name));
    }
    if production && !url.starts_with("https://") {
        return Err(ValidationError::UrlMustBeHttps(name));
    }
    Ok(())
}
