//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid URL for {0}: must start with http:// or https://")]
    InvalidUrl(&'static str),

    #[error("{0} must use HTTPS in production")]
    UrlMustBeHttps(&'static str),

    #[error("Generation parameter out of range: {0}")]
    InvalidGenerationParameter(&'static str),

    #[error("Speech service {0} has a URL but no API key")]
    IncompleteSpeechService(&'static str),

    #[error("Twilio account_sid and auth_token must be set together")]
    IncompleteTwilioCredentials,

    #[error("Invalid triage setting: {0}")]
    InvalidTriageSetting(&'static str),

    #[error("Emergency phrase list is empty")]
    EmptyEmergencyPhrases,
}
