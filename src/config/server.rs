//! HTTP listener settings

use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Listener, environment and request handling settings.
///
/// The request timeout bounds the whole inbound pipeline, model call
/// included, so it must exceed `watsonx.timeout_secs` to be useful.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// `EnvFilter` directive; `RUST_LOG` wins when set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Comma-separated browser origins for the web chat
    pub cors_origins: Option<String>,
}

/// Deployment environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Any origin may call the API: development without an explicit list.
    pub fn allows_any_origin(&self) -> bool {
        self.environment == Environment::Development && self.cors_origins.is_none()
    }

    /// Configured origins, blanks dropped
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,triage_assistant=debug,tower_http=debug".to_string()
}

fn default_request_timeout() -> u64 {
    90
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_env(environment: Environment, cors_origins: Option<&str>) -> ServerConfig {
        ServerConfig {
            environment,
            cors_origins: cors_origins.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_listen_on_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert!(config.request_timeout() > Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unparseable_host_is_an_error() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn development_without_origins_is_permissive() {
        assert!(with_env(Environment::Development, None).allows_any_origin());
        assert!(!with_env(Environment::Development, Some("http://localhost:5173")).allows_any_origin());
        assert!(!with_env(Environment::Staging, None).allows_any_origin());
        assert!(!with_env(Environment::Production, None).allows_any_origin());
    }

    #[test]
    fn origin_list_drops_blanks() {
        let config = with_env(Environment::Production, Some(" https://a.example, ,https://b.example"));
        assert_eq!(
            config.cors_origins_list(),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(with_env(Environment::Production, None).cors_origins_list().is_empty());
    }

    #[test]
    fn port_and_timeout_are_bounded() {
        let zero_port = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(zero_port.validate(), Err(ValidationError::InvalidPort));

        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
        }
    }
}
