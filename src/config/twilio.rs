//! Twilio configuration (voice-note media downloads)

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TwilioConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
}

impl TwilioConfig {
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let sid = self.account_sid.as_deref().filter(|s| !s.trim().is_empty())?;
        let token = self.auth_token.as_deref().filter(|t| !t.trim().is_empty())?;
        Some((sid, token))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let sid = self.account_sid.as_deref().is_some_and(|s| !s.trim().is_empty());
        let token = self.auth_token.as_deref().is_some_and(|t| !t.trim().is_empty());
        if sid != token {
            return Err(ValidationError::IncompleteTwilioCredentials);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_or_neither() {
        assert!(TwilioConfig::default().validate().is_ok());

        let half = TwilioConfig {
            account_sid: Some("AC123".to_string()),
            auth_token: None,
        };
        assert!(half.validate().is_err());

        let full = TwilioConfig {
            account_sid: Some("AC123".to_string()),
            auth_token: Some("secret".to_string()),
        };
        assert!(full.validate().is_ok());
        assert_eq!(full.credentials(), Some(("AC123", "secret")));
    }
}
