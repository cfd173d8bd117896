//! Triage behaviour configuration
//!
//! Store limits, the gathering/assessing threshold, and the safety and
//! command word lists. Word lists are comma-separated so they can be
//! reviewed and extended from the environment without a code change.

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::{EngineConfig, DEFAULT_HISTORY_WINDOW};
use crate::domain::conversation::DEFAULT_MAX_MESSAGES;
use crate::domain::safety::{CommandClassifier, CommandVocabulary, EmergencyDetector};
use crate::domain::triage::DEFAULT_ASSESSMENT_THRESHOLD;
use crate::ports::GenerationParams;

#[derive(Debug, Clone, Deserialize)]
pub struct TriageConfig {
    /// Idle time after which a conversation is forgotten
    #[serde(default = "default_ttl")]
    pub conversation_ttl_secs: u64,

    /// Messages kept per conversation
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,

    /// Messages included in each prompt
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// User turns before a full assessment is requested
    #[serde(default = "default_threshold")]
    pub assessment_threshold: usize,

    /// Replaces the built-in emergency allowlist
    pub emergency_phrases: Option<String>,

    pub welcome_words: Option<String>,
    pub help_words: Option<String>,
    pub reset_words: Option<String>,
    pub more_details_words: Option<String>,
    pub remedies_words: Option<String>,
}

impl TriageConfig {
    /// Interval for the background sweep task
    pub fn sweep_interval_secs(&self) -> u64 {
        (self.conversation_ttl_secs / 4).max(1)
    }

    pub fn emergency_detector(&self) -> EmergencyDetector {
        match split_list(&self.emergency_phrases) {
            Some(phrases) => EmergencyDetector::from_phrases(phrases),
            None => EmergencyDetector::default(),
        }
    }

    pub fn command_classifier(&self) -> CommandClassifier {
        let defaults = CommandVocabulary::default();
        CommandClassifier::new(CommandVocabulary {
            welcome: split_list(&self.welcome_words).unwrap_or(defaults.welcome),
            help: split_list(&self.help_words).unwrap_or(defaults.help),
            reset: split_list(&self.reset_words).unwrap_or(defaults.reset),
            more_details: split_list(&self.more_details_words).unwrap_or(defaults.more_details),
            remedies: split_list(&self.remedies_words).unwrap_or(defaults.remedies),
        })
    }

    pub fn engine_config(&self, params: GenerationParams) -> EngineConfig {
        EngineConfig {
            assessment_threshold: self.assessment_threshold,
            history_window: self.history_window,
            params,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.conversation_ttl_secs == 0 {
            return Err(ValidationError::InvalidTriageSetting("conversation_ttl_secs"));
        }
        if self.max_messages == 0 {
            return Err(ValidationError::InvalidTriageSetting("max_messages"));
        }
        if self.history_window == 0 || self.history_window > self.max_messages {
            return Err(ValidationError::InvalidTriageSetting("history_window"));
        }
        if self.assessment_threshold == 0 {
            return Err(ValidationError::InvalidTriageSetting("assessment_threshold"));
        }
        if self.emergency_phrases.is_some() && split_list(&self.emergency_phrases).is_none() {
            return Err(ValidationError::EmptyEmergencyPhrases);
        }
        Ok(())
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            conversation_ttl_secs: default_ttl(),
            max_messages: default_max_messages(),
            history_window: default_history_window(),
            assessment_threshold: default_threshold(),
            emergency_phrases: None,
            welcome_words: None,
            help_words: None,
            reset_words: None,
            more_details_words: None,
            remedies_words: None,
        }
    }
}

/// Splits a comma-separated list, lowercased. `None` when nothing remains.
fn split_list(value: &Option<String>) -> Option<Vec<String>> {
    let items: Vec<String> = value
        .as_deref()?
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    (!items.is_empty()).then_some(items)
}

fn default_ttl() -> u64 {
    3600
}

fn default_max_messages() -> usize {
    DEFAULT_MAX_MESSAGES
}

fn default_history_window() -> usize {
    DEFAULT_HISTORY_WINDOW
}

fn default_threshold() -> usize {
    DEFAULT_ASSESSMENT_THRESHOLD
}
