//! Assessment Engine.
//!
//! Decides between gathering and assessing, builds a bounded prompt, calls the
//! text generator once and recovers a typed result from whatever comes back.
//! Parse failures are recovered into degraded results here; generator
//! failures propagate as [`EngineError`].

use std::sync::Arc;
use thiserror::Error;

use crate::domain::conversation::Message;
use crate::domain::triage::{
    Degraded, PromptBuilder, TriageExtractor, TriageOutcome, TriagePhase, UrgencyLevel,
    DEFAULT_ASSESSMENT_THRESHOLD,
};
use crate::ports::{GenerationError, GenerationParams, TextGenerator};

/// Most recent messages included in a prompt.
pub const DEFAULT_HISTORY_WINDOW: usize = 6;

/// Generator failures surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("model timed out after {timeout_secs}s")]
    ModelTimeout { timeout_secs: u32 },
}

impl From<GenerationError> for EngineError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Timeout { timeout_secs } => EngineError::ModelTimeout { timeout_secs },
            other => EngineError::ModelUnavailable(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// User turns in the window before a full assessment is requested.
    pub assessment_threshold: usize,
    /// Messages from the end of the history included in the prompt.
    pub history_window: usize,
    pub params: GenerationParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            assessment_threshold: DEFAULT_ASSESSMENT_THRESHOLD,
            history_window: DEFAULT_HISTORY_WINDOW,
            params: GenerationParams::default(),
        }
    }
}

pub struct AssessmentEngine {
    generator: Arc<dyn TextGenerator>,
    prompts: PromptBuilder,
    extractor: TriageExtractor,
    config: EngineConfig,
}

impl AssessmentEngine {
    pub fn new(generator: Arc<dyn TextGenerator>, config: EngineConfig) -> Self {
        Self {
            generator,
            prompts: PromptBuilder::new(),
            extractor: TriageExtractor::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Phase for this history, counting user turns inside the recency window.
    pub fn phase_for(&self, history: &[Message], emergency: bool) -> TriagePhase {
        let window = self.window(history);
        let user_turns = window.iter().filter(|m| m.is_user()).count();
        TriagePhase::decide(user_turns, self.config.assessment_threshold, emergency)
    }

    fn window<'a>(&self, history: &'a [Message]) -> &'a [Message] {
        let start = history.len().saturating_sub(self.config.history_window);
        &history[start..]
    }

    /// Analyzes the conversation so far.
    ///
    /// `history` includes the message being answered. With `emergency` set,
    /// the engine always asks for an assessment and forces its urgency to
    /// `Emergency`.
    ///
    /// # Errors
    ///
    /// `ModelUnavailable` / `ModelTimeout` when the generator fails. Output
    /// that cannot be parsed never errors; it yields a degraded result.
    pub async fn analyze(
        &self,
        history: &[Message],
        language: &str,
        emergency: bool,
    ) -> Result<TriageOutcome, EngineError> {
        let window = self.window(history);
        let phase = self.phase_for(history, emergency);
        let prompt = self.prompts.build(window, language, phase);

        tracing::debug!(?phase, messages = window.len(), language, "Calling text generator");
        let raw = self.generator.generate(&prompt, &self.config.params).await?;

        let outcome = self.extractor.extract(&raw, phase);
        Ok(if emergency {
            force_emergency(outcome)
        } else {
            outcome
        })
    }
}

fn force_emergency(outcome: TriageOutcome) -> TriageOutcome {
    match outcome {
        TriageOutcome::Assessment(mut a) => {
            a.urgency_level = UrgencyLevel::Emergency;
            TriageOutcome::Assessment(a)
        }
        TriageOutcome::Degraded(Degraded::Assessment(mut a)) => {
            a.urgency_level = UrgencyLevel::Emergency;
            TriageOutcome::Degraded(Degraded::Assessment(a))
        }
        other => other,
    }
}
