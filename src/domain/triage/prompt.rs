//! Prompt construction for the generation collaborator.

use crate::domain::conversation::Message;

use super::assessment::UrgencyLevel;
use super::followup::{follow_up_questions, numbered};
use super::phase::TriagePhase;

/// Number of NLU keywords appended to a rendered user message.
const PROMPT_KEYWORD_LIMIT: usize = 5;

const SAFETY_PREAMBLE: &str = "You are a careful, compassionate health triage assistant. \
You help people understand their symptoms and decide how urgently to seek care. \
You never claim to diagnose. If anything suggests a life-threatening situation \
(chest pain, trouble breathing, stroke signs, heavy bleeding, loss of consciousness, \
thoughts of self-harm, overdose) you skip all questions and return an Emergency assessment.";

const CHAT_CONTRACT: &str = r#"{"type":"chat","reply":"<empathetic acknowledgement followed by one or two short questions>"}"#;

const ASSESSMENT_CONTRACT: &str = r#"{
  "type":"assessment",
  "data":{
    "analysis":"<3-4 sentences explaining what may be happening and why>",
    "probable_causes":["<most likely cause>","<second possibility>","<third possibility>"],
    "urgency_level":"<Low|Medium|High|Emergency>",
    "home_remedies":["<specific actionable step>","<what to avoid>"],
    "medical_advice":"<when to see a doctor, which specialist, warning signs>",
    "disclaimer":"This is AI-generated health information, not a medical diagnosis. Always consult a healthcare professional for proper medical advice."
  }
}"#;

/// Builds the single text prompt sent to the generation collaborator.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Renders preamble, phase directive, language, output contract and history.
    ///
    /// `history` must already be bounded to the recency window.
    pub fn build(&self, history: &[Message], language: &str, phase: TriagePhase) -> String {
        let mut prompt = String::with_capacity(2048);
        prompt.push_str("System: ");
        prompt.push_str(SAFETY_PREAMBLE);
        prompt.push_str("\n\n");
        prompt.push_str(&self.phase_directive(history, phase));
        prompt.push_str("\n\nLanguage: respond entirely in ");
        prompt.push_str(language);
        prompt.push_str(". Every text value in your JSON must be written in ");
        prompt.push_str(language);
        prompt.push_str(".\n\nOUTPUT: return ONLY one JSON object, no markdown, no extra text.\n");

        match phase {
            TriagePhase::Gathering => {
                prompt.push_str("Use this shape:\n");
                prompt.push_str(CHAT_CONTRACT);
            }
            TriagePhase::Assessing => {
                prompt.push_str("Use this shape:\n");
                prompt.push_str(ASSESSMENT_CONTRACT);
            }
        }

        prompt.push_str("\n\nURGENCY LEVELS:\n");
        for level in UrgencyLevel::ALL {
            prompt.push_str(&format!("- {}: {}\n", level, level.policy()));
        }

        prompt.push_str("\nChat History:\n");
        prompt.push_str(&render_history(history));
        prompt.push_str("\n\nAssistant:");
        prompt
    }

    fn phase_directive(&self, history: &[Message], phase: TriagePhase) -> String {
        match phase {
            TriagePhase::Assessing => {
                "The user has given enough information. Provide the full assessment now."
                    .to_string()
            }
            TriagePhase::Gathering => {
                let last_user = history
                    .iter()
                    .rev()
                    .find(|m| m.is_user())
                    .map(|m| m.content())
                    .unwrap_or_default();
                let hints = follow_up_questions(last_user);
                format!(
                    "It is early in the conversation. Ask at most one or two caring follow-up questions, for example:\n{}",
                    numbered(&hints)
                )
            }
        }
    }
}

/// Renders messages as speaker-labelled lines, oldest first.
///
/// User messages that carry NLU keywords get a `[Keywords: ...]` suffix.
pub fn render_history(history: &[Message]) -> String {
    history
        .iter()
        .map(|m| {
            let keywords = m
                .nlu()
                .filter(|_| m.is_user())
                .map(|nlu| &nlu.keywords)
                .filter(|k| !k.is_empty());
            match keywords {
                Some(k) => {
                    let top: Vec<&str> =
                        k.iter().take(PROMPT_KEYWORD_LIMIT).map(String::as_str).collect();
                    format!(
                        "{}: {} [Keywords: {}]",
                        m.role().speaker_label(),
                        m.content(),
                        top.join(", ")
                    )
                }
                None => format!("{}: {}", m.role().speaker_label(), m.content()),
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
