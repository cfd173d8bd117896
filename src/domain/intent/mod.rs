//! Intent routing rules.
//!
//! Intents are derived per message from NLU keyword and category signals.
//! The rules are ordered and biased toward triage: anything ambiguous is a
//! symptom description.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the user is trying to do with a free-text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    #[default]
    SymptomDescription,
    HelpRequest,
    Question,
    ConversationEnd,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SymptomDescription => "symptom_description",
            Self::HelpRequest => "help_request",
            Self::Question => "question",
            Self::ConversationEnd => "conversation_end",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const HELP_MARKERS: &[&str] = &["help", "assist"];
const HEALTH_CATEGORY_MARKERS: &[&str] = &["health", "medicine"];
const FAREWELL_MARKERS: &[&str] = &["thank", "bye"];
const QUESTION_MARKERS: &[&str] = &["?", "what", "how"];

/// Applies the ordered routing rules.
///
/// 1. help/assist keyword: `HelpRequest`
/// 2. health or medicine category: `SymptomDescription`
/// 3. thank/bye keyword: `ConversationEnd`
/// 4. question marker in keywords, or `?` in the text: `Question`
/// 5. otherwise `SymptomDescription`
pub fn infer_intent(keywords: &[String], categories: &[String], text: &str) -> Intent {
    let keyword_text = keywords.join(" ").to_lowercase();
    let has = |markers: &[&str]| markers.iter().any(|m| keyword_text.contains(m));

    if has(HELP_MARKERS) {
        return Intent::HelpRequest;
    }

    let health_category = categories.iter().any(|label| {
        let label = label.to_lowercase();
        HEALTH_CATEGORY_MARKERS.iter().any(|m| label.contains(m))
    });
    if health_category {
        return Intent::SymptomDescription;
    }

    if has(FAREWELL_MARKERS) {
        return Intent::ConversationEnd;
    }

    if has(QUESTION_MARKERS) || text.contains('?') {
        return Intent::Question;
    }

    Intent::SymptomDescription
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn help_keyword_wins_over_everything() {
        let intent = infer_intent(&kw(&["help", "bye"]), &kw(&["/health and fitness"]), "");
        assert_eq!(intent, Intent::HelpRequest);
    }

    #[test]
    fn health_category_is_symptom_description() {
        let intent = infer_intent(&kw(&["thanks"]), &kw(&["/Health and Fitness/disease"]), "");
        assert_eq!(intent, Intent::SymptomDescription);
    }

    #[test]
    fn farewell_is_conversation_end() {
        assert_eq!(infer_intent(&kw(&["Thank you"]), &[], "thank you"), Intent::ConversationEnd);
        assert_eq!(infer_intent(&kw(&["bye"]), &[], "bye"), Intent::ConversationEnd);
    }

    #[test]
    fn question_marker_in_text_is_question() {
        assert_eq!(infer_intent(&[], &[], "is that normal?"), Intent::Question);
        assert_eq!(infer_intent(&kw(&["how long"]), &[], "how long"), Intent::Question);
    }

    #[test]
    fn default_is_symptom_description() {
        assert_eq!(infer_intent(&kw(&["headache"]), &[], "headache"), Intent::SymptomDescription);
        assert_eq!(infer_intent(&[], &[], ""), Intent::SymptomDescription);
    }

    #[test]
    fn intent_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Intent::ConversationEnd).unwrap(),
            "\"conversation_end\""
        );
    }
}
