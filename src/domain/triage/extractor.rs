//! Structured-output extraction from raw model text.
//!
//! Models wrap their JSON in prose, code fences or both. The extractor scans
//! for the first balanced `{...}` span, parses it, checks which contract shape
//! it matches and coerces the fields into a typed result. Anything that does
//! not fit is rebuilt as a degraded result for the current phase.

use serde_json::{Map, Value};
use thiserror::Error;

use super::assessment::{
    Assessment, ChatReply, Degraded, TriageOutcome, UrgencyLevel, DEFAULT_DISCLAIMER,
    GATHERING_FALLBACK_REPLY,
};
use super::phase::TriagePhase;

/// Maximum length for individual string fields in extracted data, in characters.
pub const MAX_FIELD_LENGTH: usize = 10_000;

/// Errors that can occur during extraction. Always recovered by [`TriageExtractor::extract`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("No balanced JSON object in model output")]
    NoJsonObject,

    #[error("JSON parse error: {0}")]
    ParseError(String),

    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Returns the first complete, balanced `{...}` span in `text`.
///
/// Braces inside JSON string literals (including escaped quotes) do not count
/// towards depth.
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extracts the first balanced JSON object from `text` and parses it.
pub fn extract_json_object(text: &str) -> Result<Value, ExtractionError> {
    let candidate = first_balanced_object(text).ok_or(ExtractionError::NoJsonObject)?;
    serde_json::from_str(candidate).map_err(|e| ExtractionError::ParseError(e.to_string()))
}

/// Turns model output into a [`TriageOutcome`].
#[derive(Debug, Clone, Default)]
pub struct TriageExtractor;

impl TriageExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts a typed result, falling back to a degraded one on any failure.
    pub fn extract(&self, raw: &str, phase: TriagePhase) -> TriageOutcome {
        match self.try_extract(raw) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    "Model output did not match contract ({}), {} bytes recovered as degraded {:?} result",
                    e,
                    raw.len(),
                    phase
                );
                Self::degraded(raw, phase)
            }
        }
    }

    /// Extracts a typed result or reports why the output was rejected.
    ///
    /// # Shape rules
    /// 1. `{"type":"chat","reply":...}` with a non-empty reply is a chat reply
    /// 2. an object under `data` is an assessment
    /// 3. a top-level object carrying `analysis` is an assessment
    /// 4. any other non-empty `reply` is a chat reply
    pub fn try_extract(&self, raw: &str) -> Result<TriageOutcome, ExtractionError> {
        let value = extract_json_object(raw)?;
        let obj = value
            .as_object()
            .ok_or_else(|| ExtractionError::SchemaValidation("not an object".to_string()))?;

        let declared = obj
            .get("type")
            .and_then(Value::as_str)
            .map(|t| t.trim().to_ascii_lowercase());
        let reply = obj
            .get("reply")
            .and_then(Value::as_str)
            .map(|r| clean_text(r).trim().to_string())
            .filter(|r| !r.is_empty());

        if declared.as_deref() == Some("chat") {
            if let Some(reply) = reply {
                return Ok(TriageOutcome::Chat(ChatReply::new(reply)));
            }
        }

        if let Some(data) = obj.get("data").and_then(Value::as_object) {
            return assessment_from(data).map(TriageOutcome::Assessment);
        }

        if obj.contains_key("analysis") {
            return assessment_from(obj).map(TriageOutcome::Assessment);
        }

        match reply {
            Some(reply) => Ok(TriageOutcome::Chat(ChatReply::new(reply))),
            None => Err(ExtractionError::SchemaValidation(
                "expected reply, data or analysis".to_string(),
            )),
        }
    }

    /// Deterministic stand-in for the given phase.
    pub fn degraded(raw: &str, phase: TriagePhase) -> TriageOutcome {
        match phase {
            TriagePhase::Gathering => {
                TriageOutcome::Degraded(Degraded::Chat(ChatReply::new(GATHERING_FALLBACK_REPLY)))
            }
            TriagePhase::Assessing => {
                TriageOutcome::Degraded(Degraded::Assessment(Assessment::degraded(raw)))
            }
        }
    }
}

fn assessment_from(data: &Map<String, Value>) -> Result<Assessment, ExtractionError> {
    let analysis = data
        .get("analysis")
        .and_then(Value::as_str)
        .map(clean_text)
        .ok_or_else(|| ExtractionError::MissingField("analysis".to_string()))?;

    let urgency_level = data
        .get("urgency_level")
        .and_then(Value::as_str)
        .map(UrgencyLevel::from_label)
        .unwrap_or(UrgencyLevel::Medium);

    let disclaimer = data
        .get("disclaimer")
        .and_then(Value::as_str)
        .map(clean_text)
        .unwrap_or_else(|| DEFAULT_DISCLAIMER.to_string());

    Ok(Assessment {
        analysis,
        probable_causes: string_list(data.get("probable_causes")),
        urgency_level,
        home_remedies: string_list(data.get("home_remedies")),
        medical_advice: data
            .get("medical_advice")
            .and_then(Value::as_str)
            .map(clean_text)
            .unwrap_or_default(),
        disclaimer,
    })
}

/// Missing or null lists are empty; a bare string is a one-item list.
fn string_list(value: Option<&Value>) -> Vec<String> {
    let items: Vec<&Value> = match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(v @ Value::String(_)) => vec![v],
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(clean_text(s)),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

/// Drops control characters other than newlines/tabs and caps length.
fn clean_text(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .take(MAX_FIELD_LENGTH)
        .collect();
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn extractor() -> TriageExtractor {
        TriageExtractor::new()
    }

    mod balanced {
        use super::*;

        #[test]
        fn finds_object_inside_prose() {
            let text = r#"Sure! Here it is: {"reply":"ok"} hope that helps {"x":1}"#;
            assert_eq!(first_balanced_object(text), Some(r#"{"reply":"ok"}"#));
        }

        #[test]
        fn handles_nested_objects() {
            let text = r#"xx {"a":{"b":{"c":1}},"d":2} yy"#;
            assert_eq!(first_balanced_object(text), Some(r#"{"a":{"b":{"c":1}},"d":2}"#));
        }

        #[test]
        fn ignores_braces_inside_strings() {
            let text = r#"{"reply":"use {curly} and \"quoted }\" text"} tail"#;
            assert_eq!(
                first_balanced_object(text),
                Some(r#"{"reply":"use {curly} and \"quoted }\" text"}"#)
            );
        }

        #[test]
        fn handles_multibyte_prefix() {
            let text = "🩺 Résumé: {\"reply\":\"naïve\"}";
            assert_eq!(first_balanced_object(text), Some("{\"reply\":\"naïve\"}"));
        }

        #[test]
        fn unbalanced_returns_none() {
            assert_eq!(first_balanced_object(r#"{"reply":"never closed""#), None);
            assert_eq!(first_balanced_object("no braces at all"), None);
        }
    }

    mod shapes {
        use super::*;

        #[test]
        fn fenced_chat_reply_is_extracted() {
            let raw = "Sure! ```json\n{\"type\":\"chat\",\"reply\":\"tell me more\"}\n```";
            assert_eq!(
                extractor().extract(raw, TriagePhase::Gathering),
                TriageOutcome::Chat(ChatReply::new("tell me more"))
            );
        }

        #[test]
        fn wrapped_assessment_is_extracted() {
            let raw = r#"{"type":"assessment","data":{
                "analysis":"Likely a tension headache.",
                "probable_causes":["Stress","Dehydration"],
                "urgency_level":"Low",
                "home_remedies":["Rest","Drink water"],
                "medical_advice":"See a doctor if it persists.",
                "disclaimer":"Not a diagnosis."}}"#;
            let outcome = extractor().extract(raw, TriagePhase::Assessing);
            let a = outcome.assessment().unwrap();
            assert!(!outcome.is_degraded());
            assert_eq!(a.analysis, "Likely a tension headache.");
            assert_eq!(a.probable_causes, vec!["Stress", "Dehydration"]);
            assert_eq!(a.urgency_level, UrgencyLevel::Low);
            assert_eq!(a.home_remedies.len(), 2);
            assert_eq!(a.disclaimer, "Not a diagnosis.");
        }

        #[test]
        fn top_level_assessment_fields_are_accepted() {
            let raw = r#"{"analysis":"Seasonal allergies.","urgency_level":"low"}"#;
            let a = extractor().try_extract(raw).unwrap();
            assert_eq!(a.assessment().unwrap().analysis, "Seasonal allergies.");
        }

        #[test]
        fn missing_lists_become_empty() {
            let raw = r#"{"type":"assessment","data":{"analysis":"Viral cold.","urgency_level":"Low","medical_advice":"Rest."}}"#;
            let outcome = extractor().try_extract(raw).unwrap();
            let a = outcome.assessment().unwrap();
            assert!(a.probable_causes.is_empty());
            assert!(a.home_remedies.is_empty());
            assert_eq!(a.disclaimer, DEFAULT_DISCLAIMER);
        }

        #[test]
        fn unknown_urgency_coerces_to_medium() {
            let raw = r#"{"data":{"analysis":"Flu.","urgency_level":"critical-ish"}}"#;
            let outcome = extractor().try_extract(raw).unwrap();
            assert_eq!(outcome.assessment().unwrap().urgency_level, UrgencyLevel::Medium);
        }

        #[test]
        fn bare_string_list_is_single_item() {
            let raw = r#"{"data":{"analysis":"Flu.","home_remedies":"Rest well"}}"#;
            let outcome = extractor().try_extract(raw).unwrap();
            assert_eq!(outcome.assessment().unwrap().home_remedies, vec!["Rest well"]);
        }

        #[test]
        fn empty_analysis_keeps_parsed_urgency_and_fields() {
            let raw = r#"{"type":"assessment","data":{
                "analysis":"",
                "probable_causes":["Flu"],
                "urgency_level":"High",
                "home_remedies":["Fluids"],
                "medical_advice":"See a doctor within 24 hours.",
                "disclaimer":"Not a diagnosis."}}"#;
            let outcome = extractor().extract(raw, TriagePhase::Assessing);
            assert!(!outcome.is_degraded());
            let a = outcome.assessment().unwrap();
            assert_eq!(a.analysis, "");
            assert_eq!(a.urgency_level, UrgencyLevel::High);
            assert_eq!(a.probable_causes, vec!["Flu"]);
            assert_eq!(a.disclaimer, "Not a diagnosis.");
        }

        #[test]
        fn non_string_analysis_is_rejected() {
            let raw = r#"{"data":{"analysis":42,"urgency_level":"High"}}"#;
            assert_eq!(
                extractor().try_extract(raw),
                Err(ExtractionError::MissingField("analysis".to_string()))
            );
        }

        #[test]
        fn present_fields_are_kept_as_sent() {
            let raw = r#"{"data":{"analysis":"  Tension headache.","probable_causes":["Stress",""],"disclaimer":""}}"#;
            let outcome = extractor().try_extract(raw).unwrap();
            let a = outcome.assessment().unwrap();
            assert_eq!(a.analysis, "  Tension headache.");
            assert_eq!(a.probable_causes, vec!["Stress", ""]);
            assert_eq!(a.disclaimer, "");
        }

        #[test]
        fn declared_assessment_without_fields_is_rejected() {
            let raw = r#"{"type":"assessment","data":{"urgency_level":"High"}}"#;
            assert_eq!(
                extractor().try_extract(raw),
                Err(ExtractionError::MissingField("analysis".to_string()))
            );
        }

        #[test]
        fn chat_type_without_reply_is_rejected() {
            let raw = r#"{"type":"chat"}"#;
            assert!(matches!(
                extractor().try_extract(raw),
                Err(ExtractionError::SchemaValidation(_))
            ));
        }

        #[test]
        fn reply_without_type_is_chat() {
            let raw = r#"{"reply":"How long has this lasted?"}"#;
            let outcome = extractor().try_extract(raw).unwrap();
            assert_eq!(outcome.chat_reply().unwrap().reply, "How long has this lasted?");
        }

        #[test]
        fn control_characters_are_stripped() {
            let raw = "{\"reply\":\"  line one\\u0007\\nline two  \"}";
            let outcome = extractor().try_extract(raw).unwrap();
            assert_eq!(outcome.chat_reply().unwrap().reply, "line one\nline two");
        }
    }

    mod fallback {
        use super::*;

        #[test]
        fn prose_without_braces_gathering_yields_fixed_reply() {
            let outcome = extractor().extract("I think you should rest.", TriagePhase::Gathering);
            assert_eq!(
                outcome,
                TriageOutcome::Degraded(Degraded::Chat(ChatReply::new(GATHERING_FALLBACK_REPLY)))
            );
        }

        #[test]
        fn prose_without_braces_assessing_yields_degraded_assessment() {
            let raw = "You probably have a cold. Rest.";
            let outcome = extractor().extract(raw, TriagePhase::Assessing);
            assert!(outcome.is_degraded());
            let a = outcome.assessment().unwrap();
            assert_eq!(a.analysis, raw);
            assert_eq!(a.urgency_level, UrgencyLevel::Medium);
            assert!(a.probable_causes.is_empty());
        }

        #[test]
        fn malformed_json_is_recovered() {
            let outcome = extractor().extract("{\"reply\": oops}", TriagePhase::Gathering);
            assert!(outcome.is_degraded());
        }

        #[test]
        fn json_array_is_recovered() {
            let outcome = extractor().extract("[1, 2, 3]", TriagePhase::Assessing);
            assert!(outcome.is_degraded());
        }
    }

    fn arb_text() -> impl Strategy<Value = String> {
        "[ -~]{0,40}"
    }

    fn arb_prose() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,!?:\\n`]{0,60}"
    }

    proptest! {
        #[test]
        fn embedded_assessment_round_trips(
            prefix in arb_prose(),
            suffix in arb_prose(),
            analysis in arb_text(),
            causes in proptest::collection::vec(arb_text(), 0..4),
            level in 0usize..4,
            remedies in proptest::collection::vec(arb_text(), 0..4),
            advice in arb_text(),
            disclaimer in arb_text(),
        ) {
            let embedded = serde_json::json!({
                "type": "assessment",
                "data": {
                    "analysis": analysis,
                    "probable_causes": causes,
                    "urgency_level": UrgencyLevel::ALL[level].as_str(),
                    "home_remedies": remedies,
                    "medical_advice": advice,
                    "disclaimer": disclaimer,
                }
            });
            let raw = format!("{}{}{}", prefix, embedded, suffix);
            let recovered = extract_json_object(&raw).unwrap();
            prop_assert_eq!(recovered, embedded);

            let expected = Assessment {
                analysis,
                probable_causes: causes,
                urgency_level: UrgencyLevel::ALL[level],
                home_remedies: remedies,
                medical_advice: advice,
                disclaimer,
            };
            prop_assert_eq!(
                extractor().extract(&raw, TriagePhase::Assessing),
                TriageOutcome::Assessment(expected)
            );
        }
    }
}
