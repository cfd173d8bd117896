//! Triage result types: urgency, assessments, chat replies.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Disclaimer used when the model omits one.
pub const DEFAULT_DISCLAIMER: &str = "This is AI-generated health information, not a medical diagnosis. Always consult a healthcare professional for proper medical advice.";

/// Disclaimer attached to assessments rebuilt from unparseable output.
pub const DEGRADED_DISCLAIMER: &str =
    "Could not parse structured data. Please consult a doctor.";

/// Medical advice attached to assessments rebuilt from unparseable output.
pub const DEGRADED_MEDICAL_ADVICE: &str =
    "Please consult a healthcare professional for a proper evaluation.";

/// Reply used when a gathering-phase response cannot be parsed.
pub const GATHERING_FALLBACK_REPLY: &str = "Could you describe your symptoms with more detail?";

/// How soon the user should seek care.
///
/// - `Low`: self-limiting, home care
/// - `Medium`: see a doctor within 2-3 days
/// - `High`: see a doctor within 24 hours
/// - `Emergency`: contact emergency services immediately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Emergency,
}

impl UrgencyLevel {
    pub const ALL: [UrgencyLevel; 4] = [Self::Low, Self::Medium, Self::High, Self::Emergency];

    /// Parses a model-supplied label. Anything outside the four levels is `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "emergency" => Self::Emergency,
            _ => Self::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Emergency => "Emergency",
        }
    }

    /// The care directive for this level, as stated to the model.
    pub fn policy(&self) -> &'static str {
        match self {
            Self::Low => "self-limiting, home care is enough",
            Self::Medium => "see a doctor within 2-3 days",
            Self::High => "see a doctor within 24 hours",
            Self::Emergency => "contact emergency services immediately",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UrgencyLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// Structured triage result. Replaced wholesale, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub analysis: String,
    pub probable_causes: Vec<String>,
    pub urgency_level: UrgencyLevel,
    pub home_remedies: Vec<String>,
    pub medical_advice: String,
    pub disclaimer: String,
}

impl Assessment {
    /// Stand-in built from raw model text that could not be parsed.
    pub fn degraded(raw: impl Into<String>) -> Self {
        Self {
            analysis: raw.into(),
            probable_causes: Vec::new(),
            urgency_level: UrgencyLevel::Medium,
            home_remedies: Vec::new(),
            medical_advice: DEGRADED_MEDICAL_ADVICE.to_string(),
            disclaimer: DEGRADED_DISCLAIMER.to_string(),
        }
    }
}

/// Follow-up message asking for more information before assessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

impl ChatReply {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

/// Safe stand-in returned when model output did not match the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degraded {
    Chat(ChatReply),
    Assessment(Assessment),
}

/// What the assessment engine produced for one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageOutcome {
    Assessment(Assessment),
    Chat(ChatReply),
    Degraded(Degraded),
}

impl TriageOutcome {
    /// The assessment carried by this outcome, degraded or not.
    pub fn assessment(&self) -> Option<&Assessment> {
        match self {
            Self::Assessment(a) | Self::Degraded(Degraded::Assessment(a)) => Some(a),
            _ => None,
        }
    }

    /// The chat reply carried by this outcome, degraded or not.
    pub fn chat_reply(&self) -> Option<&ChatReply> {
        match self {
            Self::Chat(c) | Self::Degraded(Degraded::Chat(c)) => Some(c),
            _ => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}
