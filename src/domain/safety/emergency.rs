//! Emergency phrase detection.
//!
//! The phrase list is a reviewed safety artifact. It is loaded from
//! configuration when present and otherwise defaults to
//! [`DEFAULT_EMERGENCY_PHRASES`].

/// Phrases that route a message straight to the emergency reply.
pub const DEFAULT_EMERGENCY_PHRASES: &[&str] = &[
    "chest pain",
    "can't breathe",
    "cannot breathe",
    "heart attack",
    "stroke",
    "unconscious",
    "severe bleeding",
    "suicide",
    "overdose",
    "choking",
    "seizure",
    "not breathing",
    "dying",
    "emergency",
    "passing out",
    "numbness face",
    "slurred speech",
    "severe head",
];

/// Case-insensitive substring matcher over an emergency allowlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyDetector {
    phrases: Vec<String>,
}

impl EmergencyDetector {
    /// Builds a detector from the given phrases. Blank entries are ignored.
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| fold_case(p.as_ref().trim()))
            .filter(|p| !p.is_empty())
            .collect();
        Self { phrases }
    }

    /// True when any phrase occurs anywhere in `text`.
    pub fn is_emergency(&self, text: &str) -> bool {
        let folded = fold_case(text);
        self.phrases.iter().any(|p| folded.contains(p.as_str()))
    }

    /// The first phrase found in `text`, for logging.
    pub fn matched_phrase(&self, text: &str) -> Option<&str> {
        let folded = fold_case(text);
        self.phrases
            .iter()
            .find(|p| folded.contains(p.as_str()))
            .map(String::as_str)
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

impl Default for EmergencyDetector {
    fn default() -> Self {
        Self::from_phrases(DEFAULT_EMERGENCY_PHRASES)
    }
}

/// Per-character lowercase folding. Unlike `str::to_lowercase` it has no
/// context rules, so appending text never changes the folded prefix.
/// Typographic apostrophes fold to `'`.
fn fold_case(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '\u{02BC}' => '\'',
            c => c,
        })
        .flat_map(char::to_lowercase)
        .collect()
}
