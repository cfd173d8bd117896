//! Display-language detection from message text.
//!
//! Cheap script and marker-word checks used when a channel does not tell us
//! which language the user is writing in.

/// Language label used when nothing else matches.
pub const DEFAULT_LANGUAGE: &str = "English";

const SPANISH_MARKERS: &[&str] = &["hola", "tengo", "dolor", "fiebre", "cabeza", "estómago"];

/// Script ranges checked, in order, when labelling a transcript.
const SCRIPT_RANGES: &[(&str, &[(char, char)])] = &[
    ("Hindi", &[('\u{0900}', '\u{097F}')]),
    ("Chinese", &[('\u{4E00}', '\u{9FFF}')]),
    ("Japanese", &[('\u{3040}', '\u{309F}'), ('\u{30A0}', '\u{30FF}')]),
    ("Korean", &[('\u{AC00}', '\u{D7AF}')]),
    ("Arabic", &[('\u{0600}', '\u{06FF}')]),
];

/// Guesses the display language of a chat message.
///
/// Devanagari text is Hindi, a handful of Spanish symptom words mark Spanish,
/// everything else is English.
pub fn detect_language(text: &str) -> &'static str {
    if contains_script(text, &[('\u{0900}', '\u{097F}')]) {
        return "Hindi";
    }
    let lower = text.to_lowercase();
    let has_spanish_word = lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| SPANISH_MARKERS.contains(&word));
    if has_spanish_word {
        return "Spanish";
    }
    DEFAULT_LANGUAGE
}

/// Labels a transcript by script, keeping `fallback` for Latin text.
pub fn detect_script_language<'a>(text: &str, fallback: &'a str) -> &'a str {
    SCRIPT_RANGES
        .iter()
        .find(|(_, ranges)| contains_script(text, ranges))
        .map(|(language, _)| *language)
        .unwrap_or(fallback)
}

fn contains_script(text: &str, ranges: &[(char, char)]) -> bool {
    text.chars()
        .any(|c| ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(&c)))
}
