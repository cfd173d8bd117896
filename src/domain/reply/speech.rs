//! Speech-ready text: the same content as the visual templates with markup removed.

use crate::domain::triage::{Assessment, ChatReply};

/// Something that can be read aloud.
#[derive(Debug, Clone, Copy)]
pub enum Speakable<'a> {
    Assessment(&'a Assessment),
    Chat(&'a ChatReply),
}

/// Builds prose for speech synthesis. No model call involved.
pub fn tts_text(source: Speakable<'_>) -> String {
    match source {
        Speakable::Chat(reply) => strip_markup(&reply.reply),
        Speakable::Assessment(a) => {
            let mut sentences = vec![format!("Analysis: {}", strip_markup(&a.analysis))];
            if !a.probable_causes.is_empty() {
                let causes: Vec<String> = a.probable_causes.iter().map(|c| strip_markup(c)).collect();
                sentences.push(format!("Probable causes include {}", causes.join(", ")));
            }
            sentences.push(format!("Urgency level is {}", a.urgency_level));
            if !a.medical_advice.is_empty() {
                sentences.push(format!("Medical advice: {}", strip_markup(&a.medical_advice)));
            }
            sentences
                .iter()
                .map(|s| s.trim_end_matches('.'))
                .collect::<Vec<_>>()
                .join(". ")
                + "."
        }
    }
}

/// Removes headers, bullets, emphasis markers and rules, joining lines into prose.
pub fn strip_markup(text: &str) -> String {
    let mut pieces: Vec<String> = Vec::new();
    for line in text.lines() {
        let mut line = line.trim();
        if line.is_empty() || line.chars().all(|c| c == '-' || c == '=') {
            continue;
        }
        line = line.trim_start_matches('#').trim_start();
        for bullet in ["• ", "- ", "* ", "> "] {
            if let Some(rest) = line.strip_prefix(bullet) {
                line = rest;
                break;
            }
        }
        let cleaned: String = line
            .chars()
            .filter(|c| !matches!(c, '*' | '_' | '`' | '~'))
            .collect();
        let cleaned = cleaned.trim();
        if !cleaned.is_empty() {
            pieces.push(cleaned.to_string());
        }
    }

    let mut out = String::new();
    for piece in pieces {
        if !out.is_empty() {
            let ends_sentence = out.ends_with(|c: char| matches!(c, '.' | '!' | '?' | ':' | ',' | ';'));
            out.push_str(if ends_sentence { " " } else { ". " });
        }
        out.push_str(&piece);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::triage::UrgencyLevel;

    #[test]
    fn strips_emphasis_and_bullets() {
        let text = "*Home Care:*\n• Rest\n• _Drink_ water\n---\n# Heading";
        assert_eq!(strip_markup(text), "Home Care: Rest. Drink water. Heading");
    }

    #[test]
    fn chat_reply_is_plain_prose() {
        let reply = ChatReply::new("I see. *How long* has it lasted?");
        assert_eq!(tts_text(Speakable::Chat(&reply)), "I see. How long has it lasted?");
    }

    #[test]
    fn assessment_reads_as_sentences() {
        let a = Assessment {
            analysis: "A *tension* headache.".to_string(),
            probable_causes: vec!["Stress".to_string(), "Poor sleep".to_string()],
            urgency_level: UrgencyLevel::Low,
            home_remedies: vec!["Rest".to_string()],
            medical_advice: "See a doctor if it persists.".to_string(),
            disclaimer: "Not a diagnosis.".to_string(),
        };
        assert_eq!(
            tts_text(Speakable::Assessment(&a)),
            "Analysis: A tension headache. Probable causes include Stress, Poor sleep. Urgency level is Low. Medical advice: See a doctor if it persists."
        );
    }
}
