//! Command vocabulary and classification.

use serde::{Deserialize, Serialize};

/// A navigational command recognised without any model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Welcome,
    Help,
    Reset,
    /// Shorthand `1`, `2` or `3` referencing the last assessment.
    QuickReply(u8),
    MoreDetails,
    Remedies,
}

/// Word lists for each command. Matching is exact after trimming and lowercasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandVocabulary {
    pub welcome: Vec<String>,
    pub help: Vec<String>,
    pub reset: Vec<String>,
    pub more_details: Vec<String>,
    pub remedies: Vec<String>,
}

impl Default for CommandVocabulary {
    fn default() -> Self {
        Self {
            welcome: words(&["hi", "hello", "start"]),
            help: words(&["help"]),
            reset: words(&["new", "reset", "clear"]),
            more_details: words(&["more", "details", "explain"]),
            remedies: words(&["remedies", "remedy", "treatment"]),
        }
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// Maps inbound text onto a [`Command`].
#[derive(Debug, Clone, Default)]
pub struct CommandClassifier {
    vocabulary: CommandVocabulary,
}

impl CommandClassifier {
    pub fn new(vocabulary: CommandVocabulary) -> Self {
        Self { vocabulary }
    }

    /// Returns the command `text` names, or `None` for free text.
    pub fn classify(&self, text: &str) -> Option<Command> {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        match normalized.as_str() {
            "1" => return Some(Command::QuickReply(1)),
            "2" => return Some(Command::QuickReply(2)),
            "3" => return Some(Command::QuickReply(3)),
            _ => {}
        }

        let v = &self.vocabulary;
        let table: [(&[String], Command); 5] = [
            (&v.welcome, Command::Welcome),
            (&v.help, Command::Help),
            (&v.reset, Command::Reset),
            (&v.more_details, Command::MoreDetails),
            (&v.remedies, Command::Remedies),
        ];
        table
            .iter()
            .find(|(list, _)| list.iter().any(|w| w.trim().to_lowercase() == normalized))
            .map(|(_, command)| *command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Option<Command> {
        CommandClassifier::default().classify(text)
    }

    #[test]
    fn greetings_are_welcome() {
        assert_eq!(classify("hi"), Some(Command::Welcome));
        assert_eq!(classify("  Hello "), Some(Command::Welcome));
        assert_eq!(classify("START"), Some(Command::Welcome));
    }

    #[test]
    fn reset_words_are_recognised() {
        for word in ["new", "reset", "clear"] {
            assert_eq!(classify(word), Some(Command::Reset));
        }
    }

    #[test]
    fn digits_are_quick_replies() {
        assert_eq!(classify("1"), Some(Command::QuickReply(1)));
        assert_eq!(classify(" 3 "), Some(Command::QuickReply(3)));
        assert_eq!(classify("4"), None);
    }

    #[test]
    fn details_and_remedies() {
        assert_eq!(classify("explain"), Some(Command::MoreDetails));
        assert_eq!(classify("Treatment"), Some(Command::Remedies));
    }

    #[test]
    fn matching_is_exact_not_substring() {
        assert_eq!(classify("hi I have a fever"), None);
        assert_eq!(classify("help me with my cough"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn custom_vocabulary_is_used() {
        let vocabulary = CommandVocabulary {
            reset: vec!["borrar".to_string()],
            ..Default::default()
        };
        let classifier = CommandClassifier::new(vocabulary);
        assert_eq!(classifier.classify("Borrar"), Some(Command::Reset));
        assert_eq!(classifier.classify("new"), None);
    }
}
