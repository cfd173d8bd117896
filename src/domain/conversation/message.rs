//! Message entity for conversations.
//!
//! Messages are immutable records of user/assistant exchanges. User messages
//! may carry the NLU annotation computed when they arrived.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// End-user input.
    User,
    /// Assistant reply.
    Assistant,
}

impl Role {
    /// Speaker label used when rendering history into a prompt.
    pub fn speaker_label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

/// Document-level sentiment reported by the NLU collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// Parses a collaborator label; anything unrecognised is neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            _ => Self::Neutral,
        }
    }
}

/// A named entity found in a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl Entity {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
        }
    }
}

/// NLU signals attached to a user message before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NluAnnotation {
    /// Keywords in collaborator relevance order.
    pub keywords: Vec<String>,
    /// Distinct entities; duplicates are dropped on insert.
    pub entities: Vec<Entity>,
    pub sentiment: Sentiment,
}

impl NluAnnotation {
    /// Builds an annotation, de-duplicating entities while keeping first-seen order.
    pub fn new(keywords: Vec<String>, entities: Vec<Entity>, sentiment: Sentiment) -> Self {
        let mut unique: Vec<Entity> = Vec::with_capacity(entities.len());
        for entity in entities {
            if !unique.contains(&entity) {
                unique.push(entity);
            }
        }
        Self {
            keywords,
            entities: unique,
            sentiment,
        }
    }

    /// Returns true when the annotation carries no signal at all.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.entities.is_empty()
    }
}

/// An immutable message within a conversation.
///
/// # Invariants
///
/// - `content` is non-empty after trimming (validated at construction)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nlu: Option<NluAnnotation>,
}

impl Message {
    /// Creates a new message with the given role and content.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if content is blank
    pub fn new(role: Role, content: impl Into<String>) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        Ok(Self {
            role,
            content,
            nlu: None,
        })
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Role::Assistant, content)
    }

    /// Attaches an NLU annotation.
    pub fn with_nlu(mut self, nlu: NluAnnotation) -> Self {
        self.nlu = Some(nlu);
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn nlu(&self) -> Option<&NluAnnotation> {
        self.nlu.as_ref()
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_rejects_blank_content() {
        assert!(Message::user("").is_err());
        assert!(Message::assistant("  \n").is_err());
    }

    #[test]
    fn message_keeps_content_verbatim() {
        let msg = Message::user("  I have a headache ").unwrap();
        assert_eq!(msg.content(), "  I have a headache ");
        assert_eq!(msg.role(), Role::User);
        assert!(msg.nlu().is_none());
    }

    #[test]
    fn annotation_deduplicates_entities() {
        let nlu = NluAnnotation::new(
            vec!["headache".into()],
            vec![
                Entity::new("Symptom", "headache"),
                Entity::new("Symptom", "headache"),
                Entity::new("Duration", "2 days"),
            ],
            Sentiment::Negative,
        );
        assert_eq!(nlu.entities.len(), 2);
        assert_eq!(nlu.entities[1].text, "2 days");
    }

    #[test]
    fn sentiment_from_label_defaults_to_neutral() {
        assert_eq!(Sentiment::from_label("POSITIVE"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("negative"), Sentiment::Negative);
        assert_eq!(Sentiment::from_label("mixed"), Sentiment::Neutral);
    }

    #[test]
    fn entity_serializes_kind_as_type() {
        let json = serde_json::to_value(Entity::new("Location", "Pune")).unwrap();
        assert_eq!(json["type"], "Location");
    }
}
