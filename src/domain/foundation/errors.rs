//! Value object construction errors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be blank")]
    EmptyField { field: &'static str },
}

impl ValidationError {
    pub fn empty_field(field: &'static str) -> Self {
        ValidationError::EmptyField { field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_field() {
        let err = ValidationError::empty_field("conversation_id");
        assert_eq!(err.to_string(), "conversation_id must not be blank");
    }
}
