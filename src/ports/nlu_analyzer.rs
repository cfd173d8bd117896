//! NLU Analyzer Port - keyword, entity, sentiment and category extraction.
//!
//! Callers must treat every error as "no signal" and carry on with defaults;
//! NLU downtime never blocks a conversation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::conversation::{Entity, NluAnnotation, Sentiment};

#[async_trait]
pub trait NluAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<NluAnalysis, NluError>;
}

/// Raw analysis returned by the NLU backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NluAnalysis {
    pub keywords: Vec<String>,
    pub entities: Vec<Entity>,
    pub sentiment: Sentiment,
    /// Category labels such as `/health and fitness/disease`.
    pub categories: Vec<String>,
}

impl NluAnalysis {
    /// The part of the analysis stored on the message.
    pub fn annotation(&self) -> NluAnnotation {
        NluAnnotation::new(self.keywords.clone(), self.entities.clone(), self.sentiment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NluError {
    #[error("NLU not configured")]
    NotConfigured,

    #[error("NLU unavailable: {0}")]
    Unavailable(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),
}
