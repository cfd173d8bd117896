//! Intent/NLU adapter: turns an NLU call into an [`Intent`] plus the
//! annotation stored on the user message.

use std::sync::Arc;

use crate::domain::conversation::NluAnnotation;
use crate::domain::intent::{infer_intent, Intent};
use crate::ports::{NluAnalyzer, NluError};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    pub intent: Intent,
    pub annotation: NluAnnotation,
}

pub struct IntentClassifier {
    nlu: Arc<dyn NluAnalyzer>,
}

impl IntentClassifier {
    pub fn new(nlu: Arc<dyn NluAnalyzer>) -> Self {
        Self { nlu }
    }

    /// Classifies `text`. Never fails: NLU errors give a symptom description
    /// with an empty annotation.
    pub async fn classify(&self, text: &str) -> Classification {
        match self.nlu.analyze(text).await {
            Ok(analysis) => Classification {
                intent: infer_intent(&analysis.keywords, &analysis.categories, text),
                annotation: analysis.annotation(),
            },
            Err(NluError::NotConfigured) => Classification::default(),
            Err(e) => {
                tracing::warn!("NLU analysis failed, using defaults: {}", e);
                Classification::default()
            }
        }
    }
}
