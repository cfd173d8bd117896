//! Mock NLU analyzer for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{NluAnalysis, NluAnalyzer, NluError};

/// Returns queued analyses (or errors) in order, then empty analyses.
#[derive(Debug, Clone, Default)]
pub struct MockNluAnalyzer {
    responses: Arc<Mutex<VecDeque<Result<NluAnalysis, NluError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockNluAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analysis(self, analysis: NluAnalysis) -> Self {
        lock(&self.responses).push_back(Ok(analysis));
        self
    }

    /// Convenience for an analysis carrying only keywords.
    pub fn with_keywords(self, keywords: &[&str]) -> Self {
        self.with_analysis(NluAnalysis {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            ..NluAnalysis::default()
        })
    }

    pub fn with_error(self, error: NluError) -> Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn get_calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl NluAnalyzer for MockNluAnalyzer {
    async fn analyze(&self, text: &str) -> Result<NluAnalysis, NluError> {
        lock(&self.calls).push(text.to_string());
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Ok(NluAnalysis::default()))
    }
}
