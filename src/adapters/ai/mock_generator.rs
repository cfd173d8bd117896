//! Mock Text Generator for testing.
//!
//! Returns pre-configured responses in order, can inject errors and delays,
//! and records every prompt for verification.
//!
//! # Example
//!
//! ```ignore
//! let generator = MockTextGenerator::new()
//!     .with_response(r#"{"type":"chat","reply":"How long?"}"#);
//!
//! let text = generator.generate("prompt", &GenerationParams::default()).await?;
//! assert_eq!(generator.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GenerationError, GenerationParams, ProviderInfo, TextGenerator};

/// Mock generator for testing.
#[derive(Debug, Clone)]
pub struct MockTextGenerator {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockGeneration>>>,
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Prompts received, in call order.
    calls: Arc<Mutex<Vec<String>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockGeneration {
    Success(String),
    Error(MockGenerationError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockGenerationError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockGenerationError> for GenerationError {
    fn from(err: MockGenerationError) -> Self {
        match err {
            MockGenerationError::RateLimited { retry_after_secs } => {
                GenerationError::rate_limited(retry_after_secs)
            }
            MockGenerationError::Unavailable { message } => GenerationError::unavailable(message),
            MockGenerationError::AuthenticationFailed => GenerationError::AuthenticationFailed,
            MockGenerationError::Network { message } => GenerationError::network(message),
            MockGenerationError::Timeout { timeout_secs } => {
                GenerationError::Timeout { timeout_secs }
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockGeneration::Success(content.into()));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockGenerationError) -> Self {
        lock(&self.responses).push_back(MockGeneration::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this generator.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all prompts received.
    pub fn get_calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    /// Returns the most recent prompt.
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.calls).last().cloned()
    }

    fn next_response(&self) -> MockGeneration {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockGeneration::Success("Mock response".to_string()))
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        lock(&self.calls).push(prompt.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockGeneration::Success(content) => Ok(content),
            MockGeneration::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_configured_responses_in_order() {
        let generator = MockTextGenerator::new()
            .with_response("first")
            .with_response("second");
        let params = GenerationParams::default();

        assert_eq!(generator.generate("a", &params).await.unwrap(), "first");
        assert_eq!(generator.generate("b", &params).await.unwrap(), "second");
        assert_eq!(generator.generate("c", &params).await.unwrap(), "Mock response");
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let generator = MockTextGenerator::new().with_error(MockGenerationError::RateLimited {
            retry_after_secs: 10,
        });

        let result = generator.generate("a", &GenerationParams::default()).await;
        assert!(matches!(
            result,
            Err(GenerationError::RateLimited { retry_after_secs: 10 })
        ));
    }

    #[tokio::test]
    async fn records_prompts() {
        let generator = MockTextGenerator::new();
        let params = GenerationParams::default();
        generator.generate("one", &params).await.unwrap();
        generator.generate("two", &params).await.unwrap();

        assert_eq!(generator.call_count(), 2);
        assert_eq!(generator.get_calls(), vec!["one".to_string(), "two".to_string()]);
        assert_eq!(generator.last_prompt().as_deref(), Some("two"));
    }
}
