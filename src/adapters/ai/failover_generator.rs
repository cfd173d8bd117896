//! Failover Text Generator - primary generator with one optional fallback.
//!
//! When the primary fails with a transient error (rate limit, unavailable,
//! timeout), the fallback is tried exactly once.
//!
//! # Example
//!
//! ```ignore
//! let generator = FailoverTextGenerator::new(primary)
//!     .with_fallback(fallback);
//! ```

use async_trait::async_trait;
use std::sync::Arc;

use crate::ports::{GenerationError, GenerationParams, ProviderInfo, TextGenerator};

pub struct FailoverTextGenerator {
    primary: Arc<dyn TextGenerator>,
    fallback: Option<Arc<dyn TextGenerator>>,
}

impl FailoverTextGenerator {
    pub fn new(primary: Arc<dyn TextGenerator>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    /// Adds a fallback generator.
    pub fn with_fallback(mut self, fallback: Arc<dyn TextGenerator>) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

#[async_trait]
impl TextGenerator for FailoverTextGenerator {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        match self.primary.generate(prompt, params).await {
            Ok(text) => Ok(text),
            Err(err) if err.is_retryable() => match &self.fallback {
                Some(fallback) => {
                    tracing::warn!(
                        primary = %self.primary.provider_info().model,
                        fallback = %fallback.provider_info().model,
                        "Primary generator failed ({}), using fallback",
                        err
                    );
                    fallback.generate(prompt, params).await
                }
                None => Err(err),
            },
            Err(err) => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.primary.provider_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockGenerationError, MockTextGenerator};

    #[tokio::test]
    async fn primary_success_does_not_touch_fallback() {
        let primary = Arc::new(MockTextGenerator::new().with_response("primary"));
        let fallback = Arc::new(MockTextGenerator::new().with_response("fallback"));
        let generator = FailoverTextGenerator::new(primary.clone()).with_fallback(fallback.clone());

        let text = generator.generate("p", &GenerationParams::default()).await.unwrap();

        assert_eq!(text, "primary");
        assert_eq!(fallback.call_count(), 0);
    }

    #[tokio::test]
    async fn retryable_error_uses_fallback_once() {
        let primary = Arc::new(
            MockTextGenerator::new().with_error(MockGenerationError::Unavailable {
                message: "503".into(),
            }),
        );
        let fallback = Arc::new(MockTextGenerator::new().with_response("fallback"));
        let generator = FailoverTextGenerator::new(primary).with_fallback(fallback.clone());

        let text = generator.generate("p", &GenerationParams::default()).await.unwrap();

        assert_eq!(text, "fallback");
        assert_eq!(fallback.call_count(), 1);
    }

    #[tokio::test]
    async fn non_retryable_error_skips_fallback() {
        let primary = Arc::new(
            MockTextGenerator::new().with_error(MockGenerationError::AuthenticationFailed),
        );
        let fallback = Arc::new(MockTextGenerator::new().with_response("fallback"));
        let generator = FailoverTextGenerator::new(primary).with_fallback(fallback.clone());

        let result = generator.generate("p", &GenerationParams::default()).await;

        assert!(matches!(result, Err(GenerationError::AuthenticationFailed)));
        assert_eq!(fallback.call_count(), 0);
    }

    #[tokio::test]
    async fn without_fallback_error_propagates() {
        let primary = Arc::new(
            MockTextGenerator::new().with_error(MockGenerationError::Timeout { timeout_secs: 5 }),
        );
        let generator = FailoverTextGenerator::new(primary);

        let result = generator.generate("p", &GenerationParams::default()).await;
        assert!(matches!(result, Err(GenerationError::Timeout { timeout_secs: 5 })));
    }
}
