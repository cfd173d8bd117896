//! Media Fetcher Port - downloads attachments referenced by URL
//! (WhatsApp voice notes).

use async_trait::async_trait;

#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, MediaError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("media download failed with status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("media fetching not configured")]
    NotConfigured,
}
