//! Mock media fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{MediaError, MediaFetcher};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Serves registered bytes by URL; unknown URLs return 404.
#[derive(Debug, Clone, Default)]
pub struct MockMediaFetcher {
    media: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockMediaFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_media(self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        lock(&self.media).insert(url.into(), bytes.into());
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

#[async_trait]
impl MediaFetcher for MockMediaFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, MediaError> {
        lock(&self.calls).push(url.to_string());
        lock(&self.media)
            .get(url)
            .cloned()
            .ok_or(MediaError::Status(404))
    }
}
