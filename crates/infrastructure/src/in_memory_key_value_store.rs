use std::collections::HashMap;

use async_trait::async_trait;
use auditdesk_application::KeyValueStore;
use auditdesk_core::AppResult;
use tokio::sync::RwLock;

/// Process-local key-value substrate. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        self.values.write().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}
