use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use bazaar_domain::shared::CacheStore;
use bazaar_domain::DomainError;

/// Process-local cache store. Per-key operations are linearizable through the
/// lock; there is no cross-key atomicity and none is required.
#[derive(Default)]
pub struct InMemoryCacheStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), DomainError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_delete_roundtrip() {
        let store = InMemoryCacheStore::new();

        assert_eq!(store.get("merchant:1").await.unwrap(), None);

        store
            .set("merchant:1", r#"{"name":"acme"}"#.to_string())
            .await
            .unwrap();
        assert_eq!(
            store.get("merchant:1").await.unwrap().as_deref(),
            Some(r#"{"name":"acme"}"#)
        );

        store.delete("merchant:1").await.unwrap();
        assert_eq!(store.get("merchant:1").await.unwrap(), None);
    }
}
