use async_trait::async_trait;

use super::error::DomainError;

/// Key/value store backing the cache decorator. Values are serialized entity
/// snapshots; the decorator does not care which store technology sits behind
/// this. Implementations must support concurrent get/set/delete per key.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn set(&self, key: &str, value: String) -> Result<(), DomainError>;

    async fn delete(&self, key: &str) -> Result<(), DomainError>;
}
