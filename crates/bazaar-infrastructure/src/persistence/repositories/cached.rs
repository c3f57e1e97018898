use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use bazaar_domain::shared::{CacheStore, EntityRecord, EntityRepository, TxCallback, UnitOfWork};
use bazaar_domain::{DomainError, RequestContext};

/// Read-through / write-invalidate decorator over any [`EntityRepository`].
///
/// Reads hit the store first and fall back to the wrapped repository on miss,
/// populating the store only with successful results — a `NotFound` is never
/// cached, so it cannot mask a later create. Writes delegate first and then
/// delete (never update) the entry for the written id, forcing the next read
/// to refresh with the committed row.
///
/// Caching stays orthogonal to transactionality: the context is forwarded
/// untouched, and only the wrapped repository resolves the storage handle.
pub struct CachedRepository<R> {
    inner: R,
    store: Arc<dyn CacheStore>,
}

impl<R> CachedRepository<R> {
    pub fn new(inner: R, store: Arc<dyn CacheStore>) -> Self {
        Self { inner, store }
    }
}

#[async_trait]
impl<R> UnitOfWork for CachedRepository<R>
where
    R: UnitOfWork,
{
    async fn run_in_tx(&self, ctx: &RequestContext, f: TxCallback) -> Result<(), DomainError> {
        self.inner.run_in_tx(ctx, f).await
    }
}

#[async_trait]
impl<E, R> EntityRepository<E> for CachedRepository<R>
where
    E: EntityRecord + Serialize + DeserializeOwned,
    R: EntityRepository<E>,
{
    async fn save(&self, ctx: &RequestContext, record: &mut E) -> Result<(), DomainError> {
        self.inner.save(ctx, record).await?;

        // The committed shape may differ from what was passed in (generated
        // id, timestamps), so invalidate and let the next read refresh. A
        // failed invalidation would leave a stale entry, which the contract
        // forbids, so it is surfaced rather than swallowed.
        let key = E::cache_key(record.id());
        self.store.delete(&key).await.map_err(|err| {
            warn!(key = %key, error = %err, "cache invalidation failed after save");
            DomainError::internal(format!("invalidate cache entry {}: {}", key, err))
        })
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: E::Id) -> Result<E, DomainError> {
        let key = E::cache_key(id);

        match self.store.get(&key).await {
            Ok(Some(serialized)) => match serde_json::from_str(&serialized) {
                Ok(record) => {
                    debug!(key = %key, "cache hit");
                    return Ok(record);
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "undecodable cache entry, refreshing");
                }
            },
            Ok(None) => {}
            Err(err) => {
                // A broken store degrades to a miss; it never fails a read.
                warn!(key = %key, error = %err, "cache read failed");
            }
        }

        let record = self.inner.find_by_id(ctx, id).await?;

        // Population is best-effort; the caller already has the record.
        match serde_json::to_string(&record) {
            Ok(serialized) => {
                if let Err(err) = self.store.set(&key, serialized).await {
                    warn!(key = %key, error = %err, "cache populate failed");
                }
            }
            Err(err) => {
                warn!(key = %key, error = %err, "cache serialization failed");
            }
        }

        Ok(record)
    }
}
