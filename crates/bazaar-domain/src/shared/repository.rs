use async_trait::async_trait;
use std::fmt::Display;

use super::context::RequestContext;
use super::error::DomainError;
use super::transaction::UnitOfWork;

/// A persistable aggregate: typed id, cache-key kind tag and the rowid
/// backfill hook repositories use after an insert.
pub trait EntityRecord: Send + Sync {
    type Id: Copy + Display + Send + Sync + 'static;

    /// Kind tag used as the cache-key prefix, e.g. `"merchant"`.
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    /// Called by the repository once storage has assigned a rowid.
    fn assign_id(&mut self, raw: i64);

    fn cache_key(id: Self::Id) -> String {
        format!("{}:{}", Self::KIND, id)
    }
}

/// The uniform persistence capability every entity exposes: Save, FindByID
/// and (via the supertrait) RunInTx. Implementations resolve their working
/// storage handle from the context at call time, so the same code runs
/// against the base connection or inside an open transaction.
///
/// Variants: the plain SQLite repository and the cache decorator, which wraps
/// any implementation behind the identical contract.
#[async_trait]
pub trait EntityRepository<E: EntityRecord>: UnitOfWork {
    /// Persists a new record. `KeyConflict` on a uniqueness violation.
    /// The storage-assigned id is written back into `record`.
    async fn save(&self, ctx: &RequestContext, record: &mut E) -> Result<(), DomainError>;

    /// Fetches one non-soft-deleted record. `NotFound` when no such row
    /// exists; a soft-deleted record is indistinguishable from a missing one.
    async fn find_by_id(&self, ctx: &RequestContext, id: E::Id) -> Result<E, DomainError>;
}

#[async_trait]
impl<E, T> EntityRepository<E> for std::sync::Arc<T>
where
    E: EntityRecord,
    T: EntityRepository<E> + ?Sized,
{
    async fn save(&self, ctx: &RequestContext, record: &mut E) -> Result<(), DomainError> {
        (**self).save(ctx, record).await
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: E::Id) -> Result<E, DomainError> {
        (**self).find_by_id(ctx, id).await
    }
}
