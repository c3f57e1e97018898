use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::{SqlitePool, Transaction};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

use bazaar_domain::{DomainError, RequestContext};

use super::errors::translate;

/// A transaction shared through the request context. The mutex serializes
/// sibling calls that fork the same context; the unit of work recovers sole
/// ownership before commit/rollback.
pub(crate) type SharedTx = Arc<Mutex<Transaction<'static, Sqlite>>>;

/// The value the unit of work stores in the context's handle slot.
pub(crate) struct TxHandle {
    tx: SharedTx,
}

impl TxHandle {
    /// Derives a child context carrying `tx` as the active storage handle.
    pub(crate) fn attach(ctx: &RequestContext, tx: SharedTx) -> RequestContext {
        ctx.with_handle(Arc::new(TxHandle { tx }))
    }

    pub(crate) fn is_active(ctx: &RequestContext) -> bool {
        ctx.handle().is_some_and(|handle| handle.is::<TxHandle>())
    }
}

/// The working storage handle for one repository call: the context's open
/// transaction when present, otherwise the base connection. Resolved at call
/// time, so the same repository code runs inside and outside a unit of work.
pub(crate) enum DbSession<'a> {
    Pool(&'a SqlitePool),
    Tx(SharedTx),
}

impl<'a> DbSession<'a> {
    pub(crate) fn resolve(ctx: &RequestContext, fallback: &'a SqlitePool) -> Self {
        match ctx
            .handle()
            .and_then(|handle| handle.downcast_ref::<TxHandle>())
        {
            Some(handle) => DbSession::Tx(Arc::clone(&handle.tx)),
            None => DbSession::Pool(fallback),
        }
    }

    pub(crate) async fn execute<'b>(
        &self,
        ctx: &RequestContext,
        query: Query<'b, Sqlite, SqliteArguments<'b>>,
        op: &str,
    ) -> Result<SqliteQueryResult, DomainError> {
        let fut = async {
            match self {
                DbSession::Pool(pool) => query.execute(*pool).await,
                DbSession::Tx(tx) => {
                    let mut tx = tx.lock().await;
                    query.execute(&mut **tx).await
                }
            }
        };
        bounded(ctx, op, fut).await
    }

    pub(crate) async fn fetch_optional<'b, T>(
        &self,
        ctx: &RequestContext,
        query: QueryAs<'b, Sqlite, T, SqliteArguments<'b>>,
        op: &str,
    ) -> Result<Option<T>, DomainError>
    where
        T: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let fut = async {
            match self {
                DbSession::Pool(pool) => query.fetch_optional(*pool).await,
                DbSession::Tx(tx) => {
                    let mut tx = tx.lock().await;
                    query.fetch_optional(&mut **tx).await
                }
            }
        };
        bounded(ctx, op, fut).await
    }
}

/// Runs one storage round-trip under the context's deadline. An expired or
/// exceeded deadline aborts the call and surfaces as Internal.
async fn bounded<T>(
    ctx: &RequestContext,
    op: &str,
    fut: impl Future<Output = Result<T, sqlx::Error>>,
) -> Result<T, DomainError> {
    match ctx.remaining() {
        None => fut.await.map_err(|e| translate(e, op)),
        Some(left) if left.is_zero() => Err(DomainError::internal(format!(
            "{}: context deadline exceeded",
            op
        ))),
        Some(left) => match tokio::time::timeout(left, fut).await {
            Ok(result) => result.map_err(|e| translate(e, op)),
            Err(_) => Err(DomainError::internal(format!(
                "{}: context deadline exceeded",
                op
            ))),
        },
    }
}
