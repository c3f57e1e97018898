use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error};

use bazaar_domain::shared::{TxCallback, UnitOfWork};
use bazaar_domain::{DomainError, RequestContext};

use super::handle::{SharedTx, TxHandle};

/// SQLite unit of work: one transaction boundary per `run_in_tx` invocation.
/// Every entity repository delegates here, so all packages share one
/// coordinator implementation.
#[derive(Clone)]
pub struct SqliteUnitOfWork {
    pool: Arc<SqlitePool>,
}

impl SqliteUnitOfWork {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn run_in_tx(&self, ctx: &RequestContext, f: TxCallback) -> Result<(), DomainError> {
        // A context already inside a transaction joins it instead of opening
        // a second one; commit/rollback stay with the outermost invocation.
        if TxHandle::is_active(ctx) {
            debug!("run_in_tx: joining enclosing transaction");
            return f(ctx.clone()).await;
        }

        let tx = self.pool.begin().await.map_err(|e| {
            error!(error = %e, "run_in_tx: failed to begin transaction");
            DomainError::internal(format!("begin transaction: {}", e))
        })?;
        debug!("run_in_tx: transaction started");

        let shared: SharedTx = Arc::new(Mutex::new(tx));
        let derived = TxHandle::attach(ctx, Arc::clone(&shared));

        let outcome = f(derived).await;

        // The derived context was consumed by the callback; if a clone of it
        // is still alive somewhere, finishing a shared transaction would hand
        // it to another call chain, so fail instead.
        let tx = match Arc::try_unwrap(shared) {
            Ok(mutex) => mutex.into_inner(),
            Err(_) => {
                error!("run_in_tx: transaction handle escaped its unit of work");
                return Err(DomainError::internal(match outcome {
                    Ok(()) => "transaction handle escaped its unit of work".to_string(),
                    Err(err) => format!(
                        "transaction handle escaped its unit of work (while handling: {})",
                        err
                    ),
                }));
            }
        };

        match outcome {
            Ok(()) => {
                tx.commit().await.map_err(|e| {
                    error!(error = %e, "run_in_tx: commit failed");
                    DomainError::internal(format!("commit transaction: {}", e))
                })?;
                debug!("run_in_tx: committed");
                Ok(())
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    // Neither failure may be discarded.
                    error!(error = %rollback_err, "run_in_tx: rollback failed");
                    return Err(DomainError::internal(format!(
                        "rollback transaction: {} (while handling: {})",
                        rollback_err, err
                    )));
                }
                debug!(error = %err, "run_in_tx: rolled back");
                Err(err)
            }
        }
    }
}
