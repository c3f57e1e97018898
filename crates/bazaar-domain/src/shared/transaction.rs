use async_trait::async_trait;
use futures::future::BoxFuture;
use std::future::Future;

use super::context::RequestContext;
use super::error::DomainError;

/// Callback executed inside a unit of work. It receives a context derived
/// from the caller's, carrying the open transaction as its storage handle.
pub type TxCallback =
    Box<dyn FnOnce(RequestContext) -> BoxFuture<'static, Result<(), DomainError>> + Send>;

/// Unit of Work port: one transaction boundary per invocation.
///
/// The implementation begins a transaction, invokes the callback with a
/// derived context and commits on success or rolls back on error. A callback
/// error is surfaced unchanged; only begin/commit/rollback failures add
/// information. Exactly one of {commit, rollback, begin-failure, join} occurs
/// per invocation.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn run_in_tx(&self, ctx: &RequestContext, f: TxCallback) -> Result<(), DomainError>;
}

#[async_trait]
impl<T> UnitOfWork for std::sync::Arc<T>
where
    T: UnitOfWork + ?Sized,
{
    async fn run_in_tx(&self, ctx: &RequestContext, f: TxCallback) -> Result<(), DomainError> {
        (**self).run_in_tx(ctx, f).await
    }
}

/// Adapts an async closure to the boxed [`TxCallback`] shape.
pub fn tx_fn<F, Fut>(f: F) -> TxCallback
where
    F: FnOnce(RequestContext) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), DomainError>> + Send + 'static,
{
    Box::new(move |ctx| Box::pin(f(ctx)))
}
