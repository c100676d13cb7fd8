use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use super::TxContext;

/// Failure propagated out of a unit of work. Opaque to this crate; callers
/// downcast if they need the concrete type.
pub type WorkError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed future produced by a unit of work.
pub type WorkFuture<T> = Pin<Box<dyn Future<Output = Result<T, WorkError>> + Send>>;

/// A single logical operation executed inside one scoped transaction.
pub type UnitOfWork<T> = Box<dyn FnOnce(TxContext) -> WorkFuture<T> + Send>;

/// Persistence collaborator running units of work inside scoped transactions.
///
/// The store must bind the supplied [`TxContext`] as ambient context for the
/// transaction (row-security policies key on it), commit when the unit
/// returns `Ok`, and roll back when it returns `Err` or is cancelled. Partial
/// commits are not permitted.
#[async_trait]
pub trait TransactionalStore: Send + Sync {
    async fn within<T>(&self, ctx: TxContext, work: UnitOfWork<T>) -> Result<T, StoreError>
    where
        T: Send + 'static;
}

/// Transaction plumbing and unit-of-work failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("transaction could not be started: {0}")]
    Begin(String),
    #[error("transaction commit failed: {0}")]
    Commit(String),
    #[error("unit of work failed: {0}")]
    Work(WorkError),
}
