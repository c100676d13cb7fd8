use std::future::Future;
use std::sync::Arc;

use crate::config::LaunchModeConfig;

use super::store::{StoreError, TransactionalStore, WorkError, WorkFuture};
use super::{Audience, Claims, TenantId, TxContext};

/// Resolves an authoritative tenant identity and wraps business logic in a
/// scoped transaction carrying it.
pub struct TenantContextResolver<S> {
    launch: LaunchModeConfig,
    store: Arc<S>,
}

impl<S> TenantContextResolver<S>
where
    S: TransactionalStore,
{
    pub fn new(launch: LaunchModeConfig, store: Arc<S>) -> Self {
        Self { launch, store }
    }

    /// Derive the tenant a caller operates under.
    ///
    /// Rules, in audience order:
    ///
    /// 1. Portal callers always land on the configured external tenant; the
    ///    claimed tenant is ignored.
    /// 2. Internal-web callers under single-tenant launch mode must claim the
    ///    configured internal tenant; the resolver returns the configured id,
    ///    not the claim verbatim.
    /// 3. Internal-web callers under multi-tenant launch mode get their claim
    ///    back verbatim; tenant existence is a collaborator's concern.
    /// 4. Every other audience gets its claim back verbatim.
    pub fn resolve_tenant_id(&self, claims: &Claims) -> Result<Option<TenantId>, TenancyError> {
        match claims.audience {
            Audience::Portal => Ok(Some(self.launch.external_tenant_id().clone())),
            Audience::InternalWeb if !self.launch.multi_tenant_enabled() => {
                match &claims.tenant_id {
                    Some(claimed) if claimed == self.launch.internal_tenant_id() => {
                        Ok(Some(self.launch.internal_tenant_id().clone()))
                    }
                    _ => Err(TenancyError::TenantNotEnabled),
                }
            }
            _ => Ok(claims.tenant_id.clone()),
        }
    }

    /// Resolve the caller's tenant and run `work` inside a scoped transaction.
    ///
    /// Commit on normal return, rollback on any propagated failure.
    pub async fn run_with_claims<T, F, Fut>(
        &self,
        claims: &Claims,
        work: F,
    ) -> Result<T, TenancyError>
    where
        T: Send + 'static,
        F: FnOnce(TxContext) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, WorkError>> + Send + 'static,
    {
        let tenant_id = self.resolve_tenant_id(claims)?;
        let ctx = TxContext {
            tenant_id,
            user_id: claims.user_id.clone(),
            audience: claims.audience,
        };
        self.run(ctx, work).await
    }

    /// Transactional wrapping for background workers pinned to one tenant.
    pub async fn run_worker<T, F, Fut>(&self, tenant_id: TenantId, work: F) -> Result<T, TenancyError>
    where
        T: Send + 'static,
        F: FnOnce(TxContext) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, WorkError>> + Send + 'static,
    {
        let ctx = TxContext {
            tenant_id: Some(tenant_id),
            user_id: None,
            audience: Audience::Worker,
        };
        self.run(ctx, work).await
    }

    /// Transactional wrapping for tenant-agnostic internal service calls.
    pub async fn run_service<T, F, Fut>(&self, work: F) -> Result<T, TenancyError>
    where
        T: Send + 'static,
        F: FnOnce(TxContext) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, WorkError>> + Send + 'static,
    {
        let ctx = TxContext {
            tenant_id: None,
            user_id: None,
            audience: Audience::Service,
        };
        self.run(ctx, work).await
    }

    async fn run<T, F, Fut>(&self, ctx: TxContext, work: F) -> Result<T, TenancyError>
    where
        T: Send + 'static,
        F: FnOnce(TxContext) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, WorkError>> + Send + 'static,
    {
        tracing::debug!(
            audience = ?ctx.audience,
            tenant = ?ctx.tenant_id,
            "opening scoped transaction"
        );
        let unit: crate::tenancy::UnitOfWork<T> =
            Box::new(move |ctx| -> WorkFuture<T> { Box::pin(work(ctx)) });
        self.store.within(ctx, unit).await.map_err(|err| match err {
            StoreError::Work(source) => TenancyError::Work(source),
            other => TenancyError::Store(other),
        })
    }
}

/// Errors raised while establishing or executing a tenant-scoped operation.
#[derive(Debug, thiserror::Error)]
pub enum TenancyError {
    /// An internal-web caller claimed a tenant other than the single enabled
    /// tenant under single-tenant launch mode. Surfaced as an authorization
    /// failure; never retried.
    #[error("tenant is not enabled under the current launch mode")]
    TenantNotEnabled,
    /// Transaction plumbing failed (begin/commit); the unit of work may not
    /// have run.
    #[error(transparent)]
    Store(StoreError),
    /// The unit of work itself failed and the transaction rolled back.
    #[error(transparent)]
    Work(WorkError),
}
