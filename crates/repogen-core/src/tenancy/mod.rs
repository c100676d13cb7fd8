//! Tenant identity, caller claims, and the scoped-transaction context.
//!
//! The resolver in this module is the single source of truth for which tenant
//! a request operates under; downstream row-level isolation keys off the
//! [`TxContext`] it produces.

mod resolver;
mod store;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use resolver::{TenantContextResolver, TenancyError};
pub use store::{StoreError, TransactionalStore, UnitOfWork, WorkError, WorkFuture};

/// Opaque tenant identifier as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub String);

impl TenantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TenantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Caller class embedded in a verified credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    /// The internal operations web app used by valuation staff.
    InternalWeb,
    /// The internal template/studio tooling.
    InternalStudio,
    /// The external customer-facing portal.
    Portal,
    /// Background worker processes consuming queued jobs.
    Worker,
    /// Tenant-agnostic internal service-to-service calls.
    Service,
}

/// Authenticated identity for one request.
///
/// Decoding and signature verification happen in the transport layer; by the
/// time a `Claims` value reaches this crate it is trusted. Immutable per
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub subject: String,
    pub tenant_id: Option<TenantId>,
    pub user_id: Option<String>,
    pub audience: Audience,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// Ambient context bound to a single scoped transaction.
///
/// `tenant_id` is `None` only for service-audience calls, which are
/// tenant-agnostic by design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxContext {
    pub tenant_id: Option<TenantId>,
    pub user_id: Option<String>,
    pub audience: Audience,
}
