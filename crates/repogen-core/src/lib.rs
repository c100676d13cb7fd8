//! Core services gating asynchronous report generation in a multi-tenant
//! operations platform.
//!
//! Three subsystems live here:
//!
//! - [`tenancy`] resolves an authoritative tenant identity from caller claims
//!   and the launch-mode policy, and wraps business logic in a scoped
//!   transaction carrying that identity.
//! - [`dispatch`] hands background work (signal recompute, OCR, report
//!   generation, report drafts) to a queue backend under deterministic
//!   deduplication keys with per-work-type retry policy.
//! - [`readiness`] scores whether a report contract plus its attached
//!   evidence is complete enough to render.
//!
//! HTTP controllers, storage adapters, and rendering live in the surrounding
//! services; this crate talks to them only through the collaborator traits in
//! [`tenancy::TransactionalStore`] and [`dispatch::QueueClient`].

pub mod config;
pub mod dispatch;
pub mod readiness;
pub mod telemetry;
pub mod tenancy;
