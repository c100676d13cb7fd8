use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

/// Deterministic deduplication key for one logical unit of work.
///
/// The backend collapses duplicate submissions by byte-identical key, so
/// derivation must preserve exact field ordering and separators across
/// independent producers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobKey(String);

impl JobKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Delay schedule applied between retry attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    Exponential { base: Duration },
}

/// How long the backend keeps finished jobs around for operator inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retention {
    pub completed_limit: u32,
    pub failed_limit: u32,
    pub failed_age: Duration,
}

impl Default for Retention {
    fn default() -> Self {
        Self {
            completed_limit: 200,
            failed_limit: 1000,
            failed_age: Duration::from_secs(7 * 24 * 60 * 60),
        }
    }
}

/// Per-job retry and retention policy, fixed per work type at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobOptions {
    pub attempts: u32,
    pub backoff: Backoff,
    pub retention: Retention,
}

/// One job hand-off to the backend.
#[derive(Debug, Clone)]
pub struct JobSubmission {
    pub queue: String,
    pub name: String,
    pub key: JobKey,
    pub payload: Value,
    pub options: JobOptions,
}

/// Backend response to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// Accepted as a new unit of work.
    Accepted,
    /// Collapsed into an already-queued job with the same key.
    Deduplicated,
    /// Dropped without I/O because dispatch is disabled.
    Skipped,
}

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("queue backend unavailable: {0}")]
    Unavailable(String),
    #[error("queue backend rejected job '{key}': {reason}")]
    Rejected { key: String, reason: String },
    #[error("job payload could not be serialized: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Queue backend collaborator.
///
/// Guarantees at-least-once delivery to a worker and idempotent acceptance of
/// duplicate keys; retry and retention policy travel with each submission.
#[async_trait]
pub trait QueueClient: Send + Sync {
    async fn enqueue(&self, submission: JobSubmission) -> Result<EnqueueOutcome, QueueError>;

    /// Close the backend connection. In-flight submissions are left to
    /// whatever the backend itself guarantees.
    async fn close(&self) -> Result<(), QueueError>;
}

/// Strategy for deployments without a queue backend.
///
/// Every call completes immediately and successfully; nothing is submitted
/// and no error is ever produced.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopQueue;

#[async_trait]
impl QueueClient for NoopQueue {
    async fn enqueue(&self, submission: JobSubmission) -> Result<EnqueueOutcome, QueueError> {
        tracing::debug!(
            queue = %submission.queue,
            key = submission.key.as_str(),
            "queue disabled, dropping submission"
        );
        Ok(EnqueueOutcome::Skipped)
    }

    async fn close(&self) -> Result<(), QueueError> {
        Ok(())
    }
}
