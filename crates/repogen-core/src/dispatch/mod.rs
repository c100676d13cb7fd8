//! Idempotent hand-off of background work to the queue backend.
//!
//! One dispatcher per work type, all the same shape: fixed default
//! retry/retention policy, deterministic deduplication keys derived purely
//! from the payload, and a no-op strategy for deployments without a broker.

mod dispatchers;
mod jobs;
mod queue;

pub use dispatchers::{
    OcrDispatcher, ReportDraftDispatcher, ReportGenerationDispatcher, SignalRecomputeDispatcher,
};
pub use jobs::{OcrJob, ReportDraftJob, ReportGenerationJob, SignalRecomputeJob};
pub use queue::{
    Backoff, EnqueueOutcome, JobKey, JobOptions, JobSubmission, NoopQueue, QueueClient, QueueError,
    Retention,
};
