use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use super::jobs::{OcrJob, ReportDraftJob, ReportGenerationJob, SignalRecomputeJob};
use super::queue::{
    Backoff, EnqueueOutcome, JobKey, JobOptions, JobSubmission, NoopQueue, QueueClient, QueueError,
    Retention,
};

/// Shared submission plumbing behind the typed dispatchers.
struct DispatcherCore {
    queue_name: String,
    client: Arc<dyn QueueClient>,
    options: JobOptions,
}

impl DispatcherCore {
    async fn submit<P: Serialize>(
        &self,
        name: &str,
        key: JobKey,
        payload: &P,
    ) -> Result<EnqueueOutcome, QueueError> {
        let payload = serde_json::to_value(payload)?;
        let submission = JobSubmission {
            queue: self.queue_name.clone(),
            name: name.to_string(),
            key: key.clone(),
            payload,
            options: self.options,
        };
        let outcome = self.client.enqueue(submission).await?;
        tracing::debug!(job = name, key = key.as_str(), outcome = ?outcome, "job dispatched");
        Ok(outcome)
    }

    async fn shutdown(&self) -> Result<(), QueueError> {
        self.client.close().await
    }
}

macro_rules! dispatcher {
    (
        $(#[$doc:meta])*
        $name:ident, $job:ty, $job_name:literal,
        attempts: $attempts:expr, backoff_base_secs: $base:expr
    ) => {
        $(#[$doc])*
        pub struct $name {
            core: DispatcherCore,
        }

        impl $name {
            pub const JOB_NAME: &'static str = $job_name;

            pub fn new(client: Arc<dyn QueueClient>, queue_name: impl Into<String>) -> Self {
                Self::with_options(client, queue_name, Self::default_options())
            }

            /// Disabled-mode dispatcher: every call is a successful no-op.
            /// Used in environments without a queue backend.
            pub fn disabled() -> Self {
                Self::with_options(Arc::new(NoopQueue), $job_name, Self::default_options())
            }

            pub fn with_options(
                client: Arc<dyn QueueClient>,
                queue_name: impl Into<String>,
                options: JobOptions,
            ) -> Self {
                Self {
                    core: DispatcherCore {
                        queue_name: queue_name.into(),
                        client,
                        options,
                    },
                }
            }

            pub fn default_options() -> JobOptions {
                JobOptions {
                    attempts: $attempts,
                    backoff: Backoff::Exponential {
                        base: Duration::from_secs($base),
                    },
                    retention: Retention::default(),
                }
            }

            /// Submit one unit of work under its deterministic key. A repeat
            /// submission with the same key collapses at the backend.
            pub async fn enqueue(&self, job: &$job) -> Result<EnqueueOutcome, QueueError> {
                self.core.submit(Self::JOB_NAME, job.dedupe_key(), job).await
            }

            /// Close the backend connection on process teardown.
            pub async fn shutdown(&self) -> Result<(), QueueError> {
                self.core.shutdown().await
            }
        }
    };
}

dispatcher!(
    /// Dispatches derived-signal recomputation after report inputs change.
    SignalRecomputeDispatcher, SignalRecomputeJob, "signal-recompute",
    attempts: 3, backoff_base_secs: 2
);

dispatcher!(
    /// Dispatches OCR extraction for uploaded documents.
    OcrDispatcher, OcrJob, "ocr-extract",
    attempts: 3, backoff_base_secs: 1
);

dispatcher!(
    /// Dispatches final document rendering for accepted generation requests.
    ReportGenerationDispatcher, ReportGenerationJob, "report-generate",
    attempts: 5, backoff_base_secs: 2
);

dispatcher!(
    /// Dispatches draft rendering ahead of final generation.
    ReportDraftDispatcher, ReportDraftJob, "report-draft",
    attempts: 5, backoff_base_secs: 2
);
