use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::tenancy::TenantId;

use super::queue::JobKey;

/// Recompute derived signals for one report after its inputs changed.
///
/// Keyed by report, stage, and a daily bucket so repeated triggers for the
/// same report collapse into one queued job per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRecomputeJob {
    pub report_id: String,
    pub tenant_id: TenantId,
    pub stage: String,
    pub requested_on: NaiveDate,
    pub requested_by: Option<String>,
}

impl SignalRecomputeJob {
    pub fn dedupe_key(&self) -> JobKey {
        JobKey::new(format!(
            "signal-recompute:{}:{}:{}",
            self.report_id,
            self.stage,
            self.requested_on.format("%Y%m%d")
        ))
    }
}

/// Extract text from one uploaded document. Keyed by document id: the same
/// document never OCRs twice concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrJob {
    pub document_id: String,
    pub tenant_id: TenantId,
    pub requested_by: Option<String>,
}

impl OcrJob {
    pub fn dedupe_key(&self) -> JobKey {
        JobKey::new(format!("ocr:{}", self.document_id))
    }
}

/// Render the final document for an accepted generation request. The caller
/// assigns `request_id` before dispatch; it is the deduplication key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportGenerationJob {
    pub request_id: String,
    pub report_id: String,
    pub tenant_id: TenantId,
    pub report_type: String,
    pub requested_by: Option<String>,
}

impl ReportGenerationJob {
    pub fn dedupe_key(&self) -> JobKey {
        JobKey::new(format!("report-generate:{}", self.request_id))
    }
}

/// Produce an editable draft for review ahead of final generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDraftJob {
    pub request_id: String,
    pub report_id: String,
    pub tenant_id: TenantId,
    pub requested_by: Option<String>,
}

impl ReportDraftJob {
    pub fn dedupe_key(&self) -> JobKey {
        JobKey::new(format!("report-draft:{}", self.request_id))
    }
}
