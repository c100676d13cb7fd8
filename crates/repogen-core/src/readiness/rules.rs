//! Static per-report-type rule tables.
//!
//! Configuration-as-code: a closed enumeration maps to fixed checklists so
//! the rule set stays exhaustively checkable at compile time. Declaration
//! order here is the order of every message the evaluator emits.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::contract::{EvidenceKind, ReportContract, Section};

/// The closed set of report types the evaluator knows. Adding a member means
/// adding both a field checklist and an evidence-minimum table below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    Valuation,
    Dpr,
    Revaluation,
    StageProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Text,
    Numeric,
}

/// One required-field predicate with its human-readable failure message.
pub(crate) struct FieldCheck {
    pub key: &'static str,
    pub section: Section,
    pub field: &'static str,
    pub kind: FieldKind,
    pub message: &'static str,
}

/// Minimum count of evidence items across a report-type-specific grouping of
/// kinds. Each report type defines its own grouping semantics.
pub(crate) struct EvidenceMinimum {
    pub key: &'static str,
    pub min: u32,
    pub kinds: &'static [EvidenceKind],
}

pub(crate) struct RuleSet {
    pub fields: &'static [FieldCheck],
    pub evidence: &'static [EvidenceMinimum],
}

pub(crate) fn rule_set(report_type: ReportType) -> &'static RuleSet {
    match report_type {
        ReportType::Valuation => &VALUATION_RULES,
        ReportType::Dpr => &DPR_RULES,
        ReportType::Revaluation => &REVALUATION_RULES,
        ReportType::StageProgress => &STAGE_PROGRESS_RULES,
    }
}

static VALUATION_RULES: RuleSet = RuleSet {
    fields: &[
        FieldCheck {
            key: "bank_name",
            section: Section::Meta,
            field: "bank_name",
            kind: FieldKind::Text,
            message: "Bank name is required",
        },
        FieldCheck {
            key: "property_address",
            section: Section::Property,
            field: "address",
            kind: FieldKind::Text,
            message: "Property address is required",
        },
        FieldCheck {
            key: "land_area",
            section: Section::Property,
            field: "land_area",
            kind: FieldKind::Numeric,
            message: "Land area is required",
        },
        FieldCheck {
            key: "guideline_rate",
            section: Section::ValuationInputs,
            field: "guideline_rate",
            kind: FieldKind::Numeric,
            message: "Guideline rate is required",
        },
    ],
    evidence: &[EvidenceMinimum {
        key: "valuation_photos",
        min: 6,
        kinds: &[
            EvidenceKind::Photo,
            EvidenceKind::Geo,
            EvidenceKind::Screenshot,
        ],
    }],
};

// DPR evidence counts photos and screenshots only; geo tags do not qualify.
static DPR_RULES: RuleSet = RuleSet {
    fields: &[
        FieldCheck {
            key: "project_summary",
            section: Section::Meta,
            field: "project_summary",
            kind: FieldKind::Text,
            message: "Project summary is required",
        },
        FieldCheck {
            key: "project_cost_total",
            section: Section::ValuationInputs,
            field: "project_cost_total",
            kind: FieldKind::Numeric,
            message: "Project cost total is required",
        },
        FieldCheck {
            key: "means_of_finance",
            section: Section::ValuationInputs,
            field: "means_of_finance",
            kind: FieldKind::Text,
            message: "Means of finance is required",
        },
    ],
    evidence: &[EvidenceMinimum {
        key: "dpr_photos",
        min: 4,
        kinds: &[EvidenceKind::Photo, EvidenceKind::Screenshot],
    }],
};

static REVALUATION_RULES: RuleSet = RuleSet {
    fields: &[
        FieldCheck {
            key: "property_address",
            section: Section::Property,
            field: "address",
            kind: FieldKind::Text,
            message: "Property address is required",
        },
        FieldCheck {
            key: "previous_valuation_ref",
            section: Section::Meta,
            field: "previous_valuation_ref",
            kind: FieldKind::Text,
            message: "Previous valuation reference is required",
        },
        FieldCheck {
            key: "revised_rate",
            section: Section::ValuationInputs,
            field: "revised_rate",
            kind: FieldKind::Numeric,
            message: "Revised rate is required",
        },
    ],
    evidence: &[EvidenceMinimum {
        key: "revaluation_photos",
        min: 4,
        kinds: &[
            EvidenceKind::Photo,
            EvidenceKind::Geo,
            EvidenceKind::Screenshot,
        ],
    }],
};

static STAGE_PROGRESS_RULES: RuleSet = RuleSet {
    fields: &[
        FieldCheck {
            key: "stage_name",
            section: Section::ManualFields,
            field: "stage_name",
            kind: FieldKind::Text,
            message: "Stage name is required",
        },
        FieldCheck {
            key: "completion_percent",
            section: Section::ManualFields,
            field: "completion_percent",
            kind: FieldKind::Numeric,
            message: "Completion percentage is required",
        },
        FieldCheck {
            key: "as_on_date",
            section: Section::Meta,
            field: "as_on_date",
            kind: FieldKind::Text,
            message: "As-on date is required",
        },
    ],
    evidence: &[EvidenceMinimum {
        key: "progress_photos",
        min: 4,
        kinds: &[EvidenceKind::Photo, EvidenceKind::Geo],
    }],
};

pub(crate) fn field_satisfied(check: &FieldCheck, contract: &ReportContract) -> bool {
    let value = contract.section(check.section).get(check.field);
    match check.kind {
        FieldKind::Text => text_present(value),
        FieldKind::Numeric => numeric_value(value).is_some(),
    }
}

fn text_present(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Number(_)) | Some(Value::Bool(_)) => true,
        _ => false,
    }
}

/// Numeric predicates accept a native number or a numeric string; anything
/// else (NaN, empty string, null, objects) is treated as absent.
fn numeric_value(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
