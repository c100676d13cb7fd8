use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured, section-organized data describing one report instance under
/// generation. Owned by the caller; the evaluator only reads it.
///
/// Sections are open maps rather than typed structs: contracts arrive from
/// tenant-specific templates and the evaluator must tolerate any shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportContract {
    #[serde(default)]
    pub meta: Map<String, Value>,
    #[serde(default)]
    pub party: Map<String, Value>,
    #[serde(default)]
    pub property: Map<String, Value>,
    #[serde(default)]
    pub valuation_inputs: Map<String, Value>,
    #[serde(default)]
    pub manual_fields: Map<String, Value>,
    #[serde(default)]
    pub annexures: Vec<Value>,
}

impl ReportContract {
    pub(crate) fn section(&self, section: Section) -> &Map<String, Value> {
        match section {
            Section::Meta => &self.meta,
            Section::Party => &self.party,
            Section::Property => &self.property,
            Section::ValuationInputs => &self.valuation_inputs,
            Section::ManualFields => &self.manual_fields,
        }
    }
}

/// Contract section a field predicate reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Meta,
    Party,
    Property,
    ValuationInputs,
    ManualFields,
}

/// Kind of an attached evidence item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceKind {
    Document,
    Photo,
    Screenshot,
    Geo,
    Other,
}

/// One attached document/photo/geo-tag/screenshot supporting a report's
/// factual claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub kind: EvidenceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl EvidenceItem {
    pub fn of_kind(kind: EvidenceKind) -> Self {
        Self {
            kind,
            doc_type: None,
            tags: BTreeMap::new(),
        }
    }
}
