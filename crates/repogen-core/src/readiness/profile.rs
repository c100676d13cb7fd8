use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::contract::{EvidenceItem, EvidenceKind};

/// One tenant/report-type-configurable evidence requirement. When a profile
/// is supplied, its requirements supersede the static per-report-type
/// minimums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceProfileRequirement {
    pub id: String,
    pub evidence_type: EvidenceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    pub min_count: u32,
    pub is_required: bool,
    /// Tag filter: an item matches only if every entry here appears in the
    /// item's tags with the same value (subset match).
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    pub label: String,
}

impl EvidenceProfileRequirement {
    pub(crate) fn matches(&self, item: &EvidenceItem) -> bool {
        if item.kind != self.evidence_type {
            return false;
        }
        if let Some(doc_type) = &self.doc_type {
            if item.doc_type.as_deref() != Some(doc_type.as_str()) {
                return false;
            }
        }
        self.tags
            .iter()
            .all(|(key, value)| item.tags.get(key) == Some(value))
    }
}

/// Dynamic evidence-profile configuration supplied by the profile store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceProfileConfig {
    #[serde(default)]
    pub requirements: Vec<EvidenceProfileRequirement>,
    /// Required-field keys that have their supporting evidence attached.
    /// When supplied, checklist keys absent from this list are reported as
    /// missing a field-evidence link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_evidence_linked_keys: Option<Vec<String>>,
}
