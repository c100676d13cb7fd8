use std::collections::BTreeMap;

use serde_json::json;

use crate::readiness::{
    EvidenceItem, EvidenceKind, EvidenceProfileConfig, EvidenceProfileRequirement, ReportContract,
};

pub(super) fn photo() -> EvidenceItem {
    EvidenceItem::of_kind(EvidenceKind::Photo)
}

pub(super) fn screenshot() -> EvidenceItem {
    EvidenceItem::of_kind(EvidenceKind::Screenshot)
}

pub(super) fn geo() -> EvidenceItem {
    EvidenceItem::of_kind(EvidenceKind::Geo)
}

pub(super) fn document(doc_type: &str) -> EvidenceItem {
    EvidenceItem {
        kind: EvidenceKind::Document,
        doc_type: Some(doc_type.to_string()),
        tags: BTreeMap::new(),
    }
}

pub(super) fn tagged_photo(tags: &[(&str, &str)]) -> EvidenceItem {
    EvidenceItem {
        kind: EvidenceKind::Photo,
        doc_type: None,
        tags: tags
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

/// A valuation contract satisfying every static field predicate, with one
/// annexure so the advisory warning stays quiet.
pub(super) fn complete_valuation_contract() -> ReportContract {
    let mut contract = ReportContract::default();
    contract
        .meta
        .insert("bank_name".to_string(), json!("First National Bank"));
    contract.property.insert(
        "address".to_string(),
        json!("Plot 12, Industrial Estate, Pune"),
    );
    contract
        .property
        .insert("land_area".to_string(), json!(2400.5));
    contract
        .valuation_inputs
        .insert("guideline_rate".to_string(), json!("5200"));
    contract
        .annexures
        .push(json!({ "title": "Site sketch", "page": 1 }));
    contract
}

pub(super) fn sale_deed_profile() -> EvidenceProfileConfig {
    EvidenceProfileConfig {
        requirements: vec![
            EvidenceProfileRequirement {
                id: "req-sale-deed".to_string(),
                evidence_type: EvidenceKind::Document,
                doc_type: Some("SALE_DEED".to_string()),
                min_count: 1,
                is_required: true,
                tags: BTreeMap::new(),
                label: "Sale deed".to_string(),
            },
            EvidenceProfileRequirement {
                id: "req-exterior-photos".to_string(),
                evidence_type: EvidenceKind::Photo,
                doc_type: None,
                min_count: 2,
                is_required: true,
                tags: [("view".to_string(), "exterior".to_string())]
                    .into_iter()
                    .collect(),
                label: "Exterior photos".to_string(),
            },
        ],
        field_evidence_linked_keys: None,
    }
}
