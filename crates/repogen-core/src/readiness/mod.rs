//! Completeness scoring for report contracts and their attached evidence.
//!
//! Pure computation: no I/O, no shared state, and no failure path. Malformed
//! input counts as "not satisfied" rather than raising, so every call yields
//! a well-formed [`ReadinessResult`].

mod contract;
mod profile;
mod rules;

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub use contract::{EvidenceItem, EvidenceKind, ReportContract, Section};
pub use profile::{EvidenceProfileConfig, EvidenceProfileRequirement};
pub use rules::ReportType;

use rules::{field_satisfied, rule_set};

/// Outcome of one readiness evaluation. Recomputed on every call, never
/// persisted. List fields preserve the declaration order of the rule tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessResult {
    /// 0-100. Exactly 100 only when every field predicate and every evidence
    /// minimum is satisfied. Warnings do not affect this number.
    pub completeness_score: u8,
    pub missing_fields: Vec<String>,
    pub missing_evidence: Vec<String>,
    pub missing_field_evidence_links: BTreeSet<String>,
    pub warnings: Vec<String>,
    pub required_evidence_minimums: BTreeMap<String, u32>,
}

/// Score whether `contract` plus `evidence` is complete enough to render.
///
/// `rule_warnings` are advisory strings from the tenant rule engine, passed
/// through ahead of any warnings generated here. A supplied `profile`
/// supersedes the static evidence minimums for the report type.
pub fn evaluate(
    report_type: ReportType,
    contract: &ReportContract,
    evidence: &[EvidenceItem],
    rule_warnings: &[String],
    profile: Option<&EvidenceProfileConfig>,
) -> ReadinessResult {
    let rules = rule_set(report_type);

    let mut satisfied = 0usize;
    let mut total = rules.fields.len();
    let mut missing_fields = Vec::new();

    for check in rules.fields {
        if field_satisfied(check, contract) {
            satisfied += 1;
        } else {
            missing_fields.push(check.message.to_string());
        }
    }

    let mut missing_evidence = Vec::new();
    let mut required_evidence_minimums = BTreeMap::new();

    let profile_requirements = profile
        .map(|p| p.requirements.as_slice())
        .unwrap_or_default();

    if profile_requirements.is_empty() {
        for minimum in rules.evidence {
            total += 1;
            required_evidence_minimums.insert(minimum.key.to_string(), minimum.min);
            let found = evidence
                .iter()
                .filter(|item| minimum.kinds.contains(&item.kind))
                .count() as u32;
            if found >= minimum.min {
                satisfied += 1;
            } else {
                missing_evidence.push(format!(
                    "{}: need at least {}, found {}",
                    minimum.key, minimum.min, found
                ));
            }
        }
    } else {
        for requirement in profile_requirements {
            required_evidence_minimums.insert(requirement.label.clone(), requirement.min_count);
            let found = evidence
                .iter()
                .filter(|item| requirement.matches(item))
                .count() as u32;
            // Optional requirements inform the minimums map but never gate
            // the score.
            if !requirement.is_required {
                continue;
            }
            total += 1;
            if found >= requirement.min_count {
                satisfied += 1;
            } else {
                missing_evidence.push(format!(
                    "{}: need at least {}, found {}",
                    requirement.label, requirement.min_count, found
                ));
            }
        }
    }

    let mut warnings: Vec<String> = rule_warnings.to_vec();

    // Field-evidence links are checked only for keys in the static
    // checklist; a field can be filled in yet still lack its required
    // supporting attachment.
    let mut missing_field_evidence_links = BTreeSet::new();
    if let Some(linked) = profile.and_then(|p| p.field_evidence_linked_keys.as_ref()) {
        // The warning lists keys in checklist declaration order, like every
        // other message this evaluation emits.
        let mut unlinked: Vec<&str> = Vec::new();
        for check in rules.fields {
            if !linked.iter().any(|key| key == check.key) {
                unlinked.push(check.key);
                missing_field_evidence_links.insert(check.key.to_string());
            }
        }
        if !unlinked.is_empty() {
            warnings.push(format!(
                "Field evidence links missing: {}",
                unlinked.join(", ")
            ));
        }
    }

    if contract.annexures.is_empty() {
        warnings.push("No annexures attached to this report".to_string());
    }

    let completeness_score = if total == 0 {
        100
    } else {
        ((satisfied as f64 / total as f64) * 100.0).round() as u8
    };

    ReadinessResult {
        completeness_score,
        missing_fields,
        missing_evidence,
        missing_field_evidence_links,
        warnings,
        required_evidence_minimums,
    }
}
