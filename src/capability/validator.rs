//! Semantic validation over a loaded capability store.
//!
//! Everything here is a soft warning: the record loads anyway and the finding
//! is reported as data. Hard structural problems are caught earlier by the
//! parser. Dangling references are tolerated ("externally declared, not yet
//! loaded") because some deployments load the store incrementally.

use crate::capability::metadata::CapabilityMetadata;
use crate::capability::store::CapabilityStore;
use crate::types::{CapabilityId, Diagnostic};

/// Run the semantic pass for every record in the store.
///
/// Returns one entry per capability that produced at least one finding.
pub fn validate_store(store: &CapabilityStore) -> Vec<(CapabilityId, Vec<Diagnostic>)> {
    let mut report = Vec::new();
    for meta in store.iter() {
        let findings = validate_record(meta, store);
        if !findings.is_empty() {
            report.push((meta.id.clone(), findings));
        }
    }
    report
}

/// Semantic checks for a single record against the full store.
pub fn validate_record(meta: &CapabilityMetadata, store: &CapabilityStore) -> Vec<Diagnostic> {
    let mut findings = Vec::new();

    if meta.tags.is_empty() {
        findings.push(Diagnostic::warning(
            format!("capability '{}' declares no tags", meta.id),
            vec![meta.id.clone()],
        ));
    }

    if meta.relevance.triggers.is_empty() {
        findings.push(Diagnostic::warning(
            format!("capability '{}' declares no relevance triggers", meta.id),
            vec![meta.id.clone()],
        ));
    }

    if !meta.last_updated.is_empty()
        && chrono::NaiveDate::parse_from_str(&meta.last_updated, "%Y-%m-%d").is_err()
    {
        findings.push(Diagnostic::warning(
            format!(
                "capability '{}' has last_updated '{}' not in YYYY-MM-DD form",
                meta.id, meta.last_updated
            ),
            vec![meta.id.clone()],
        ));
    }

    for reference in meta.referenced_ids() {
        if !store.contains(reference) {
            findings.push(Diagnostic::warning(
                format!(
                    "capability '{}' references '{}' which is not in the store (externally declared, not yet loaded)",
                    meta.id, reference
                ),
                vec![meta.id.clone(), reference.clone()],
            ));
        }
    }

    for conflict in &meta.conflicts {
        if let Some(other) = store.get(conflict) {
            if !other.conflicts_with(&meta.id) {
                findings.push(Diagnostic::warning(
                    format!(
                        "conflict between '{}' and '{}' is declared only by '{}'",
                        meta.id, conflict, meta.id
                    ),
                    vec![meta.id.clone(), conflict.clone()],
                ));
            }
        }
    }

    for context in &meta.relevance.contexts {
        if looks_like_file_reference(context) && !file_guidance_covers(meta, context) {
            findings.push(Diagnostic::warning(
                format!(
                    "capability '{}' references file '{}' with no required_files/optional_files guidance",
                    meta.id, context
                ),
                vec![meta.id.clone()],
            ));
        }
    }

    findings
}

/// Relevance contexts are free-form; only entries that look like concrete
/// file paths get the guidance check.
fn looks_like_file_reference(context: &str) -> bool {
    context.contains('/') || context.contains('.')
}

fn file_guidance_covers(meta: &CapabilityMetadata, context: &str) -> bool {
    meta.required_files.iter().any(|f| f == context)
        || meta.optional_files.iter().any(|f| f == context)
}
