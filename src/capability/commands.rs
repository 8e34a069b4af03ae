//! Capability command service: single entry point per capability CLI command
//! variant.

use crate::capability::metadata::{CapabilityKind, CapabilityMetadata};
use crate::capability::store::CapabilityStore;
use crate::capability::validator;
use crate::error::LoadoutError;
use crate::types::{CapabilityId, Diagnostic};

pub struct CapabilityCommandService;

/// Result of capability list command.
#[derive(Debug, Clone)]
pub struct CapabilityListResult {
    pub capabilities: Vec<CapabilityMetadata>,
}

/// Result of capability show command.
#[derive(Debug, Clone)]
pub struct CapabilityShowResult {
    pub metadata: CapabilityMetadata,
}

/// Result of capability validate, one entry per capability with findings.
#[derive(Debug, Clone)]
pub struct CapabilityValidateResult {
    pub checked: usize,
    pub findings: Vec<(CapabilityId, Vec<Diagnostic>)>,
}

impl CapabilityValidateResult {
    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .flat_map(|(_, diags)| diags.iter())
            .filter(|d| d.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .flat_map(|(_, diags)| diags.iter())
            .filter(|d| !d.is_error())
            .count()
    }
}

impl CapabilityCommandService {
    /// List capabilities in id order, optionally filtered by kind.
    pub fn list(
        store: &CapabilityStore,
        kind_filter: Option<&str>,
    ) -> Result<CapabilityListResult, LoadoutError> {
        let kind = kind_filter
            .map(|k| k.parse::<CapabilityKind>())
            .transpose()
            .map_err(|message| LoadoutError::InvalidField {
                field: "kind".to_string(),
                message,
            })?;
        let capabilities = store
            .iter()
            .filter(|m| kind.map(|k| m.kind == k).unwrap_or(true))
            .cloned()
            .collect();
        Ok(CapabilityListResult { capabilities })
    }

    /// Show one capability by id.
    pub fn show(
        store: &CapabilityStore,
        id: &CapabilityId,
    ) -> Result<CapabilityShowResult, LoadoutError> {
        let metadata = store.get_metadata(id)?.clone();
        Ok(CapabilityShowResult { metadata })
    }

    /// Validate a single capability against the full store.
    pub fn validate_single(
        store: &CapabilityStore,
        id: &CapabilityId,
    ) -> Result<CapabilityValidateResult, LoadoutError> {
        let metadata = store.get_metadata(id)?;
        let diagnostics = validator::validate_record(metadata, store);
        let findings = if diagnostics.is_empty() {
            Vec::new()
        } else {
            vec![(id.clone(), diagnostics)]
        };
        Ok(CapabilityValidateResult {
            checked: 1,
            findings,
        })
    }

    /// Validate every capability in the store.
    pub fn validate_all(store: &CapabilityStore) -> Result<CapabilityValidateResult, LoadoutError> {
        Ok(CapabilityValidateResult {
            checked: store.len(),
            findings: validator::validate_store(store),
        })
    }
}
