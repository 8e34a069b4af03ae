//! Composability recommendations for a selection.

use crate::capability::CapabilityStore;
use crate::types::CapabilityId;
use std::collections::BTreeSet;

/// Union of `composable_with` across the selection, minus the selection
/// itself.
///
/// Deduplicated and sorted by capability id for deterministic output. Purely
/// advisory; recommendations are never auto-applied.
pub fn recommendations(
    store: &CapabilityStore,
    selection: &BTreeSet<CapabilityId>,
) -> Vec<CapabilityId> {
    let mut recommended = BTreeSet::new();
    for id in selection {
        if let Some(meta) = store.get(id) {
            for candidate in &meta.composable_with {
                if !selection.contains(candidate) {
                    recommended.insert(candidate.clone());
                }
            }
        }
    }
    recommended.into_iter().collect()
}
