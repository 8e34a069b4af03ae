//! Dependency resolution: closure of a selection under `required` edges.

use crate::capability::CapabilityStore;
use crate::types::CapabilityId;
use std::collections::{BTreeSet, VecDeque};

/// Options for a resolution pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Also follow `optional` dependency edges.
    pub include_optional: bool,
}

/// Breadth-first closure of `selection` under required (and, on request,
/// optional) dependencies.
///
/// Ids referenced but absent from the store are carried into the result
/// as-is; resolution never raises on a missing id. Missing ids are surfaced
/// separately by validation. The result is a set, so output is deterministic
/// for identical input regardless of traversal order.
pub fn resolve_dependencies(
    store: &CapabilityStore,
    selection: &BTreeSet<CapabilityId>,
    options: ResolveOptions,
) -> BTreeSet<CapabilityId> {
    let mut resolved = selection.clone();
    let mut queue: VecDeque<CapabilityId> = selection.iter().cloned().collect();

    while let Some(id) = queue.pop_front() {
        // Absent ids stay in the result but contribute no edges.
        let meta = match store.get(&id) {
            Some(m) => m,
            None => continue,
        };
        let optional = if options.include_optional {
            Some(meta.dependencies.optional.iter())
        } else {
            None
        };
        for dep in meta
            .dependencies
            .required
            .iter()
            .chain(optional.into_iter().flatten())
        {
            if resolved.insert(dep.clone()) {
                queue.push_back(dep.clone());
            }
        }
    }

    resolved
}
