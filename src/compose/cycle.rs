//! Circular dependency detection along `required` edges.

use crate::capability::CapabilityStore;
use crate::types::CapabilityId;
use std::collections::BTreeSet;

/// Per-call traversal context.
///
/// Each invocation owns its own path and visited set, so repeated calls are
/// independent and concurrent callers over a shared read-only store never
/// interfere.
#[derive(Debug, Default)]
struct TraversalContext {
    path: Vec<CapabilityId>,
    visited: BTreeSet<CapabilityId>,
}

/// Depth-first search for a cycle reachable from `root` via `required` edges.
///
/// On success returns the cycle itself in traversal order, starting and
/// ending at the repeated capability (e.g. `[a, b, c, a]`). Shared-but-acyclic
/// diamonds are not cycles: a node already fully explored off the current
/// path is skipped, not reported.
pub fn detect_circular_dependencies(
    store: &CapabilityStore,
    root: &CapabilityId,
) -> Option<Vec<CapabilityId>> {
    let mut ctx = TraversalContext::default();
    visit(store, root, &mut ctx)
}

fn visit(
    store: &CapabilityStore,
    id: &CapabilityId,
    ctx: &mut TraversalContext,
) -> Option<Vec<CapabilityId>> {
    if let Some(pos) = ctx.path.iter().position(|p| p == id) {
        let mut cycle = ctx.path[pos..].to_vec();
        cycle.push(id.clone());
        return Some(cycle);
    }
    // Already explored via another branch; acyclic from here.
    if !ctx.visited.insert(id.clone()) {
        return None;
    }

    ctx.path.push(id.clone());
    if let Some(meta) = store.get(id) {
        for dep in &meta.dependencies.required {
            if let Some(cycle) = visit(store, dep, ctx) {
                return Some(cycle);
            }
        }
    }
    ctx.path.pop();
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::parser::parse_str;
    use std::path::PathBuf;

    fn store(docs: &[(&str, &[&str])]) -> CapabilityStore {
        let records = docs.iter().map(|(name, required)| {
            let deps = if required.is_empty() {
                String::new()
            } else {
                format!("dependencies:\n  required: [{}]\n", required.join(", "))
            };
            let content = format!(
                "name: {}\ntype: skill\nversion: 1.0.0\ncategory: skills\nstatus: stable\ntags: [x]\nrelevance:\n  triggers: [t]\n{}",
                name, deps
            );
            parse_str(&content, &PathBuf::from(format!("{}.yaml", name))).unwrap()
        });
        CapabilityStore::from_records(records)
    }

    #[test]
    fn test_three_node_cycle_returned_in_order() {
        let store = store(&[
            ("a", &["skills/b"]),
            ("b", &["skills/c"]),
            ("c", &["skills/a"]),
        ]);
        let cycle = detect_circular_dependencies(&store, &CapabilityId::from("skills/a")).unwrap();
        let as_strs: Vec<&str> = cycle.iter().map(|id| id.as_str()).collect();
        assert_eq!(as_strs, vec!["skills/a", "skills/b", "skills/c", "skills/a"]);
    }

    #[test]
    fn test_self_cycle() {
        let store = store(&[("a", &["skills/a"])]);
        let cycle = detect_circular_dependencies(&store, &CapabilityId::from("skills/a")).unwrap();
        assert_eq!(cycle.len(), 2);
        assert_eq!(cycle[0], cycle[1]);
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        // D requires B and C; B and C both require A.
        let store = store(&[
            ("d", &["skills/b", "skills/c"]),
            ("b", &["skills/a"]),
            ("c", &["skills/a"]),
            ("a", &[]),
        ]);
        for root in ["skills/a", "skills/b", "skills/c", "skills/d"] {
            assert!(
                detect_circular_dependencies(&store, &CapabilityId::from(root)).is_none(),
                "false cycle from root {}",
                root
            );
        }
    }

    #[test]
    fn test_cycle_not_through_root_still_found() {
        let store = store(&[
            ("entry", &["skills/a"]),
            ("a", &["skills/b"]),
            ("b", &["skills/a"]),
        ]);
        let cycle =
            detect_circular_dependencies(&store, &CapabilityId::from("skills/entry")).unwrap();
        let as_strs: Vec<&str> = cycle.iter().map(|id| id.as_str()).collect();
        assert_eq!(as_strs, vec!["skills/a", "skills/b", "skills/a"]);
    }

    #[test]
    fn test_missing_root_has_no_cycle() {
        let store = store(&[("a", &[])]);
        assert!(
            detect_circular_dependencies(&store, &CapabilityId::from("skills/ghost")).is_none()
        );
    }

    #[test]
    fn test_optional_edges_do_not_form_cycles() {
        let records = ["a", "b"].iter().map(|name| {
            let other = if *name == "a" { "b" } else { "a" };
            let content = format!(
                "name: {}\ntype: skill\nversion: 1.0.0\ncategory: skills\nstatus: stable\ntags: [x]\nrelevance:\n  triggers: [t]\ndependencies:\n  optional: [skills/{}]\n",
                name, other
            );
            parse_str(&content, &PathBuf::from(format!("{}.yaml", name))).unwrap()
        });
        let store = CapabilityStore::from_records(records);
        assert!(detect_circular_dependencies(&store, &CapabilityId::from("skills/a")).is_none());
    }
}
