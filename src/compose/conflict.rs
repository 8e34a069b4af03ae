//! Conflict detection over a selection.

use crate::capability::CapabilityStore;
use crate::types::CapabilityId;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Which side(s) of a pair declared the conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictDeclaredBy {
    First,
    Second,
    Both,
}

/// One conflicting unordered pair within a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictPair {
    pub first: CapabilityId,
    pub second: CapabilityId,
    pub declared_by: ConflictDeclaredBy,
}

impl ConflictPair {
    pub fn reason(&self) -> String {
        match self.declared_by {
            ConflictDeclaredBy::First => {
                format!("'{}' declares a conflict with '{}'", self.first, self.second)
            }
            ConflictDeclaredBy::Second => {
                format!("'{}' declares a conflict with '{}'", self.second, self.first)
            }
            ConflictDeclaredBy::Both => format!(
                "'{}' and '{}' declare a mutual conflict",
                self.first, self.second
            ),
        }
    }
}

impl fmt::Display for ConflictPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

/// Report every conflicting pair in `selection`.
///
/// Each unordered pair appears at most once, whether the conflict is declared
/// on one side or both. Ids absent from the store contribute nothing (a
/// missing id cannot declare a conflict). Output is ordered by pair, so
/// identical input yields identical output.
pub fn detect_conflicts(
    store: &CapabilityStore,
    selection: &BTreeSet<CapabilityId>,
) -> Vec<ConflictPair> {
    let ids: Vec<&CapabilityId> = selection.iter().collect();
    let mut conflicts = Vec::new();

    for (i, first) in ids.iter().enumerate() {
        for second in ids.iter().skip(i + 1) {
            let first_declares = store
                .get(first)
                .map(|m| m.conflicts_with(second))
                .unwrap_or(false);
            let second_declares = store
                .get(second)
                .map(|m| m.conflicts_with(first))
                .unwrap_or(false);

            let declared_by = match (first_declares, second_declares) {
                (true, true) => ConflictDeclaredBy::Both,
                (true, false) => ConflictDeclaredBy::First,
                (false, true) => ConflictDeclaredBy::Second,
                (false, false) => continue,
            };
            conflicts.push(ConflictPair {
                first: (*first).clone(),
                second: (*second).clone(),
                declared_by,
            });
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::parser::parse_str;
    use std::path::PathBuf;

    fn store(docs: &[(&str, &str)]) -> CapabilityStore {
        let records = docs.iter().map(|(name, body)| {
            let content = format!(
                "name: {}\ntype: skill\nversion: 1.0.0\ncategory: skills\nstatus: stable\ntags: [x]\nrelevance:\n  triggers: [t]\n{}",
                name, body
            );
            parse_str(&content, &PathBuf::from(format!("{}.yaml", name))).unwrap()
        });
        CapabilityStore::from_records(records)
    }

    fn selection(ids: &[&str]) -> BTreeSet<CapabilityId> {
        ids.iter().map(|id| CapabilityId::from(*id)).collect()
    }

    #[test]
    fn test_one_directional_conflict_reported_once() {
        let store = store(&[
            ("cowboy-coding", "conflicts: [skills/testing]\n"),
            ("testing", ""),
        ]);
        let found = detect_conflicts(
            &store,
            &selection(&["skills/cowboy-coding", "skills/testing"]),
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].declared_by, ConflictDeclaredBy::First);
        assert!(found[0].reason().contains("skills/cowboy-coding"));
    }

    #[test]
    fn test_bidirectional_conflict_reported_once() {
        let store = store(&[
            ("cowboy-coding", "conflicts: [skills/testing]\n"),
            ("testing", "conflicts: [skills/cowboy-coding]\n"),
        ]);
        let found = detect_conflicts(
            &store,
            &selection(&["skills/cowboy-coding", "skills/testing"]),
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].declared_by, ConflictDeclaredBy::Both);
    }

    #[test]
    fn test_no_conflict_when_other_side_absent_from_selection() {
        let store = store(&[
            ("cowboy-coding", "conflicts: [skills/testing]\n"),
            ("testing", ""),
            ("debugging", ""),
        ]);
        let found = detect_conflicts(
            &store,
            &selection(&["skills/cowboy-coding", "skills/debugging"]),
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_empty_and_singleton_selections_never_conflict() {
        let store = store(&[("cowboy-coding", "conflicts: [skills/cowboy-coding]\n")]);
        assert!(detect_conflicts(&store, &BTreeSet::new()).is_empty());
        assert!(detect_conflicts(&store, &selection(&["skills/cowboy-coding"])).is_empty());
    }

    #[test]
    fn test_missing_id_cannot_conflict() {
        let store = store(&[("testing", "")]);
        let found = detect_conflicts(
            &store,
            &selection(&["skills/testing", "skills/ghost"]),
        );
        assert!(found.is_empty());
    }
}
