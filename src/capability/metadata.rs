//! Capability metadata records.
//!
//! The typed representation of one capability declaration. Records are built
//! by the parser, validated once, and never mutated afterwards; changing a
//! capability means editing its backing declaration and reloading the store.

use crate::types::CapabilityId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// What kind of behavior unit a capability is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    Skill,
    Workflow,
    Command,
    Agent,
}

impl CapabilityKind {
    /// Category segment used when qualifying bare names into ids.
    pub fn category(&self) -> &'static str {
        match self {
            CapabilityKind::Skill => "skills",
            CapabilityKind::Workflow => "workflows",
            CapabilityKind::Command => "commands",
            CapabilityKind::Agent => "agents",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CapabilityKind::Skill => "skill",
            CapabilityKind::Workflow => "workflow",
            CapabilityKind::Command => "command",
            CapabilityKind::Agent => "agent",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for CapabilityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skill" => Ok(CapabilityKind::Skill),
            "workflow" => Ok(CapabilityKind::Workflow),
            "command" => Ok(CapabilityKind::Command),
            "agent" => Ok(CapabilityKind::Agent),
            other => Err(format!(
                "unknown kind '{}' (expected skill, workflow, command, or agent)",
                other
            )),
        }
    }
}

/// Maturity of a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityStatus {
    Stable,
    Beta,
    Experimental,
    Deprecated,
}

impl fmt::Display for CapabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CapabilityStatus::Stable => "stable",
            CapabilityStatus::Beta => "beta",
            CapabilityStatus::Experimental => "experimental",
            CapabilityStatus::Deprecated => "deprecated",
        };
        f.write_str(s)
    }
}

/// The three disjoint dependency buckets of a capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySet {
    /// Must always be present when this capability is selected.
    #[serde(default)]
    pub required: BTreeSet<CapabilityId>,
    /// Enhance behavior if present; pulled in only on request.
    #[serde(default)]
    pub optional: BTreeSet<CapabilityId>,
    /// Informational only, never auto-included.
    #[serde(default)]
    pub suggested: BTreeSet<CapabilityId>,
}

impl DependencySet {
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.optional.is_empty() && self.suggested.is_empty()
    }
}

/// Free-form relevance triggers and contexts. Never interpreted
/// programmatically by the composition engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relevance {
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub contexts: Vec<String>,
}

/// Kind-specific extension fields. Additive; the composition engine ignores
/// them entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindDetails {
    Skill,
    Workflow {
        /// Ordered workflow step descriptions.
        steps: Vec<String>,
    },
    Command {
        /// Declared side effects of running the command.
        side_effects: Vec<String>,
    },
    Agent {
        /// Roles the agent assumes by default.
        default_roles: Vec<String>,
    },
}

/// One capability's declaration, fully parsed and structurally valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityMetadata {
    /// Derived `category/name` identifier.
    pub id: CapabilityId,
    pub name: String,
    pub kind: CapabilityKind,
    /// Semantic version string, validated as MAJOR.MINOR.PATCH but never
    /// range-matched.
    pub version: String,
    pub status: CapabilityStatus,
    pub description: String,
    pub category: String,
    pub author: String,
    /// `YYYY-MM-DD`, informational.
    pub last_updated: String,
    pub tags: Vec<String>,
    pub dependencies: DependencySet,
    /// Ids that must never co-occur with this capability in a resolved
    /// selection.
    pub conflicts: BTreeSet<CapabilityId>,
    /// Drives recommendations only; carries no resolution obligation.
    pub composable_with: BTreeSet<CapabilityId>,
    pub agent_roles: Vec<String>,
    pub relevance: Relevance,
    /// Paths the capability bundle expects in the consuming project.
    /// Advisory to the external scaffolding collaborator.
    pub required_files: Vec<String>,
    pub optional_files: Vec<String>,
    pub details: KindDetails,
    /// Unknown top-level keys, preserved opaquely for forward compatibility.
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl CapabilityMetadata {
    /// All outbound references this record makes to other capabilities.
    pub fn referenced_ids(&self) -> BTreeSet<&CapabilityId> {
        self.dependencies
            .required
            .iter()
            .chain(self.dependencies.optional.iter())
            .chain(self.dependencies.suggested.iter())
            .chain(self.conflicts.iter())
            .chain(self.composable_with.iter())
            .collect()
    }

    /// Whether this record declares a conflict against `other`.
    pub fn conflicts_with(&self, other: &CapabilityId) -> bool {
        self.conflicts.contains(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(id: &str, kind: CapabilityKind) -> CapabilityMetadata {
        let id = CapabilityId::from(id);
        CapabilityMetadata {
            name: id.as_str().split('/').last().unwrap().to_string(),
            category: kind.category().to_string(),
            id,
            kind,
            version: "1.0.0".to_string(),
            status: CapabilityStatus::Stable,
            description: String::new(),
            author: "tests".to_string(),
            last_updated: "2026-01-01".to_string(),
            tags: Vec::new(),
            dependencies: DependencySet::default(),
            conflicts: BTreeSet::new(),
            composable_with: BTreeSet::new(),
            agent_roles: Vec::new(),
            relevance: Relevance::default(),
            required_files: Vec::new(),
            optional_files: Vec::new(),
            details: KindDetails::Skill,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_kind_category() {
        assert_eq!(CapabilityKind::Skill.category(), "skills");
        assert_eq!(CapabilityKind::Workflow.category(), "workflows");
        assert_eq!(CapabilityKind::Command.category(), "commands");
        assert_eq!(CapabilityKind::Agent.category(), "agents");
    }

    #[test]
    fn test_kind_from_str_round_trips_display() {
        for kind in [
            CapabilityKind::Skill,
            CapabilityKind::Workflow,
            CapabilityKind::Command,
            CapabilityKind::Agent,
        ] {
            assert_eq!(kind.to_string().parse::<CapabilityKind>(), Ok(kind));
        }
        let err = "plugin".parse::<CapabilityKind>().unwrap_err();
        assert!(err.contains("plugin"));
    }

    #[test]
    fn test_referenced_ids_unions_all_buckets() {
        let mut meta = minimal("skills/debugging", CapabilityKind::Skill);
        meta.dependencies
            .required
            .insert(CapabilityId::from("skills/a"));
        meta.dependencies
            .suggested
            .insert(CapabilityId::from("skills/b"));
        meta.conflicts.insert(CapabilityId::from("skills/c"));
        meta.composable_with.insert(CapabilityId::from("skills/d"));

        let refs = meta.referenced_ids();
        assert_eq!(refs.len(), 4);
        assert!(refs.contains(&CapabilityId::from("skills/a")));
        assert!(refs.contains(&CapabilityId::from("skills/c")));
    }

    #[test]
    fn test_conflicts_with() {
        let mut meta = minimal("skills/cowboy-coding", CapabilityKind::Skill);
        meta.conflicts.insert(CapabilityId::from("skills/testing"));
        assert!(meta.conflicts_with(&CapabilityId::from("skills/testing")));
        assert!(!meta.conflicts_with(&CapabilityId::from("skills/debugging")));
    }
}
