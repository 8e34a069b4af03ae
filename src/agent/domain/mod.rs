//! Agent configuration domain model.

pub mod validation;

pub use validation::validate_configuration;

use crate::types::CapabilityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Lifecycle status of an agent configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    #[default]
    Active,
    Inactive,
    Experimental,
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgentStatus::Active => "active",
            AgentStatus::Inactive => "inactive",
            AgentStatus::Experimental => "experimental",
        };
        f.write_str(s)
    }
}

/// Capability selection partitioned by kind for file ergonomics.
///
/// Entries are bare capability names; the manager qualifies them into full
/// ids (`skills/x`, `workflows/x`, `commands/x`). Logically the three lists
/// are one set union.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySelection {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub workflows: Vec<String>,
    #[serde(default)]
    pub commands: Vec<String>,
}

impl CapabilitySelection {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.workflows.is_empty() && self.commands.is_empty()
    }

    /// The selection as one set of fully-qualified ids.
    pub fn ids(&self) -> BTreeSet<CapabilityId> {
        self.skills
            .iter()
            .map(|n| CapabilityId::qualified("skills", n))
            .chain(
                self.workflows
                    .iter()
                    .map(|n| CapabilityId::qualified("workflows", n)),
            )
            .chain(
                self.commands
                    .iter()
                    .map(|n| CapabilityId::qualified("commands", n)),
            )
            .collect()
    }
}

/// A persisted, named bundle of a capability selection plus free-text
/// guidance fields. One YAML document per configuration name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfiguration {
    /// Unique key in the configuration store.
    pub name: String,
    pub version: String,
    pub description: String,
    /// `YYYY-MM-DD`.
    pub created: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub capabilities: CapabilitySelection,
    /// Ordered list of context sources, highest priority first. Free text.
    #[serde(default)]
    pub context_priority: Vec<String>,
    #[serde(default)]
    pub agent_instructions: Vec<String>,
    /// Paths the capability bundle expects in the consuming project.
    /// Advisory to the external scaffolding collaborator.
    #[serde(default)]
    pub required_files: Vec<String>,
    #[serde(default)]
    pub optional_files: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: AgentStatus,
}

impl AgentConfiguration {
    /// The full selection as qualified capability ids.
    pub fn selection(&self) -> BTreeSet<CapabilityId> {
        self.capabilities.ids()
    }
}
