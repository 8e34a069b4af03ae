//! Agent command service: single entry point per agent CLI command variant.
//!
//! Owns all agent workflow logic; CLI parses, calls one method per variant,
//! and formats output.

use crate::agent::domain::{AgentConfiguration, AgentStatus, CapabilitySelection};
use crate::agent::manager::{AgentConfigManager, ValidationReport};
use crate::error::LoadoutError;
use crate::types::CapabilityId;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub struct AgentCommandService;

/// Result of agent list command.
#[derive(Debug, Clone)]
pub struct AgentListResult {
    pub agents: Vec<AgentListItem>,
}

#[derive(Debug, Clone)]
pub struct AgentListItem {
    pub name: String,
    pub description: String,
    pub status: AgentStatus,
    pub capability_count: usize,
}

/// Result of agent show command.
#[derive(Debug, Clone)]
pub struct AgentShowResult {
    pub config: AgentConfiguration,
    pub path: PathBuf,
}

/// Result of agent create command.
#[derive(Debug, Clone)]
pub struct AgentCreateResult {
    pub name: String,
    pub config_path: PathBuf,
}

/// Result of agent validate command.
#[derive(Debug, Clone)]
pub struct AgentValidateResult {
    pub report: ValidationReport,
}

/// Result of agent resolve command.
#[derive(Debug, Clone)]
pub struct AgentResolveResult {
    pub name: String,
    pub selected: BTreeSet<CapabilityId>,
    pub resolved: BTreeSet<CapabilityId>,
}

/// Result of agent recommend command.
#[derive(Debug, Clone)]
pub struct AgentRecommendResult {
    pub name: String,
    pub recommendations: Vec<CapabilityId>,
}

/// Result of agent remove command.
#[derive(Debug, Clone)]
pub struct AgentRemoveResult {
    pub name: String,
    pub config_path: PathBuf,
}

/// Fields supplied by the caller when creating a configuration.
#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    pub name: String,
    pub description: String,
    pub version: Option<String>,
    pub author: Option<String>,
    pub skills: Vec<String>,
    pub workflows: Vec<String>,
    pub commands: Vec<String>,
    pub tags: Vec<String>,
}

impl AgentCommandService {
    /// List stored configurations.
    pub fn list(manager: &AgentConfigManager) -> Result<AgentListResult, LoadoutError> {
        let stored = manager.list()?;
        let agents = stored
            .into_iter()
            .map(|s| AgentListItem {
                name: s.name,
                description: s.config.description.clone(),
                status: s.config.status,
                capability_count: s.config.selection().len(),
            })
            .collect();
        Ok(AgentListResult { agents })
    }

    /// Show one configuration.
    pub fn show(
        manager: &AgentConfigManager,
        name: &str,
    ) -> Result<AgentShowResult, LoadoutError> {
        let config = manager.load(name)?;
        let path = manager.path_for(name);
        Ok(AgentShowResult { config, path })
    }

    /// Create a configuration from caller-supplied fields. The creation date
    /// is today; version defaults to 0.1.0.
    pub fn create(
        manager: &AgentConfigManager,
        request: CreateRequest,
    ) -> Result<AgentCreateResult, LoadoutError> {
        let config = AgentConfiguration {
            name: request.name,
            version: request.version.unwrap_or_else(|| "0.1.0".to_string()),
            description: request.description,
            created: chrono::Local::now().format("%Y-%m-%d").to_string(),
            author: request.author,
            capabilities: CapabilitySelection {
                skills: request.skills,
                workflows: request.workflows,
                commands: request.commands,
            },
            context_priority: Vec::new(),
            agent_instructions: Vec::new(),
            required_files: Vec::new(),
            optional_files: Vec::new(),
            tags: request.tags,
            status: AgentStatus::default(),
        };
        let name = config.name.clone();
        manager.create(config)?;
        let config_path = manager.path_for(&name);
        Ok(AgentCreateResult { name, config_path })
    }

    /// Validate one configuration against the capability store.
    pub fn validate(
        manager: &AgentConfigManager,
        name: &str,
    ) -> Result<AgentValidateResult, LoadoutError> {
        let report = manager.validate(name)?;
        Ok(AgentValidateResult { report })
    }

    /// Resolve the full dependency closure of a configuration's selection.
    pub fn resolve(
        manager: &AgentConfigManager,
        name: &str,
        include_optional: bool,
    ) -> Result<AgentResolveResult, LoadoutError> {
        let config = manager.load(name)?;
        let selected = config.selection();
        let resolved = manager.resolve(name, include_optional)?;
        Ok(AgentResolveResult {
            name: name.to_string(),
            selected,
            resolved,
        })
    }

    /// Recommendations for a configuration's selection.
    pub fn recommend(
        manager: &AgentConfigManager,
        name: &str,
    ) -> Result<AgentRecommendResult, LoadoutError> {
        let recommendations = manager.recommend(name)?;
        Ok(AgentRecommendResult {
            name: name.to_string(),
            recommendations,
        })
    }

    /// Remove a configuration.
    pub fn remove(
        manager: &AgentConfigManager,
        name: &str,
    ) -> Result<AgentRemoveResult, LoadoutError> {
        let config_path = manager.path_for(name);
        manager.delete(name)?;
        Ok(AgentRemoveResult {
            name: name.to_string(),
            config_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::repository::FsAgentRepository;
    use crate::capability::{
        CapabilityKind, CapabilityMetadata, CapabilityStatus, CapabilityStore, KindDetails,
    };
    use std::sync::Arc;
    use tempfile::TempDir;

    fn capability(id: &str) -> CapabilityMetadata {
        let (category, name) = id.split_once('/').unwrap();
        CapabilityMetadata {
            id: CapabilityId::from(id),
            name: name.to_string(),
            kind: CapabilityKind::Skill,
            version: "1.0.0".to_string(),
            status: CapabilityStatus::Stable,
            description: String::new(),
            category: category.to_string(),
            author: String::new(),
            last_updated: "2026-01-01".to_string(),
            tags: Vec::new(),
            dependencies: Default::default(),
            conflicts: Default::default(),
            composable_with: Default::default(),
            agent_roles: Vec::new(),
            relevance: Default::default(),
            required_files: Vec::new(),
            optional_files: Vec::new(),
            details: KindDetails::Skill,
            extra: Default::default(),
        }
    }

    fn manager(dir: &TempDir) -> AgentConfigManager {
        let store = Arc::new(CapabilityStore::from_records(vec![
            capability("skills/debugging"),
            capability("skills/testing"),
        ]));
        AgentConfigManager::new(store, Arc::new(FsAgentRepository::new(dir.path())))
    }

    fn request(name: &str) -> CreateRequest {
        CreateRequest {
            name: name.to_string(),
            description: "test agent".to_string(),
            skills: vec!["debugging".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_create_fills_date_and_version() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);

        let result = AgentCommandService::create(&mgr, request("reviewer")).unwrap();
        assert_eq!(result.name, "reviewer");
        assert!(result.config_path.ends_with("reviewer.yaml"));

        let shown = AgentCommandService::show(&mgr, "reviewer").unwrap();
        assert_eq!(shown.config.version, "0.1.0");
        assert_eq!(shown.config.created.len(), 10);
    }

    #[test]
    fn test_list_counts_capabilities() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        AgentCommandService::create(&mgr, request("reviewer")).unwrap();

        let listed = AgentCommandService::list(&mgr).unwrap();
        assert_eq!(listed.agents.len(), 1);
        assert_eq!(listed.agents[0].capability_count, 1);
    }

    #[test]
    fn test_remove_then_show_fails() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        AgentCommandService::create(&mgr, request("reviewer")).unwrap();

        AgentCommandService::remove(&mgr, "reviewer").unwrap();
        assert!(matches!(
            AgentCommandService::show(&mgr, "reviewer"),
            Err(LoadoutError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_and_recommend_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        AgentCommandService::create(&mgr, request("reviewer")).unwrap();

        let resolved = AgentCommandService::resolve(&mgr, "reviewer", false).unwrap();
        assert_eq!(resolved.selected, resolved.resolved);

        let recommended = AgentCommandService::recommend(&mgr, "reviewer").unwrap();
        assert!(recommended.recommendations.is_empty());
    }
}
