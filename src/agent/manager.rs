//! Agent configuration manager.
//!
//! Owns the CRUD lifecycle of agent configurations and drives the composition
//! engine when a configuration is validated or resolved. The capability store
//! is shared read-only; the repository is the only mutable resource.

use crate::agent::domain::{validate_configuration, AgentConfiguration};
use crate::agent::repository::{AgentConfigRepository, StoredAgentConfiguration};
use crate::capability::{CapabilityStatus, CapabilityStore};
use crate::compose::{
    detect_circular_dependencies, detect_conflicts, recommendations, resolve_dependencies,
    ResolveOptions,
};
use crate::error::LoadoutError;
use crate::types::{CapabilityId, Diagnostic};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of validating one agent configuration.
///
/// Errors block activation by convention only; callers decide whether to act
/// on them. Recommendations are advisory and never an error.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationReport {
    pub name: String,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub recommendations: Vec<CapabilityId>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// CRUD plus composition-aware validation over stored agent configurations.
pub struct AgentConfigManager {
    store: Arc<CapabilityStore>,
    repository: Arc<dyn AgentConfigRepository>,
}

impl AgentConfigManager {
    pub fn new(store: Arc<CapabilityStore>, repository: Arc<dyn AgentConfigRepository>) -> Self {
        Self { store, repository }
    }

    pub fn capability_store(&self) -> &CapabilityStore {
        &self.store
    }

    /// Storage path for a configuration name, whether or not it exists yet.
    pub fn path_for(&self, name: &str) -> std::path::PathBuf {
        self.repository.path_for(name)
    }

    /// Create a new configuration. Fails with `AlreadyExists` when the name
    /// is taken and with the field errors from
    /// [`validate_configuration`] otherwise.
    pub fn create(&self, config: AgentConfiguration) -> Result<(), LoadoutError> {
        if self.repository.exists(&config.name)? {
            return Err(LoadoutError::AlreadyExists(config.name));
        }
        validate_configuration(&config)?;
        self.repository.save(&config)?;
        info!(agent = %config.name, "created agent configuration");
        Ok(())
    }

    pub fn load(&self, name: &str) -> Result<AgentConfiguration, LoadoutError> {
        match self.repository.load(name)? {
            Some(config) => Ok(config),
            None => Err(LoadoutError::NotFound(name.to_string())),
        }
    }

    pub fn list(&self) -> Result<Vec<StoredAgentConfiguration>, LoadoutError> {
        self.repository.list()
    }

    /// Replace an existing configuration. Fails with `NotFound` when the name
    /// is unknown; field validation applies as for `create`.
    pub fn update(&self, config: AgentConfiguration) -> Result<(), LoadoutError> {
        if !self.repository.exists(&config.name)? {
            return Err(LoadoutError::NotFound(config.name));
        }
        validate_configuration(&config)?;
        self.repository.save(&config)?;
        info!(agent = %config.name, "updated agent configuration");
        Ok(())
    }

    /// Persist without validating. Intermediate or invalid drafts are allowed
    /// here; `validate` is the explicit gate.
    pub fn save(&self, config: &AgentConfiguration) -> Result<(), LoadoutError> {
        self.repository.save(config)
    }

    pub fn delete(&self, name: &str) -> Result<(), LoadoutError> {
        if !self.repository.delete(name)? {
            return Err(LoadoutError::NotFound(name.to_string()));
        }
        info!(agent = %name, "deleted agent configuration");
        Ok(())
    }

    /// Full dependency closure of a stored configuration's selection.
    pub fn resolve(
        &self,
        name: &str,
        include_optional: bool,
    ) -> Result<BTreeSet<CapabilityId>, LoadoutError> {
        let config = self.load(name)?;
        Ok(resolve_dependencies(
            &self.store,
            &config.selection(),
            ResolveOptions { include_optional },
        ))
    }

    /// Recommendations for a stored configuration's selection.
    pub fn recommend(&self, name: &str) -> Result<Vec<CapabilityId>, LoadoutError> {
        let config = self.load(name)?;
        Ok(recommendations(&self.store, &config.selection()))
    }

    /// Validate a stored configuration against the capability store.
    ///
    /// Runs, in order: missing-capability checks over the required closure,
    /// cycle detection from every selected id, conflict detection over the
    /// selection, then recommendations. Never mutates the configuration.
    pub fn validate(&self, name: &str) -> Result<ValidationReport, LoadoutError> {
        let config = self.load(name)?;
        let selection = config.selection();
        debug!(agent = %name, selected = selection.len(), "validating agent configuration");

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // Resolution carries absent ids through; here they become errors, so
        // a missing transitive dependency fails validation the same way a
        // missing selected id does.
        let closure = resolve_dependencies(&self.store, &selection, ResolveOptions::default());
        for id in &closure {
            if !self.store.contains(id) {
                errors.push(Diagnostic::error(
                    format!("capability '{}' not found in store", id),
                    vec![id.clone()],
                ));
            }
        }

        // The same cycle is reachable from each of its members; report it once.
        let mut seen_cycles: BTreeSet<BTreeSet<CapabilityId>> = BTreeSet::new();
        for id in &selection {
            if let Some(cycle) = detect_circular_dependencies(&self.store, id) {
                let members: BTreeSet<CapabilityId> = cycle.iter().cloned().collect();
                if seen_cycles.insert(members) {
                    let path = cycle
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(" -> ");
                    errors.push(Diagnostic::error(
                        format!("circular dependency: {}", path),
                        cycle,
                    ));
                }
            }
        }

        for pair in detect_conflicts(&self.store, &selection) {
            errors.push(Diagnostic::error(
                format!(
                    "conflicting capabilities '{}' and '{}': {}",
                    pair.first,
                    pair.second,
                    pair.reason()
                ),
                vec![pair.first, pair.second],
            ));
        }

        for id in &selection {
            let meta = match self.store.get(id) {
                Some(meta) => meta,
                None => continue,
            };
            if meta.status == CapabilityStatus::Deprecated {
                warnings.push(Diagnostic::warning(
                    format!("capability '{}' is deprecated", id),
                    vec![id.clone()],
                ));
            }
            for suggested in &meta.dependencies.suggested {
                if !selection.contains(suggested) {
                    warnings.push(Diagnostic::warning(
                        format!("'{}' suggests '{}', which is not selected", id, suggested),
                        vec![id.clone(), suggested.clone()],
                    ));
                }
            }
        }

        let recommendations = recommendations(&self.store, &selection);

        Ok(ValidationReport {
            name: config.name,
            errors,
            warnings,
            recommendations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::domain::CapabilitySelection;
    use crate::agent::repository::FsAgentRepository;
    use crate::capability::{CapabilityKind, CapabilityMetadata, KindDetails};
    use tempfile::TempDir;

    fn capability(id: &str, kind: CapabilityKind) -> CapabilityMetadata {
        let (category, name) = id.split_once('/').unwrap();
        CapabilityMetadata {
            id: CapabilityId::from(id),
            name: name.to_string(),
            kind,
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

    fn config(name: &str, skills: &[&str], workflows: &[&str]) -> AgentConfiguration {
        AgentConfiguration {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            description: "test agent".to_string(),
            created: "2026-02-10".to_string(),
            author: None,
            capabilities: CapabilitySelection {
                skills: skills.iter().map(|s| s.to_string()).collect(),
                workflows: workflows.iter().map(|s| s.to_string()).collect(),
                commands: Vec::new(),
            },
            context_priority: Vec::new(),
            agent_instructions: Vec::new(),
            required_files: Vec::new(),
            optional_files: Vec::new(),
            tags: Vec::new(),
            status: Default::default(),
        }
    }

    fn manager(dir: &TempDir, records: Vec<CapabilityMetadata>) -> AgentConfigManager {
        let store = Arc::new(CapabilityStore::from_records(records));
        let repository = Arc::new(FsAgentRepository::new(dir.path()));
        AgentConfigManager::new(store, repository)
    }

    #[test]
    fn test_create_rejects_duplicate_name() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir, vec![capability("skills/debugging", CapabilityKind::Skill)]);

        mgr.create(config("reviewer", &["debugging"], &[])).unwrap();
        match mgr.create(config("reviewer", &["debugging"], &[])) {
            Err(LoadoutError::AlreadyExists(name)) => assert_eq!(name, "reviewer"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_create_rejects_empty_selection() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir, Vec::new());
        assert!(matches!(
            mgr.create(config("reviewer", &[], &[])),
            Err(LoadoutError::EmptySelection(_))
        ));
    }

    #[test]
    fn test_load_and_delete_unknown_fail_with_not_found() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir, Vec::new());
        assert!(matches!(mgr.load("ghost"), Err(LoadoutError::NotFound(_))));
        assert!(matches!(mgr.delete("ghost"), Err(LoadoutError::NotFound(_))));
    }

    #[test]
    fn test_update_requires_existing_name() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir, vec![capability("skills/debugging", CapabilityKind::Skill)]);
        assert!(matches!(
            mgr.update(config("reviewer", &["debugging"], &[])),
            Err(LoadoutError::NotFound(_))
        ));
    }

    #[test]
    fn test_validate_reports_missing_required_dependency() {
        let dir = TempDir::new().unwrap();
        let mut wf = capability("workflows/bug-fix", CapabilityKind::Workflow);
        wf.dependencies
            .required
            .insert(CapabilityId::from("skills/debugging"));
        let mgr = manager(&dir, vec![wf]);

        // The workflow itself is present; its required dependency is not.
        mgr.save(&config("fixer", &[], &["bug-fix"])).unwrap();
        let report = mgr.validate("fixer").unwrap();
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].message.contains("skills/debugging"));

        // Resolution still pulls the absent id through as-is.
        let resolved = mgr.resolve("fixer", false).unwrap();
        assert!(resolved.contains(&CapabilityId::from("skills/debugging")));

        // Selecting the absent id directly reports the same single error.
        mgr.save(&config("eager", &["debugging"], &["bug-fix"])).unwrap();
        let report = mgr.validate("eager").unwrap();
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].message.contains("skills/debugging"));
    }

    #[test]
    fn test_validate_reports_conflict_once_and_no_cycle() {
        let dir = TempDir::new().unwrap();
        let mut cowboy = capability("skills/cowboy-coding", CapabilityKind::Skill);
        cowboy
            .conflicts
            .insert(CapabilityId::from("skills/testing"));
        let testing = capability("skills/testing", CapabilityKind::Skill);
        let mgr = manager(&dir, vec![cowboy, testing]);

        mgr.save(&config("risky", &["cowboy-coding", "testing"], &[]))
            .unwrap();
        let report = mgr.validate("risky").unwrap();
        let conflict_errors: Vec<_> = report
            .errors
            .iter()
            .filter(|d| d.message.contains("conflicting"))
            .collect();
        assert_eq!(conflict_errors.len(), 1);
        assert!(!report
            .errors
            .iter()
            .any(|d| d.message.contains("circular")));
    }

    #[test]
    fn test_validate_reports_cycle_once() {
        let dir = TempDir::new().unwrap();
        let mut a = capability("skills/a", CapabilityKind::Skill);
        a.dependencies.required.insert(CapabilityId::from("skills/b"));
        let mut b = capability("skills/b", CapabilityKind::Skill);
        b.dependencies.required.insert(CapabilityId::from("skills/a"));
        let mgr = manager(&dir, vec![a, b]);

        mgr.save(&config("cyclic", &["a", "b"], &[])).unwrap();
        let report = mgr.validate("cyclic").unwrap();
        let cycle_errors: Vec<_> = report
            .errors
            .iter()
            .filter(|d| d.message.contains("circular"))
            .collect();
        assert_eq!(cycle_errors.len(), 1);
    }

    #[test]
    fn test_validate_warns_on_deprecated_and_suggested() {
        let dir = TempDir::new().unwrap();
        let mut old = capability("skills/legacy", CapabilityKind::Skill);
        old.status = CapabilityStatus::Deprecated;
        old.dependencies
            .suggested
            .insert(CapabilityId::from("skills/modern"));
        let modern = capability("skills/modern", CapabilityKind::Skill);
        let mgr = manager(&dir, vec![old, modern]);

        mgr.save(&config("stale", &["legacy"], &[])).unwrap();
        let report = mgr.validate("stale").unwrap();
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_validate_recommendations_exclude_selection() {
        let dir = TempDir::new().unwrap();
        let mut review = capability("skills/code-review", CapabilityKind::Skill);
        review
            .composable_with
            .insert(CapabilityId::from("skills/testing"));
        review
            .composable_with
            .insert(CapabilityId::from("skills/code-review"));
        let testing = capability("skills/testing", CapabilityKind::Skill);
        let mgr = manager(&dir, vec![review, testing]);

        mgr.save(&config("reviewer", &["code-review"], &[])).unwrap();
        let report = mgr.validate("reviewer").unwrap();
        assert_eq!(
            report.recommendations,
            vec![CapabilityId::from("skills/testing")]
        );
    }
}
