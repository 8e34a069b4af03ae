//! Repository port for agent configuration persistence.

use crate::agent::domain::AgentConfiguration;
use crate::error::LoadoutError;
use std::path::PathBuf;

/// An agent configuration together with where it is stored.
#[derive(Debug, Clone)]
pub struct StoredAgentConfiguration {
    pub name: String,
    pub config: AgentConfiguration,
    pub path: PathBuf,
}

/// Durable storage for agent configurations, one record per name.
///
/// The manager owns all cross-capability reasoning; adapters only move
/// records in and out of storage. At-most-one writer at a time is assumed;
/// concurrent writers to the same name have last-writer-wins behavior.
pub trait AgentConfigRepository: Send + Sync {
    /// All stored configurations. Unparseable records are skipped with a log
    /// line, not fatal.
    fn list(&self) -> Result<Vec<StoredAgentConfiguration>, LoadoutError>;

    /// Load one configuration; `Ok(None)` when the name is unknown.
    fn load(&self, name: &str) -> Result<Option<AgentConfiguration>, LoadoutError>;

    /// Whether a configuration with this name exists.
    fn exists(&self, name: &str) -> Result<bool, LoadoutError>;

    /// Storage path for a configuration name.
    fn path_for(&self, name: &str) -> PathBuf;

    /// Persist a configuration, overwriting any record of the same name.
    fn save(&self, config: &AgentConfiguration) -> Result<(), LoadoutError>;

    /// Remove a configuration. Absence is not an error at this layer; the
    /// manager maps it to `NotFound`.
    fn delete(&self, name: &str) -> Result<bool, LoadoutError>;
}
