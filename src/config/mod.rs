//! Configuration for the loadout CLI and library.
//!
//! Merge precedence, lowest to highest: built-in defaults, global file
//! (`config.toml` in the platform config dir), workspace file
//! (`loadout.toml` in the working directory), `LOADOUT_*` environment
//! variables.

pub mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

use crate::error::LoadoutError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadoutConfig {
    pub capabilities: CapabilitiesConfig,
    pub agents: AgentsConfig,
    pub logging: LoggingConfig,
}

/// Where capability declarations are read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilitiesConfig {
    /// Directory scanned recursively for `*.yaml` declarations.
    pub dir: PathBuf,
}

impl Default for CapabilitiesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("capabilities"),
        }
    }
}

/// Where agent configurations are stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    /// Storage directory; unset means the platform config dir
    /// (`<config>/loadout/agents/`).
    pub dir: Option<PathBuf>,
}

impl AgentsConfig {
    /// The effective agents directory.
    pub fn resolve_dir(&self) -> Result<PathBuf, LoadoutError> {
        if let Some(dir) = &self.dir {
            return Ok(dir.clone());
        }
        let project_dirs =
            directories::ProjectDirs::from("", "loadout", "loadout").ok_or_else(|| {
                LoadoutError::ConfigError(
                    "could not determine platform config directory for agents".to_string(),
                )
            })?;
        Ok(project_dirs.config_dir().join("agents"))
    }
}
