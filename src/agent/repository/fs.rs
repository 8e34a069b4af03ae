//! Filesystem adapter for the agent configuration repository.
//!
//! One YAML document per configuration, named `<name>.yaml`, under a single
//! directory supplied by configuration. Writes go through a temp file in the
//! same directory followed by a rename, so a crash mid-save never leaves a
//! half-written record.

use super::contract::{AgentConfigRepository, StoredAgentConfiguration};
use crate::agent::domain::AgentConfiguration;
use crate::error::LoadoutError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Stores agent configurations as YAML files in a directory.
#[derive(Debug, Clone)]
pub struct FsAgentRepository {
    root: PathBuf,
}

impl FsAgentRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_root(&self) -> Result<(), LoadoutError> {
        fs::create_dir_all(&self.root).map_err(|e| {
            LoadoutError::StorageError(format!(
                "failed to create {}: {}",
                self.root.display(),
                e
            ))
        })
    }

    fn read_config(path: &Path) -> Result<AgentConfiguration, LoadoutError> {
        let content = fs::read_to_string(path).map_err(|e| {
            LoadoutError::StorageError(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            LoadoutError::StorageError(format!("failed to parse {}: {}", path.display(), e))
        })
    }
}

impl AgentConfigRepository for FsAgentRepository {
    fn list(&self) -> Result<Vec<StoredAgentConfiguration>, LoadoutError> {
        if !self.root.exists() {
            debug!(dir = %self.root.display(), "agent directory absent, listing empty");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root).map_err(|e| {
            LoadoutError::StorageError(format!("failed to list {}: {}", self.root.display(), e))
        })?;

        let mut stored = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                LoadoutError::StorageError(format!(
                    "failed to list {}: {}",
                    self.root.display(),
                    e
                ))
            })?;
            let path = entry.path();
            let is_yaml = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext == "yaml" || ext == "yml")
                .unwrap_or(false);
            if !path.is_file() || !is_yaml {
                continue;
            }

            match Self::read_config(&path) {
                Ok(config) => stored.push(StoredAgentConfiguration {
                    name: config.name.clone(),
                    config,
                    path,
                }),
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping unreadable agent configuration");
                }
            }
        }

        stored.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(stored)
    }

    fn load(&self, name: &str) -> Result<Option<AgentConfiguration>, LoadoutError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Ok(None);
        }
        Self::read_config(&path).map(Some)
    }

    fn exists(&self, name: &str) -> Result<bool, LoadoutError> {
        Ok(self.path_for(name).exists())
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.yaml", name))
    }

    fn save(&self, config: &AgentConfiguration) -> Result<(), LoadoutError> {
        self.ensure_root()?;
        let path = self.path_for(&config.name);
        let content = serde_yaml::to_string(config).map_err(|e| {
            LoadoutError::StorageError(format!(
                "failed to serialize agent '{}': {}",
                config.name, e
            ))
        })?;

        let tmp = path.with_extension("yaml.tmp");
        fs::write(&tmp, content).map_err(|e| {
            LoadoutError::StorageError(format!("failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            LoadoutError::StorageError(format!("failed to write {}: {}", path.display(), e))
        })?;

        debug!(agent = %config.name, file = %path.display(), "saved agent configuration");
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<bool, LoadoutError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| {
            LoadoutError::StorageError(format!("failed to delete {}: {}", path.display(), e))
        })?;
        debug!(agent = %name, file = %path.display(), "deleted agent configuration");
        Ok(true)
    }
}
