//! Merge service: orchestrates sources and deserializes to `LoadoutConfig`.

use super::sources;
use super::LoadoutConfig;
use config::{ConfigError, Environment, File};
use std::path::Path;

pub struct MergeService;

impl MergeService {
    /// Load config from workspace and standard sources.
    /// Precedence: defaults (lowest) -> global file -> workspace file ->
    /// environment (highest).
    pub fn load(workspace_root: &Path) -> Result<LoadoutConfig, ConfigError> {
        let builder = sources::builder_with_defaults()?;
        let builder = sources::add_global_file(builder)?;
        let builder = sources::add_workspace_file(builder, workspace_root)?;
        let builder = sources::add_environment(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<LoadoutConfig, ConfigError> {
        let builder = sources::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path.to_path_buf()));
        let builder = builder.add_source(
            Environment::with_prefix("LOADOUT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
