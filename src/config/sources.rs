//! Configuration sources, one builder step per origin.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use std::path::Path;

/// Builder seeded with every built-in default.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("capabilities.dir", "capabilities")?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("logging.color", true)
}

/// Global file: `config.toml` in the platform config dir, if present.
pub fn add_global_file(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = directories::ProjectDirs::from("", "loadout", "loadout")
        .map(|dirs| dirs.config_dir().join("config.toml"));
    match path {
        Some(p) => Ok(builder.add_source(File::from(p).required(false))),
        None => Ok(builder),
    }
}

/// Workspace file: `loadout.toml` under the workspace root, if present.
pub fn add_workspace_file(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = workspace_root.join("loadout.toml");
    Ok(builder.add_source(File::from(path).required(false)))
}

/// Environment variable overlay: LOADOUT_ prefix with __ as separator for
/// nested keys (e.g. `LOADOUT_LOGGING__LEVEL=debug`).
pub fn add_environment(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("LOADOUT")
            .separator("__")
            .try_parsing(true),
    ))
}
