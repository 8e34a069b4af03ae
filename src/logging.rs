//! Structured logging built on the `tracing` crate.
//!
//! Command output goes to stdout; log lines never do. Default destination is
//! stderr so `--format json` output stays machine-parseable.

use crate::error::LoadoutError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, file, file+stderr
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output includes file; None means platform state dir
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format, stderr only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
        }
    }
}

/// Resolve the log file path: LOADOUT_LOG_FILE env, config file, platform
/// state directory default.
pub fn resolve_log_file_path(config_file: Option<PathBuf>) -> Result<PathBuf, LoadoutError> {
    if let Ok(env_path) = std::env::var("LOADOUT_LOG_FILE") {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    if let Some(p) = config_file {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    default_log_file_path()
}

fn default_log_file_path() -> Result<PathBuf, LoadoutError> {
    let project_dirs = directories::ProjectDirs::from("", "loadout", "loadout").ok_or_else(|| {
        LoadoutError::ConfigError(
            "could not determine platform state directory for log file".to_string(),
        )
    })?;
    let state_dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_dir())
        .to_path_buf();
    Ok(state_dir.join("loadout.log"))
}

/// Initialize the logging system.
///
/// Priority order (highest to lowest): environment variables (LOADOUT_LOG,
/// LOADOUT_LOG_FORMAT, LOADOUT_LOG_OUTPUT, LOADOUT_LOG_FILE), configuration
/// file, defaults.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), LoadoutError> {
    let disabled = config.map(|c| !c.enabled).unwrap_or(false);
    if disabled {
        Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(|| std::io::sink()))
            .init();
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let open_log_file = || -> Result<std::fs::File, LoadoutError> {
        let log_file = resolve_log_file_path(config.and_then(|c| c.file.clone()))?;
        if let Some(parent) = log_file.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LoadoutError::ConfigError(format!("failed to create log directory: {}", e))
            })?;
        }
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .map_err(|e| {
                LoadoutError::ConfigError(format!(
                    "failed to open log file {}: {}",
                    log_file.display(),
                    e
                ))
            })
    };

    let base = Registry::default().with(filter);

    match (format.as_str(), output) {
        ("json", OutputDestination::Stderr) => {
            base.with(json_layer().with_writer(std::io::stderr)).init();
        }
        ("json", OutputDestination::File) => {
            base.with(json_layer().with_writer(open_log_file()?)).init();
        }
        ("json", OutputDestination::FileAndStderr) => {
            let writer = open_log_file()?.and(std::io::stderr);
            base.with(json_layer().with_writer(writer)).init();
        }
        (_, OutputDestination::Stderr) => {
            base.with(text_layer(use_color).with_writer(std::io::stderr))
                .init();
        }
        (_, OutputDestination::File) => {
            base.with(text_layer(false).with_writer(open_log_file()?))
                .init();
        }
        (_, OutputDestination::FileAndStderr) => {
            let writer = open_log_file()?.and(std::io::stderr);
            base.with(text_layer(false).with_writer(writer)).init();
        }
    }

    Ok(())
}

fn json_layer<S>(
) -> fmt::Layer<S, fmt::format::JsonFields, fmt::format::Format<fmt::format::Json, ChronoUtc>>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
}

fn text_layer<S>(
    use_color: bool,
) -> fmt::Layer<S, fmt::format::DefaultFields, fmt::format::Format<fmt::format::Full, ChronoUtc>>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(use_color)
}

/// Build environment filter from config or the LOADOUT_LOG variable.
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, LoadoutError> {
    if let Ok(filter) = EnvFilter::try_from_env("LOADOUT_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    Ok(EnvFilter::new(level))
}

fn determine_format(config: Option<&LoggingConfig>) -> Result<String, LoadoutError> {
    if let Ok(format) = std::env::var("LOADOUT_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    if format != "json" && format != "text" {
        return Err(LoadoutError::ConfigError(format!(
            "invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }
    Ok(format.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputDestination {
    Stderr,
    File,
    FileAndStderr,
}

fn determine_output(config: Option<&LoggingConfig>) -> Result<OutputDestination, LoadoutError> {
    let output = match std::env::var("LOADOUT_LOG_OUTPUT") {
        Ok(value) => value,
        Err(_) => config
            .map(|c| c.output.clone())
            .unwrap_or_else(default_output),
    };
    match output.as_str() {
        "stderr" => Ok(OutputDestination::Stderr),
        "file" => Ok(OutputDestination::File),
        "file+stderr" => Ok(OutputDestination::FileAndStderr),
        _ => Err(LoadoutError::ConfigError(format!(
            "invalid log output: {} (must be 'stderr', 'file', or 'file+stderr')",
            output
        ))),
    }
}
