//! CLI Tooling
//!
//! Command-line interface for capability and agent operations. Loads the
//! capability store once per invocation; every command runs against that
//! read-only snapshot.

use crate::agent::commands::{AgentCommandService, CreateRequest};
use crate::agent::repository::FsAgentRepository;
use crate::agent::AgentConfigManager;
use crate::capability::commands::CapabilityCommandService;
use crate::capability::{load_dir, CapabilityStore, LoadReport};
use crate::config::{ConfigLoader, LoadoutConfig};
use crate::error::LoadoutError;
use crate::tooling::format;
use crate::types::CapabilityId;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Loadout CLI - capability composition for agent configurations
#[derive(Parser)]
#[command(name = "loadout")]
#[command(about = "Compose agent configurations from declarative capability metadata")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect and validate capabilities
    Capability {
        #[command(subcommand)]
        command: CapabilityCommands,
    },
    /// Manage agent configurations
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },
}

#[derive(Subcommand)]
pub enum CapabilityCommands {
    /// List loaded capabilities
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Filter by kind (skill, workflow, command, agent)
        #[arg(long)]
        kind: Option<String>,
    },
    /// Show capability details
    Show {
        /// Capability id (category/name)
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate capability declarations
    Validate {
        /// Capability id (required unless --all is used)
        #[arg(required_unless_present = "all")]
        id: Option<String>,
        /// Validate all capabilities
        #[arg(long, conflicts_with = "id")]
        all: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum AgentCommands {
    /// List agent configurations
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show agent configuration details
    Show {
        /// Configuration name
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Create a new agent configuration
    Create {
        /// Configuration name
        name: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Semantic version (default: 0.1.0)
        #[arg(long)]
        version: Option<String>,
        /// Author
        #[arg(long)]
        author: Option<String>,
        /// Skill to select (repeatable)
        #[arg(long = "skill")]
        skills: Vec<String>,
        /// Workflow to select (repeatable)
        #[arg(long = "workflow")]
        workflows: Vec<String>,
        /// Command to select (repeatable)
        #[arg(long = "command")]
        commands: Vec<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Validate an agent configuration against the capability store
    Validate {
        /// Configuration name
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Resolve the full dependency closure of a configuration
    Resolve {
        /// Configuration name
        name: String,
        /// Follow optional dependencies too
        #[arg(long)]
        include_optional: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show recommended capabilities for a configuration
    Recommend {
        /// Configuration name
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Remove an agent configuration
    Remove {
        /// Configuration name
        name: String,
    },
}

/// CLI context holding the loaded capability store and the agent manager.
pub struct CliContext {
    store: Arc<CapabilityStore>,
    load_report: LoadReport,
    manager: AgentConfigManager,
}

impl CliContext {
    /// Create a new CLI context from an already-loaded configuration.
    pub fn with_config(
        workspace_root: &std::path::Path,
        config: &LoadoutConfig,
    ) -> Result<Self, LoadoutError> {
        let capabilities_dir = if config.capabilities.dir.is_absolute() {
            config.capabilities.dir.clone()
        } else {
            workspace_root.join(&config.capabilities.dir)
        };
        let (store, load_report) = load_dir(&capabilities_dir)?;
        let store = Arc::new(store);

        let agents_dir = config.agents.resolve_dir()?;
        debug!(agents_dir = %agents_dir.display(), "using agents directory");
        let repository = Arc::new(FsAgentRepository::new(agents_dir));
        let manager = AgentConfigManager::new(Arc::clone(&store), repository);

        Ok(Self {
            store,
            load_report,
            manager,
        })
    }

    /// Create a new CLI context, loading configuration from the standard
    /// sources.
    pub fn new(
        workspace_root: &std::path::Path,
        config_path: Option<&std::path::Path>,
    ) -> Result<Self, LoadoutError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(workspace_root)?,
        };
        Self::with_config(workspace_root, &config)
    }

    pub fn store(&self) -> &CapabilityStore {
        &self.store
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Execute a CLI command, returning formatted output for stdout.
    pub fn execute(&self, command: &Commands) -> Result<String, LoadoutError> {
        match command {
            Commands::Capability { command } => self.handle_capability_command(command),
            Commands::Agent { command } => self.handle_agent_command(command),
        }
    }

    fn handle_capability_command(
        &self,
        command: &CapabilityCommands,
    ) -> Result<String, LoadoutError> {
        match command {
            CapabilityCommands::List { format, kind } => {
                let result = CapabilityCommandService::list(&self.store, kind.as_deref())?;
                if format == "json" {
                    to_json(&result.capabilities)
                } else {
                    Ok(format_load_failures(&self.load_report)
                        + &format::format_capability_list_text(&result))
                }
            }
            CapabilityCommands::Show { id, format } => {
                let id = CapabilityId::from(id.as_str());
                let result = CapabilityCommandService::show(&self.store, &id)?;
                if format == "json" {
                    to_json(&result.metadata)
                } else {
                    Ok(format::format_capability_show_text(&result.metadata))
                }
            }
            CapabilityCommands::Validate { id, all, format } => {
                let result = match (*all, id) {
                    (true, _) => CapabilityCommandService::validate_all(&self.store)?,
                    (false, Some(id)) => CapabilityCommandService::validate_single(
                        &self.store,
                        &CapabilityId::from(id.as_str()),
                    )?,
                    (false, None) => {
                        return Err(LoadoutError::ConfigError(
                            "capability id required unless --all is used".to_string(),
                        ))
                    }
                };
                if format == "json" {
                    let findings: Vec<_> = result
                        .findings
                        .iter()
                        .map(|(id, diagnostics)| {
                            json!({ "id": id, "diagnostics": diagnostics })
                        })
                        .collect();
                    to_json(&json!({
                        "checked": result.checked,
                        "errors": result.error_count(),
                        "warnings": result.warning_count(),
                        "findings": findings,
                    }))
                } else {
                    Ok(format_load_failures(&self.load_report)
                        + &format::format_capability_validate_text(&result))
                }
            }
        }
    }

    fn handle_agent_command(&self, command: &AgentCommands) -> Result<String, LoadoutError> {
        match command {
            AgentCommands::List { format } => {
                let result = AgentCommandService::list(&self.manager)?;
                if format == "json" {
                    let agents: Vec<_> = result
                        .agents
                        .iter()
                        .map(|a| {
                            json!({
                                "name": a.name,
                                "status": a.status,
                                "capabilities": a.capability_count,
                                "description": a.description,
                            })
                        })
                        .collect();
                    to_json(&agents)
                } else {
                    Ok(format::format_agent_list_text(&result))
                }
            }
            AgentCommands::Show { name, format } => {
                let result = AgentCommandService::show(&self.manager, name)?;
                if format == "json" {
                    to_json(&json!({
                        "config": result.config,
                        "path": result.path,
                    }))
                } else {
                    Ok(format::format_agent_show_text(&result))
                }
            }
            AgentCommands::Create {
                name,
                description,
                version,
                author,
                skills,
                workflows,
                commands,
                tags,
            } => {
                let request = CreateRequest {
                    name: name.clone(),
                    description: description.clone(),
                    version: version.clone(),
                    author: author.clone(),
                    skills: skills.clone(),
                    workflows: workflows.clone(),
                    commands: commands.clone(),
                    tags: tags.clone(),
                };
                let result = AgentCommandService::create(&self.manager, request)?;
                Ok(format!(
                    "Created agent '{}' at {}",
                    result.name,
                    result.config_path.display()
                ))
            }
            AgentCommands::Validate { name, format } => {
                let result = AgentCommandService::validate(&self.manager, name)?;
                if format == "json" {
                    to_json(&result.report)
                } else {
                    Ok(format::format_validation_report_text(&result.report))
                }
            }
            AgentCommands::Resolve {
                name,
                include_optional,
                format,
            } => {
                let result =
                    AgentCommandService::resolve(&self.manager, name, *include_optional)?;
                if format == "json" {
                    to_json(&json!({
                        "name": result.name,
                        "selected": result.selected,
                        "resolved": result.resolved,
                    }))
                } else {
                    Ok(format::format_resolve_text(&result))
                }
            }
            AgentCommands::Recommend { name, format } => {
                let result = AgentCommandService::recommend(&self.manager, name)?;
                if format == "json" {
                    to_json(&json!({
                        "name": result.name,
                        "recommendations": result.recommendations,
                    }))
                } else {
                    Ok(format::format_recommend_text(&result))
                }
            }
            AgentCommands::Remove { name } => {
                let result = AgentCommandService::remove(&self.manager, name)?;
                Ok(format!(
                    "Removed agent '{}' ({})",
                    result.name,
                    result.config_path.display()
                ))
            }
        }
    }
}

fn format_load_failures(report: &LoadReport) -> String {
    format::format_load_report_text(report)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, LoadoutError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| LoadoutError::StorageError(format!("failed to serialize output: {}", e)))
}
