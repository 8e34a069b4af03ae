//! Agent configurations: domain model, persistence, and the manager that
//! drives composition-aware validation.

pub mod commands;
pub mod domain;
pub mod manager;
pub mod repository;

pub use commands::AgentCommandService;
pub use domain::{validate_configuration, AgentConfiguration, AgentStatus, CapabilitySelection};
pub use manager::{AgentConfigManager, ValidationReport};
pub use repository::{AgentConfigRepository, FsAgentRepository, StoredAgentConfiguration};
