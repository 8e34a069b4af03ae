//! Loadout: capability composition for agent configurations.
//!
//! Assembles named agent configurations from declarative capability
//! metadata: parses and validates capability declarations into a read-only
//! store, resolves dependency closures, detects conflicts and dependency
//! cycles, and recommends complementary capabilities.

pub mod agent;
pub mod capability;
pub mod compose;
pub mod config;
pub mod error;
pub mod logging;
pub mod tooling;
pub mod types;

pub use agent::{AgentConfigManager, AgentConfiguration, ValidationReport};
pub use capability::{CapabilityMetadata, CapabilityStore};
pub use error::LoadoutError;
pub use types::{CapabilityId, Diagnostic, Severity};
