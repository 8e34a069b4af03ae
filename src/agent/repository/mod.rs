//! Agent configuration repository port and adapters.

pub mod contract;
pub mod fs;

pub use contract::{AgentConfigRepository, StoredAgentConfiguration};
pub use fs::FsAgentRepository;
