//! Capability metadata: records, parsing, validation, and the read-only store.

pub mod commands;
pub mod metadata;
pub mod parser;
pub mod store;
pub mod validator;

pub use commands::CapabilityCommandService;
pub use metadata::{
    CapabilityKind, CapabilityMetadata, CapabilityStatus, DependencySet, KindDetails, Relevance,
};
pub use store::{load_dir, CapabilityStore, LoadFailure, LoadReport};
pub use validator::{validate_record, validate_store};
