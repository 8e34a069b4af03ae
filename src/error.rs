//! Error types shared across the crate.
//!
//! Three severities exist in the system: hard errors (this enum), validation
//! errors, and warnings. The latter two travel as [`crate::types::Diagnostic`]
//! data inside reports so bulk operations stay total over an imperfect store.

use crate::types::CapabilityId;
use std::path::PathBuf;
use thiserror::Error;

/// Hard errors: the producing operation aborts.
#[derive(Debug, Error)]
pub enum LoadoutError {
    /// A capability declaration failed to deserialize at all.
    #[error("failed to parse capability declaration {file}: {message}")]
    DeclarationSyntax { file: PathBuf, message: String },

    /// A capability declaration is structurally invalid; names the field.
    #[error("invalid capability declaration {file}: field '{field}': {message}")]
    DeclarationField {
        file: PathBuf,
        field: String,
        message: String,
    },

    /// Explicit single-id lookup against the store missed.
    #[error("capability not found in store: {0}")]
    CapabilityNotFound(CapabilityId),

    /// Agent configuration name collision on create.
    #[error("agent configuration already exists: {0}")]
    AlreadyExists(String),

    /// Unknown agent configuration name on load/update/delete.
    #[error("agent configuration not found: {0}")]
    NotFound(String),

    /// An agent configuration must select at least one capability.
    #[error("agent configuration '{0}' selects no capabilities")]
    EmptySelection(String),

    /// A configuration field failed format validation.
    #[error("invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// Configuration loading or environment problems.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Filesystem access underneath the store or repository failed.
    #[error("storage error: {0}")]
    StorageError(String),
}

impl From<config::ConfigError> for LoadoutError {
    fn from(e: config::ConfigError) -> Self {
        LoadoutError::ConfigError(e.to_string())
    }
}
