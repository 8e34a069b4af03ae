//! Tooling & Integration Layer
//!
//! CLI surface over the capability store, composition engine, and agent
//! configuration manager.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
