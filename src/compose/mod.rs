//! Composition engine.
//!
//! Pure functions over an immutable [`crate::capability::CapabilityStore`]
//! and a working selection of capability ids. No operation mutates the store
//! or retains cross-call state; bulk operations degrade to best-effort
//! reporting rather than raising, so composition always produces an
//! actionable diagnostic.

pub mod conflict;
pub mod cycle;
pub mod recommend;
pub mod resolve;

pub use conflict::{detect_conflicts, ConflictDeclaredBy, ConflictPair};
pub use cycle::detect_circular_dependencies;
pub use recommend::recommendations;
pub use resolve::{resolve_dependencies, ResolveOptions};
