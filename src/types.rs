//! Core types for the capability composition system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, globally unique capability identifier.
///
/// Slash-qualified (`category/name`, e.g. `skills/debugging`). The id is the
/// sole addressing mechanism; it is never aliased or interpreted beyond
/// equality and ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityId(String);

impl CapabilityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build an id from a category and a bare capability name.
    pub fn qualified(category: &str, name: &str) -> Self {
        Self(format!("{}/{}", category, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CapabilityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CapabilityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Severity of a diagnostic message.
///
/// Hard errors abort the producing operation and are carried as
/// `LoadoutError` instead; everything surfaced as data uses one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Result is marked invalid (dangling reference, cycle, conflict).
    Error,
    /// Informational only (asymmetric conflict, empty tags).
    Warning,
}

/// One validation or composition finding, with every implicated capability
/// id so callers can render an actionable message without re-deriving
/// context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Capability ids implicated in the finding, in reporting order.
    pub capabilities: Vec<CapabilityId>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, capabilities: Vec<CapabilityId>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            capabilities,
        }
    }

    pub fn warning(message: impl Into<String>, capabilities: Vec<CapabilityId>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            capabilities,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Error => write!(f, "error: {}", self.message),
            Severity::Warning => write!(f, "warning: {}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_id() {
        let id = CapabilityId::qualified("skills", "debugging");
        assert_eq!(id.as_str(), "skills/debugging");
        assert_eq!(id, CapabilityId::from("skills/debugging"));
    }

    #[test]
    fn test_id_ordering_is_lexicographic() {
        let mut ids = vec![
            CapabilityId::from("workflows/bug-fix"),
            CapabilityId::from("commands/test"),
            CapabilityId::from("skills/debugging"),
        ];
        ids.sort();
        assert_eq!(ids[0].as_str(), "commands/test");
        assert_eq!(ids[1].as_str(), "skills/debugging");
        assert_eq!(ids[2].as_str(), "workflows/bug-fix");
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::warning("empty tags", vec![CapabilityId::from("skills/x")]);
        assert_eq!(d.to_string(), "warning: empty tags");
        assert!(!d.is_error());
    }
}
