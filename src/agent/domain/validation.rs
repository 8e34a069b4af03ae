//! Field-level validation owned by the agent domain.
//!
//! Composition-level validation (missing capabilities, cycles, conflicts)
//! lives in the manager; this module only checks the record's own fields.

use super::AgentConfiguration;
use crate::capability::parser::validate_semver;
use crate::error::LoadoutError;

/// Validate an agent configuration's own fields.
///
/// Fails with `InvalidField` on a malformed name, version, or date, and with
/// `EmptySelection` when no capability is selected.
pub fn validate_configuration(config: &AgentConfiguration) -> Result<(), LoadoutError> {
    if config.name.trim().is_empty() {
        return Err(LoadoutError::InvalidField {
            field: "name".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if config
        .name
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_whitespace())
    {
        return Err(LoadoutError::InvalidField {
            field: "name".to_string(),
            message: format!(
                "'{}' must not contain path separators or whitespace",
                config.name
            ),
        });
    }

    validate_semver(&config.version).map_err(|message| LoadoutError::InvalidField {
        field: "version".to_string(),
        message,
    })?;

    if chrono::NaiveDate::parse_from_str(&config.created, "%Y-%m-%d").is_err() {
        return Err(LoadoutError::InvalidField {
            field: "created".to_string(),
            message: format!("'{}' is not a YYYY-MM-DD date", config.created),
        });
    }

    if config.capabilities.is_empty() {
        return Err(LoadoutError::EmptySelection(config.name.clone()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::domain::CapabilitySelection;

    fn valid() -> AgentConfiguration {
        AgentConfiguration {
            name: "reviewer".to_string(),
            version: "1.0.0".to_string(),
            description: "Code review agent".to_string(),
            created: "2026-02-10".to_string(),
            author: None,
            capabilities: CapabilitySelection {
                skills: vec!["code-review".to_string()],
                ..Default::default()
            },
            context_priority: Vec::new(),
            agent_instructions: Vec::new(),
            required_files: Vec::new(),
            optional_files: Vec::new(),
            tags: Vec::new(),
            status: Default::default(),
        }
    }

    #[test]
    fn test_valid_configuration_passes() {
        assert!(validate_configuration(&valid()).is_ok());
    }

    #[test]
    fn test_empty_selection_rejected() {
        let mut config = valid();
        config.capabilities = CapabilitySelection::default();
        match validate_configuration(&config).unwrap_err() {
            LoadoutError::EmptySelection(name) => assert_eq!(name, "reviewer"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_version_rejected() {
        let mut config = valid();
        config.version = "1.0".to_string();
        match validate_configuration(&config).unwrap_err() {
            LoadoutError::InvalidField { field, .. } => assert_eq!(field, "version"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_date_rejected() {
        let mut config = valid();
        config.created = "10/02/2026".to_string();
        match validate_configuration(&config).unwrap_err() {
            LoadoutError::InvalidField { field, .. } => assert_eq!(field, "created"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_name_with_separator_rejected() {
        let mut config = valid();
        config.name = "team/reviewer".to_string();
        assert!(validate_configuration(&config).is_err());
    }
}
