//! Capability declaration parsing and structural validation.
//!
//! Turns one raw YAML declaration into a [`CapabilityMetadata`] record or a
//! hard error naming the offending field and file. Semantic checks that do
//! not block loading live in [`super::validator`].

use crate::capability::metadata::{
    CapabilityKind, CapabilityMetadata, CapabilityStatus, DependencySet, KindDetails, Relevance,
};
use crate::error::LoadoutError;
use crate::types::CapabilityId;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Raw declaration as written on disk, before structural validation.
///
/// Required fields are `Option` so a missing key produces a precise
/// field-level error instead of a serde type error. Unknown keys land in
/// `extra` and are preserved, not rejected.
#[derive(Debug, Deserialize)]
struct RawDeclaration {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    version: Option<String>,
    #[serde(default)]
    description: Option<String>,
    category: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    status: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    last_updated: Option<String>,
    #[serde(default)]
    dependencies: Option<serde_yaml::Value>,
    #[serde(default)]
    conflicts: BTreeSet<CapabilityId>,
    #[serde(default)]
    composable_with: BTreeSet<CapabilityId>,
    #[serde(default)]
    agent_roles: Vec<String>,
    #[serde(default)]
    relevance: Relevance,
    #[serde(default)]
    required_files: Vec<String>,
    #[serde(default)]
    optional_files: Vec<String>,
    #[serde(default)]
    steps: Option<Vec<String>>,
    #[serde(default)]
    side_effects: Option<Vec<String>>,
    #[serde(default)]
    default_roles: Option<Vec<String>>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_yaml::Value>,
}

/// Parse one capability declaration file.
pub fn parse_file(path: &Path) -> Result<CapabilityMetadata, LoadoutError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        LoadoutError::StorageError(format!(
            "failed to read capability declaration {}: {}",
            path.display(),
            e
        ))
    })?;
    parse_str(&content, path)
}

/// Parse one capability declaration from a string, attributing errors to
/// `source` for reporting.
pub fn parse_str(content: &str, source: &Path) -> Result<CapabilityMetadata, LoadoutError> {
    let raw: RawDeclaration =
        serde_yaml::from_str(content).map_err(|e| LoadoutError::DeclarationSyntax {
            file: source.to_path_buf(),
            message: e.to_string(),
        })?;
    finish(raw, source)
}

fn field_error(source: &Path, field: &str, message: impl Into<String>) -> LoadoutError {
    LoadoutError::DeclarationField {
        file: source.to_path_buf(),
        field: field.to_string(),
        message: message.into(),
    }
}

fn require<T>(value: Option<T>, source: &Path, field: &str) -> Result<T, LoadoutError> {
    value.ok_or_else(|| field_error(source, field, "missing required field"))
}

fn finish(raw: RawDeclaration, source: &Path) -> Result<CapabilityMetadata, LoadoutError> {
    let name = require(raw.name, source, "name")?;
    if name.trim().is_empty() {
        return Err(field_error(source, "name", "must not be empty"));
    }
    let category = require(raw.category, source, "category")?;
    if category.trim().is_empty() {
        return Err(field_error(source, "category", "must not be empty"));
    }

    let kind = parse_kind(&require(raw.kind, source, "type")?, source)?;
    let status = parse_status(&require(raw.status, source, "status")?, source)?;

    let version = require(raw.version, source, "version")?;
    validate_semver(&version).map_err(|m| field_error(source, "version", m))?;

    let dependencies = match raw.dependencies {
        None => DependencySet::default(),
        Some(value) => decompose_dependencies(value, source)?,
    };

    let details = kind_details(
        kind,
        raw.steps,
        raw.side_effects,
        raw.default_roles,
    );

    Ok(CapabilityMetadata {
        id: CapabilityId::qualified(&category, &name),
        name,
        kind,
        version,
        status,
        description: raw.description.unwrap_or_default(),
        category,
        author: raw.author.unwrap_or_default(),
        last_updated: raw.last_updated.unwrap_or_default(),
        tags: raw.tags,
        dependencies,
        conflicts: raw.conflicts,
        composable_with: raw.composable_with,
        agent_roles: raw.agent_roles,
        relevance: raw.relevance,
        required_files: raw.required_files,
        optional_files: raw.optional_files,
        details,
        extra: raw.extra,
    })
}

fn parse_kind(value: &str, source: &Path) -> Result<CapabilityKind, LoadoutError> {
    value
        .parse::<CapabilityKind>()
        .map_err(|m| field_error(source, "type", m))
}

fn parse_status(value: &str, source: &Path) -> Result<CapabilityStatus, LoadoutError> {
    match value {
        "stable" => Ok(CapabilityStatus::Stable),
        "beta" => Ok(CapabilityStatus::Beta),
        "experimental" => Ok(CapabilityStatus::Experimental),
        "deprecated" => Ok(CapabilityStatus::Deprecated),
        other => Err(field_error(
            source,
            "status",
            format!(
                "unknown status '{}' (expected stable, beta, experimental, or deprecated)",
                other
            ),
        )),
    }
}

/// Validate a `MAJOR.MINOR.PATCH` version string. No range matching.
pub fn validate_semver(version: &str) -> Result<(), String> {
    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() != 3 {
        return Err(format!(
            "'{}' is not a MAJOR.MINOR.PATCH version",
            version
        ));
    }
    for part in parts {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!(
                "'{}' is not a MAJOR.MINOR.PATCH version",
                version
            ));
        }
        part.parse::<u64>()
            .map_err(|_| format!("version component '{}' out of range", part))?;
    }
    Ok(())
}

/// Decompose the `dependencies` key into its three named buckets.
///
/// Anything other than a mapping of `required`/`optional`/`suggested` to id
/// lists is a hard error; the declaration is not loadable.
fn decompose_dependencies(
    value: serde_yaml::Value,
    source: &Path,
) -> Result<DependencySet, LoadoutError> {
    let mapping = match value {
        serde_yaml::Value::Null => return Ok(DependencySet::default()),
        serde_yaml::Value::Mapping(m) => m,
        _ => {
            return Err(field_error(
                source,
                "dependencies",
                "must be a mapping of required/optional/suggested id lists",
            ))
        }
    };

    let mut deps = DependencySet::default();
    for (key, bucket) in mapping {
        let key = match key.as_str() {
            Some(k) => k.to_string(),
            None => {
                return Err(field_error(
                    source,
                    "dependencies",
                    "bucket names must be strings",
                ))
            }
        };
        let ids = id_list(bucket)
            .map_err(|m| field_error(source, &format!("dependencies.{}", key), m))?;
        match key.as_str() {
            "required" => deps.required = ids,
            "optional" => deps.optional = ids,
            "suggested" => deps.suggested = ids,
            other => {
                return Err(field_error(
                    source,
                    "dependencies",
                    format!(
                        "unknown bucket '{}' (expected required, optional, or suggested)",
                        other
                    ),
                ))
            }
        }
    }
    Ok(deps)
}

fn id_list(value: serde_yaml::Value) -> Result<BTreeSet<CapabilityId>, String> {
    let seq = match value {
        serde_yaml::Value::Null => return Ok(BTreeSet::new()),
        serde_yaml::Value::Sequence(s) => s,
        _ => return Err("must be a list of capability ids".to_string()),
    };
    seq.into_iter()
        .map(|item| match item.as_str() {
            Some(s) if !s.trim().is_empty() => Ok(CapabilityId::from(s)),
            _ => Err("capability ids must be non-empty strings".to_string()),
        })
        .collect()
}

fn kind_details(
    kind: CapabilityKind,
    steps: Option<Vec<String>>,
    side_effects: Option<Vec<String>>,
    default_roles: Option<Vec<String>>,
) -> KindDetails {
    match kind {
        CapabilityKind::Skill => KindDetails::Skill,
        CapabilityKind::Workflow => KindDetails::Workflow {
            steps: steps.unwrap_or_default(),
        },
        CapabilityKind::Command => KindDetails::Command {
            side_effects: side_effects.unwrap_or_default(),
        },
        CapabilityKind::Agent => KindDetails::Agent {
            default_roles: default_roles.unwrap_or_default(),
        },
    }
}
