//! Format capability and agent command results as text.

use crate::agent::commands::{
    AgentListResult, AgentRecommendResult, AgentResolveResult, AgentShowResult,
};
use crate::agent::manager::ValidationReport;
use crate::capability::commands::{CapabilityListResult, CapabilityValidateResult};
use crate::capability::{CapabilityMetadata, KindDetails, LoadReport};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format the capability list as human-readable text.
pub fn format_capability_list_text(result: &CapabilityListResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Capabilities")));
    if result.capabilities.is_empty() {
        out.push_str("No capabilities loaded.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Kind", "Version", "Status", "Description"]);
    for meta in &result.capabilities {
        table.add_row(vec![
            meta.id.to_string(),
            meta.kind.to_string(),
            meta.version.clone(),
            meta.status.to_string(),
            meta.description.clone(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Total: {} capabilities.\n", result.capabilities.len()));
    out
}

/// Format one capability's full metadata as text.
pub fn format_capability_show_text(meta: &CapabilityMetadata) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading(meta.id.as_str())));
    out.push_str(&format!("  Name: {}\n", meta.name));
    out.push_str(&format!("  Kind: {}\n", meta.kind));
    out.push_str(&format!("  Version: {}\n", meta.version));
    out.push_str(&format!("  Status: {}\n", meta.status));
    out.push_str(&format!("  Author: {}\n", meta.author));
    out.push_str(&format!("  Last updated: {}\n", meta.last_updated));
    out.push_str(&format!("  Description: {}\n", meta.description));
    if !meta.tags.is_empty() {
        out.push_str(&format!("  Tags: {}\n", meta.tags.join(", ")));
    }
    if !meta.dependencies.required.is_empty() {
        out.push_str(&format!(
            "  Requires: {}\n",
            join_ids(meta.dependencies.required.iter())
        ));
    }
    if !meta.dependencies.optional.is_empty() {
        out.push_str(&format!(
            "  Optional: {}\n",
            join_ids(meta.dependencies.optional.iter())
        ));
    }
    if !meta.dependencies.suggested.is_empty() {
        out.push_str(&format!(
            "  Suggests: {}\n",
            join_ids(meta.dependencies.suggested.iter())
        ));
    }
    if !meta.conflicts.is_empty() {
        out.push_str(&format!("  Conflicts: {}\n", join_ids(meta.conflicts.iter())));
    }
    if !meta.composable_with.is_empty() {
        out.push_str(&format!(
            "  Composable with: {}\n",
            join_ids(meta.composable_with.iter())
        ));
    }
    if !meta.agent_roles.is_empty() {
        out.push_str(&format!("  Agent roles: {}\n", meta.agent_roles.join(", ")));
    }
    match &meta.details {
        KindDetails::Skill => {}
        KindDetails::Workflow { steps } if !steps.is_empty() => {
            out.push_str("  Steps:\n");
            for (i, step) in steps.iter().enumerate() {
                out.push_str(&format!("    {}. {}\n", i + 1, step));
            }
        }
        KindDetails::Command { side_effects } if !side_effects.is_empty() => {
            out.push_str(&format!("  Side effects: {}\n", side_effects.join(", ")));
        }
        KindDetails::Agent { default_roles } if !default_roles.is_empty() => {
            out.push_str(&format!("  Default roles: {}\n", default_roles.join(", ")));
        }
        _ => {}
    }
    out
}

/// Format capability validation findings as text.
pub fn format_capability_validate_text(result: &CapabilityValidateResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading("Capability validation")
    ));
    for (id, diagnostics) in &result.findings {
        out.push_str(&format!("{}\n", id));
        for diag in diagnostics {
            if diag.is_error() {
                out.push_str(&format!("  {} {}\n", "error:".red(), diag.message));
            } else {
                out.push_str(&format!("  {} {}\n", "warning:".yellow(), diag.message));
            }
        }
    }
    if !result.findings.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!(
        "Checked {} capabilities: {} errors, {} warnings.\n",
        result.checked,
        result.error_count(),
        result.warning_count()
    ));
    out
}

/// Format a batch load's failures for the caller, if any.
pub fn format_load_report_text(report: &LoadReport) -> String {
    let mut out = String::new();
    if report.failures.is_empty() {
        return out;
    }
    out.push_str(&format!(
        "{} declaration file(s) failed to load:\n",
        report.failures.len()
    ));
    for failure in &report.failures {
        out.push_str(&format!(
            "  {}: {}\n",
            failure.file.display(),
            failure.message
        ));
    }
    out.push('\n');
    out
}

/// Format the agent list as human-readable text.
pub fn format_agent_list_text(result: &AgentListResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Agents")));
    if result.agents.is_empty() {
        out.push_str("No agent configurations found.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Status", "Capabilities", "Description"]);
    for agent in &result.agents {
        table.add_row(vec![
            agent.name.clone(),
            agent.status.to_string(),
            agent.capability_count.to_string(),
            agent.description.clone(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Total: {} agents.\n", result.agents.len()));
    out
}

/// Format one agent configuration as text.
pub fn format_agent_show_text(result: &AgentShowResult) -> String {
    let config = &result.config;
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading(&config.name)));
    out.push_str(&format!("  Version: {}\n", config.version));
    out.push_str(&format!("  Status: {}\n", config.status));
    out.push_str(&format!("  Created: {}\n", config.created));
    if let Some(author) = &config.author {
        out.push_str(&format!("  Author: {}\n", author));
    }
    out.push_str(&format!("  Description: {}\n", config.description));
    out.push_str(&format!("  File: {}\n", result.path.display()));
    out.push_str("  Capabilities:\n");
    for id in config.selection() {
        out.push_str(&format!("    {}\n", id));
    }
    if !config.context_priority.is_empty() {
        out.push_str("  Context priority:\n");
        for entry in &config.context_priority {
            out.push_str(&format!("    {}\n", entry));
        }
    }
    if !config.agent_instructions.is_empty() {
        out.push_str("  Instructions:\n");
        for entry in &config.agent_instructions {
            out.push_str(&format!("    {}\n", entry));
        }
    }
    if !config.tags.is_empty() {
        out.push_str(&format!("  Tags: {}\n", config.tags.join(", ")));
    }
    out
}

/// Format a validation report as human-readable text.
pub fn format_validation_report_text(report: &ValidationReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Validation: {}", report.name))
    ));
    for diag in &report.errors {
        out.push_str(&format!("  {} {}\n", "error:".red(), diag.message));
    }
    for diag in &report.warnings {
        out.push_str(&format!("  {} {}\n", "warning:".yellow(), diag.message));
    }
    if !report.recommendations.is_empty() {
        out.push_str(&format!(
            "  Recommended: {}\n",
            join_ids(report.recommendations.iter())
        ));
    }
    out.push('\n');
    if report.is_valid() {
        out.push_str(&format!(
            "{} ({} warnings)\n",
            "Configuration is valid.".green(),
            report.warnings.len()
        ));
    } else {
        out.push_str(&format!(
            "{} {} errors, {} warnings.\n",
            "Configuration is invalid:".red(),
            report.errors.len(),
            report.warnings.len()
        ));
    }
    out
}

/// Format a dependency resolution result as text.
pub fn format_resolve_text(result: &AgentResolveResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Resolved: {}", result.name))
    ));
    for id in &result.resolved {
        if result.selected.contains(id) {
            out.push_str(&format!("  {}\n", id));
        } else {
            out.push_str(&format!("  {} (dependency)\n", id));
        }
    }
    out.push_str(&format!(
        "\n{} selected, {} after resolution.\n",
        result.selected.len(),
        result.resolved.len()
    ));
    out
}

/// Format recommendations as text.
pub fn format_recommend_text(result: &AgentRecommendResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Recommendations: {}", result.name))
    ));
    if result.recommendations.is_empty() {
        out.push_str("No recommendations.\n");
        return out;
    }
    for id in &result.recommendations {
        out.push_str(&format!("  {}\n", id));
    }
    out
}

fn join_ids<'a>(ids: impl Iterator<Item = &'a crate::types::CapabilityId>) -> String {
    ids.map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
}
