//! Shared utilities for CLI commands

use tabled::{Table, settings::Style};

use crate::welfare::Source;

/// Truncate a string with ellipsis if it exceeds max length
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Display value for an optional field
pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// Group heading for a registry
pub fn source_heading(source: Source) -> &'static str {
    match source {
        Source::National => "National programs",
        Source::Local => "Local programs",
    }
}

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}
