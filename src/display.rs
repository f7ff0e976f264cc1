//! Text and JSON rendering for the command line tool

use crate::kind::ScalarKind;
use crate::registry::RegistryEntry;
use crate::value::{ParseValueError, Scalar};
use colored::Colorize;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde::Serialize;

pub fn create_styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h)));
    table
}

pub fn format_entries_text(entries: &[RegistryEntry]) -> String {
    if entries.is_empty() {
        return "No filters registered\n".to_string();
    }

    let mut table = create_styled_table(&["Type", "Method", "Filter"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.type_key),
            Cell::new(&entry.method),
            Cell::new(&entry.filter),
        ]);
    }
    format!("{table}\n{} registrations\n", entries.len())
}

pub fn format_entries_json(entries: &[RegistryEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

/// Outcome of parsing one raw value, as printed by `parse`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ParseOutcome {
    Value { raw: String, value: Scalar },
    Null { raw: String },
    Error { raw: String, message: String },
}

impl ParseOutcome {
    pub fn new(raw: &str, result: Result<Option<Scalar>, ParseValueError>) -> Self {
        let raw = raw.to_string();
        match result {
            Ok(Some(value)) => ParseOutcome::Value { raw, value },
            Ok(None) => ParseOutcome::Null { raw },
            Err(err) => ParseOutcome::Error {
                raw,
                message: err.to_string(),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ParseOutcome::Error { .. })
    }
}

pub fn format_parse_outcomes_json(outcomes: &[ParseOutcome]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcomes)
}

pub fn format_parse_outcome(kind: ScalarKind, outcome: &ParseOutcome) -> String {
    match outcome {
        ParseOutcome::Value { raw, value } => {
            format!("{} {:?} -> {} ({})", "ok".green().bold(), raw, value, kind)
        }
        ParseOutcome::Null { raw } => {
            format!("{} {:?} -> {}", "ok".green().bold(), raw, "null".dimmed())
        }
        ParseOutcome::Error { raw, message } => {
            format!("{} {:?}: {}", "error".red().bold(), raw, message)
        }
    }
}
