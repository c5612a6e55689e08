//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Rendered command output goes to stdout and respects the quiet flag only
//! for decoration, never for data: `--quiet` hides "Aborted." style notes but
//! a `--output json` payload is always printed. Diagnostics go to stderr.

use std::fmt::Display;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::options::OutputFormat;
use crate::domain::ActionOutput;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print rendered data (always shown).
pub fn data(rendered: &str) {
    if rendered.ends_with('\n') {
        print!("{}", rendered);
    } else {
        println!("{}", rendered);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a hint below an error (always shown).
pub fn hint(message: impl Display) {
    eprintln!("hint: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a status note on stderr (respects quiet mode).
pub fn note(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("{}", message);
    }
}

/// Errors from rendering output.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Renders backend output for display.
pub trait Formatter {
    fn render(&self, output: &ActionOutput, format: OutputFormat) -> Result<String, FormatError>;
}

/// Formatter without colors or terminal detection.
///
/// - `json`/`yaml`: the payload, serialized
/// - `table`: one row per record, aligned columns
/// - `list`: one `key: value` block per record
/// - `text`: one tab-separated line per record, no header
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn render(&self, output: &ActionOutput, format: OutputFormat) -> Result<String, FormatError> {
        let payload = &output.payload;
        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(payload)?,
            OutputFormat::Yaml => serde_yaml::to_string(payload)?,
            OutputFormat::Table => render_table(&records(payload)),
            OutputFormat::List => render_list(&records(payload)),
            OutputFormat::Text => render_text(&records(payload)),
        })
    }
}

/// Flatten a payload into records; scalars become `{"value": ...}`.
fn records(payload: &Value) -> Vec<Map<String, Value>> {
    let wrap = |v: &Value| match v {
        Value::Object(map) => map.clone(),
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other.clone());
            map
        }
    };
    match payload {
        Value::Array(items) => items.iter().map(wrap).collect(),
        Value::Null => Vec::new(),
        other => vec![wrap(other)],
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn columns(rows: &[Map<String, Value>]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn render_table(rows: &[Map<String, Value>]) -> String {
    if rows.is_empty() {
        return "No results.".to_string();
    }
    let columns = columns(rows);
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| row.get(c).map(cell).unwrap_or_else(|| "-".to_string()))
                .collect()
        })
        .collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: Vec<String>| {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(columns.iter().map(|c| c.to_uppercase()).collect())];
    out.extend(cells.into_iter().map(line));
    out.join("\n")
}

fn render_list(rows: &[Map<String, Value>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|(k, v)| format!("{}: {}", k, cell(v)))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_text(rows: &[Map<String, Value>]) -> String {
    rows.iter()
        .map(|row| row.values().map(cell).collect::<Vec<_>>().join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(payload: Value, format: OutputFormat) -> String {
        PlainFormatter
            .render(&ActionOutput::new(payload), format)
            .unwrap()
    }

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn table_aligns_columns() {
        let out = render(
            json!([{"id": "1", "name": "Kitchen"}, {"id": "22", "name": null}]),
            OutputFormat::Table,
        );
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "ID  NAME");
        assert_eq!(lines[1], "1   Kitchen");
        assert_eq!(lines[2], "22  -");
    }

    #[test]
    fn empty_table() {
        assert_eq!(render(json!([]), OutputFormat::Table), "No results.");
    }

    #[test]
    fn list_and_text() {
        let payload = json!({"name": "Home", "online": true});
        assert_eq!(render(payload.clone(), OutputFormat::List), "name: Home\nonline: true");
        assert_eq!(render(payload, OutputFormat::Text), "Home\ttrue");
    }

    #[test]
    fn structured_formats() {
        let out = render(json!({"ok": true}), OutputFormat::Json);
        assert_eq!(serde_json::from_str::<Value>(&out).unwrap(), json!({"ok": true}));
        let out = render(json!({"ok": true}), OutputFormat::Yaml);
        assert_eq!(out.trim(), "ok: true");
    }
}
