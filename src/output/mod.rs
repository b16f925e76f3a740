//! Output formatting for view results
//!
//! Views produce serializable rows; this module renders them as JSON,
//! Markdown tables, CSV or aligned plain text. Rows are first converted to
//! [`serde_json::Value`], so any view can be rendered in any format.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Format type for output presentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatType {
    /// Plain text columns
    Text,
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    #[default]
    JsonPretty,
    /// Markdown table
    Markdown,
    /// CSV with a header row
    Csv,
}

impl FormatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatType::Text => "text",
            FormatType::Json => "json",
            FormatType::JsonPretty => "json-pretty",
            FormatType::Markdown => "markdown",
            FormatType::Csv => "csv",
        }
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(FormatType::Text),
            "json" => Ok(FormatType::Json),
            "json-pretty" | "pretty" => Ok(FormatType::JsonPretty),
            "markdown" | "md" => Ok(FormatType::Markdown),
            "csv" => Ok(FormatType::Csv),
            other => Err(Error::Config(format!("unknown output format '{other}'"))),
        }
    }
}

/// Rows flattened to strings, columns in field order
#[derive(Debug, Default, PartialEq)]
struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => {
                let columns = items.iter().fold(Vec::<String>::new(), |mut columns, item| {
                    match item {
                        Value::Object(map) => {
                            for key in map.keys() {
                                if !columns.contains(key) {
                                    columns.push(key.clone());
                                }
                            }
                        }
                        _ if columns.is_empty() => columns.push("value".to_string()),
                        _ => {}
                    }
                    columns
                });
                let rows = items.iter().map(|item| row_cells(&columns, item)).collect();
                Table { columns, rows }
            }
            Value::Object(map) => {
                let columns: Vec<String> = map.keys().cloned().collect();
                let row = row_cells(&columns, value);
                Table {
                    columns,
                    rows: vec![row],
                }
            }
            scalar => Table {
                columns: vec!["value".to_string()],
                rows: vec![vec![cell_text(scalar)]],
            },
        }
    }
}

fn row_cells(columns: &[String], item: &Value) -> Vec<String> {
    match item {
        Value::Object(map) => columns
            .iter()
            .map(|column| map.get(column).map(cell_text).unwrap_or_default())
            .collect(),
        scalar => vec![cell_text(scalar)],
    }
}

/// Scalar as plain text; nested values as compact JSON
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        nested => nested.to_string(),
    }
}

/// Output formatter for view results
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormatter {
    format_type: FormatType,
}

impl OutputFormatter {
    /// Create a new formatter with the specified format type
    pub fn new(format_type: FormatType) -> Self {
        Self { format_type }
    }

    pub fn format_type(&self) -> FormatType {
        self.format_type
    }

    /// Render any serializable view result
    pub fn format<T: Serialize + ?Sized>(&self, rows: &T) -> Result<String> {
        match self.format_type {
            FormatType::Json => Ok(serde_json::to_string(rows)?),
            FormatType::JsonPretty => Ok(serde_json::to_string_pretty(rows)?),
            FormatType::Markdown => Ok(format_markdown(&Table::from_value(&serde_json::to_value(rows)?))),
            FormatType::Csv => format_csv(&Table::from_value(&serde_json::to_value(rows)?)),
            FormatType::Text => Ok(format_text(&Table::from_value(&serde_json::to_value(rows)?))),
        }
    }
}

fn format_markdown(table: &Table) -> String {
    if table.rows.is_empty() {
        return "_No results_\n".to_string();
    }
    let escape = |cell: &String| cell.replace('|', "\\|");
    let line = |cells: Vec<String>| format!("| {} |\n", cells.join(" | "));

    let mut output = line(table.columns.iter().map(escape).collect());
    output.push_str(&line(table.columns.iter().map(|c| "-".repeat(c.len().max(3))).collect()));
    for row in &table.rows {
        output.push_str(&line(row.iter().map(escape).collect()));
    }
    output
}

fn format_csv(table: &Table) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if !table.columns.is_empty() {
        writer.write_record(&table.columns)?;
    }
    for row in &table.rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| Error::Io(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn format_text(table: &Table) -> String {
    if table.rows.is_empty() {
        return "No results\n".to_string();
    }
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .fold(column.chars().count(), usize::max)
        })
        .collect();
    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut output = line(&table.columns);
    for row in &table.rows {
        output.push_str(&line(row));
    }
    output
}
