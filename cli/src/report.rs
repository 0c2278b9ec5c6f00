//! Tabular command output rendered as a table, JSON or CSV

use comfy_table::{ContentArrangement, Table};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Rows of JSON cells under named columns, plus an optional footer line
/// shown in table mode.
#[derive(Debug, Default)]
pub struct Report {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Value>>,
    pub footer: Option<String>,
}

impl Report {
    pub fn new(columns: Vec<&'static str>) -> Self {
        Report {
            columns,
            ..Default::default()
        }
    }

    pub fn push(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.render_json(),
            OutputFormat::Csv => self.render_csv(),
            OutputFormat::Table => self.render_table(),
        }
    }

    fn render_json(&self) -> String {
        let records: Vec<Value> = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(column, cell)| (column.to_string(), cell.clone()))
                    .collect();
                Value::Object(object)
            })
            .collect();
        serde_json::to_string_pretty(&records).unwrap_or_default()
    }

    fn render_csv(&self) -> String {
        let mut lines = vec![self.columns.join(",")];
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(format_csv_value).collect();
            lines.push(cells.join(","));
        }
        lines.join("\n")
    }

    fn render_table(&self) -> String {
        if self.rows.is_empty() {
            return "(no results)".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(&self.columns);
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(format_table_value).collect();
            table.add_row(cells);
        }

        match &self.footer {
            Some(footer) => format!("{}\n{}", table, footer),
            None => table.to_string(),
        }
    }
}

/// JSON cell for a distance; infinite distances become `null`.
pub fn distance_cell(distance: f64) -> Value {
    if distance.is_finite() {
        Value::from(distance)
    } else {
        Value::Null
    }
}

fn format_table_value(v: &Value) -> String {
    match v {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(format_table_value)
            .collect::<Vec<_>>()
            .join(" -> "),
        Value::Object(_) => serde_json::to_string(v).unwrap_or_default(),
    }
}

fn format_csv_value(v: &Value) -> String {
    match v {
        Value::Null => "".to_string(),
        Value::String(s) => {
            if s.contains(',') || s.contains('"') || s.contains('\n') {
                format!("\"{}\"", s.replace('"', "\"\""))
            } else {
                s.clone()
            }
        }
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => {
            let json = serde_json::to_string(v).unwrap_or_default();
            format!("\"{}\"", json.replace('"', "\"\""))
        }
    }
}
