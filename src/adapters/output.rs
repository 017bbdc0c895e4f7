//! Rendering of listings as terminal table, CSV or JSON.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tabled::builder::Builder;
use tabled::settings::{Padding, Style};

use crate::domain::model::TabularRecord;
use crate::utils::error::{Result, VarfishError};
use crate::utils::validation::suggest_closest;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = VarfishError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(VarfishError::InvalidConfigValueError {
                field: "output_format".to_string(),
                value: other.to_string(),
                reason: "Valid formats: table, csv, json".to_string(),
            }),
        }
    }
}

/// Where a listing is written to: `-` is stdout, anything else a file path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File(PathBuf),
}

impl FromStr for OutputTarget {
    type Err = VarfishError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "-" => Ok(OutputTarget::Stdout),
            path => {
                crate::utils::validation::validate_path("output_file", path)?;
                Ok(OutputTarget::File(PathBuf::from(path)))
            }
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => f.write_str("-"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl OutputTarget {
    /// Writer for the target. [`OutputTarget::Stdout`] borrows `stdout`; a file is created or truncated.
    pub fn open<'a>(&self, stdout: &'a mut dyn Write) -> Result<Box<dyn Write + 'a>> {
        match self {
            OutputTarget::Stdout => Ok(Box::new(stdout)),
            OutputTarget::File(path) => {
                tracing::debug!("Writing output to {}", path.display());
                Ok(Box::new(BufWriter::new(File::create(path)?)))
            }
        }
    }
}

/// Parse a single-byte field delimiter. `\t` and `tab` stand for a tab.
pub fn parse_delimiter(value: &str) -> Result<u8> {
    match value {
        "\\t" | "tab" | "\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        s => Err(VarfishError::InvalidConfigValueError {
            field: "output_delimiter".to_string(),
            value: s.to_string(),
            reason: "Delimiter must be a single ASCII character".to_string(),
        }),
    }
}

/// Header and rows of a listing, ready to be written in any format.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularOutput {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// The requested fields, or every field of `T` if none were requested.
pub fn header_for<T: TabularRecord>(fields: &[String]) -> Vec<String> {
    if fields.is_empty() {
        T::FIELDS.iter().map(|f| f.to_string()).collect()
    } else {
        fields.to_vec()
    }
}

pub fn tabular_output<T: TabularRecord>(values: &[T], header: &[String]) -> Result<TabularOutput> {
    for field in header {
        if !T::FIELDS.contains(&field.as_str()) {
            let hint = suggest_closest(field, T::FIELDS)
                .map(|name| format!(" (did you mean `{}`?)", name))
                .unwrap_or_default();
            return Err(VarfishError::ValidationError {
                message: format!(
                    "unknown output field `{}`{}; available fields: {}",
                    field,
                    hint,
                    T::FIELDS.join(", ")
                ),
            });
        }
    }

    let mut rows = Vec::with_capacity(values.len());
    for value in values {
        let object = match serde_json::to_value(value)? {
            Value::Object(object) => object,
            other => {
                return Err(VarfishError::ValidationError {
                    message: format!("cannot tabulate non-object value: {}", other),
                })
            }
        };
        rows.push(
            header
                .iter()
                .map(|field| object.get(field).cloned().unwrap_or(Value::Null))
                .collect(),
        );
    }

    Ok(TabularOutput {
        header: header.to_vec(),
        rows,
    })
}

/// Text of a single cell: strings verbatim, null empty, everything else as compact JSON.
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn write_output<W: Write + ?Sized>(
    output: &TabularOutput,
    writer: &mut W,
    format: OutputFormat,
    delimiter: u8,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let mut records: Vec<Vec<String>> = Vec::with_capacity(output.rows.len() + 1);
            records.push(output.header.clone());
            records.extend(
                output
                    .rows
                    .iter()
                    .map(|row| row.iter().map(render_cell).collect()),
            );

            let mut table = Builder::from(records).build();
            table
                .with(Style::modern())
                .with(Padding::new(1, 1, 0, 0));
            writeln!(writer, "{}", table)?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(&mut *writer);
            csv_writer.write_record(&output.header)?;
            for row in &output.rows {
                csv_writer.write_record(row.iter().map(render_cell))?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Json => {
            let records: Vec<serde_json::Map<String, Value>> = output
                .rows
                .iter()
                .map(|row| {
                    output
                        .header
                        .iter()
                        .cloned()
                        .zip(row.iter().cloned())
                        .collect()
                })
                .collect();
            serde_json::to_writer_pretty(&mut *writer, &records)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

/// Pretty JSON (two-space indent) followed by a newline.
pub fn write_json<W: Write + ?Sized, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Heading, underline, blank line, then pretty JSON.
pub fn write_titled_json<W: Write + ?Sized>(writer: &mut W, title: &str, value: &Value) -> Result<()> {
    writeln!(writer, "{}", title)?;
    writeln!(writer, "{}", "=".repeat(title.chars().count()))?;
    writeln!(writer)?;
    write_json(writer, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Project;
    use serde_json::json;

    fn projects() -> Vec<Project> {
        serde_json::from_value(json!([
            {
                "sodar_uuid": "11111111-1111-4111-8111-111111111111",
                "title": "Cohort A",
                "type": "PROJECT",
                "parent": "22222222-2222-4222-8222-222222222222"
            },
            {
                "sodar_uuid": "33333333-3333-4333-8333-333333333333",
                "title": "Cohort, B",
                "type": "PROJECT",
                "public_guest_access": true
            }
        ]))
        .unwrap()
    }

    fn header(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_output_format_parse_and_display() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_target_parse() {
        assert_eq!("-".parse::<OutputTarget>().unwrap(), OutputTarget::Stdout);
        assert_eq!(
            "out.tsv".parse::<OutputTarget>().unwrap(),
            OutputTarget::File(PathBuf::from("out.tsv"))
        );
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert!(parse_delimiter(";;").is_err());
    }

    #[test]
    fn test_header_for_defaults_to_all_fields() {
        assert_eq!(header_for::<Project>(&[]), Project::FIELDS);
        assert_eq!(header_for::<Project>(&header(&["title"])), vec!["title"]);
    }

    #[test]
    fn test_tabular_output_picks_fields_in_order() {
        let output = tabular_output(&projects(), &header(&["title", "parent"])).unwrap();

        assert_eq!(output.header, vec!["title", "parent"]);
        assert_eq!(output.rows.len(), 2);
        assert_eq!(output.rows[0][0], json!("Cohort A"));
        assert_eq!(output.rows[1][1], Value::Null);
    }

    #[test]
    fn test_tabular_output_unknown_field_suggests() {
        let err = tabular_output(&projects(), &header(&["titel"])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("did you mean `title`?"));
        assert!(message.contains("available fields"));
    }

    #[test]
    fn test_tabular_output_empty_values_keeps_header() {
        let output = tabular_output::<Project>(&[], &header(&["title"])).unwrap();
        assert!(output.rows.is_empty());

        let mut buffer = Vec::new();
        write_output(&output, &mut buffer, OutputFormat::Csv, b',').unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "title\n");
    }

    #[test]
    fn test_write_csv_quotes_and_renders_cells() {
        let output =
            tabular_output(&projects(), &header(&["title", "parent", "public_guest_access"]))
                .unwrap();

        let mut buffer = Vec::new();
        write_output(&output, &mut buffer, OutputFormat::Csv, b',').unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "title,parent,public_guest_access");
        assert_eq!(
            lines[1],
            "Cohort A,22222222-2222-4222-8222-222222222222,false"
        );
        assert_eq!(lines[2], "\"Cohort, B\",,true");
    }

    #[test]
    fn test_write_tsv() {
        let output = tabular_output(&projects(), &header(&["title", "type"])).unwrap();

        let mut buffer = Vec::new();
        write_output(&output, &mut buffer, OutputFormat::Csv, b'\t').unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("title\ttype\n"));
        assert!(text.contains("Cohort, B\tPROJECT"));
    }

    #[test]
    fn test_write_json_keeps_header_order() {
        let output = tabular_output(&projects(), &header(&["type", "title"])).unwrap();

        let mut buffer = Vec::new();
        write_output(&output, &mut buffer, OutputFormat::Json, b',').unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0], json!({"type": "PROJECT", "title": "Cohort A"}));
        assert!(text.find("\"type\"").unwrap() < text.find("\"title\"").unwrap());
        assert!(text.contains("\n  {\n    \"type\""));
    }

    #[test]
    fn test_write_table_contains_header_and_cells() {
        let output = tabular_output(&projects(), &header(&["title", "type"])).unwrap();

        let mut buffer = Vec::new();
        write_output(&output, &mut buffer, OutputFormat::Table, b',').unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("title"));
        assert!(text.contains("Cohort, B"));
        assert!(text.contains("PROJECT"));
    }

    #[test]
    fn test_write_titled_json() {
        let mut buffer = Vec::new();
        write_titled_json(&mut buffer, "Query Status", &json!({"status": "done"})).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Query Status\n============\n\n{\n  \"status\": \"done\"\n}\n"
        );
    }

    #[test]
    fn test_output_target_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale content\n").unwrap();
        let target = OutputTarget::File(path.clone());

        let mut stdout = Vec::new();
        {
            let mut writer = target.open(&mut stdout).unwrap();
            writer.write_all(b"a,b\n").unwrap();
            writer.flush().unwrap();
        }

        assert!(stdout.is_empty());
        assert_eq!(std::fs::read_to_string(path).unwrap(), "a,b\n");
    }

    #[test]
    fn test_output_target_stdout() {
        let mut stdout = Vec::new();
        {
            let mut writer = OutputTarget::Stdout.open(&mut stdout).unwrap();
            writer.write_all(b"a,b\n").unwrap();
        }
        assert_eq!(stdout, b"a,b\n");
    }
}
