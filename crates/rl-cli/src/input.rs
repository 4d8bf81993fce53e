//! Loading raw race records from disk or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rl_core::RawRecord;
use serde_json::Value;

use crate::Config;

/// Where to read race records from.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// JSON array or JSON-lines file of race records (`-` for stdin).
    ///
    /// Defaults to the configured `input_path`.
    #[arg(value_name = "INPUT")]
    pub path: Option<PathBuf>,
}

impl InputArgs {
    /// Reads and decodes the selected input.
    pub fn load(&self, config: &Config) -> Result<Vec<RawRecord>> {
        let path = self.path.as_deref().unwrap_or(&config.input_path);
        let text = read_source(path)?;
        let records =
            parse_records(&text).with_context(|| format!("failed to parse {}", path.display()))?;
        tracing::debug!(count = records.len(), path = %path.display(), "loaded race records");
        Ok(records)
    }
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Decodes a JSON array or JSON lines of records.
///
/// One bad entry never stops the rest of the set: JSON-lines rows that are not
/// valid JSON, and entries that are not JSON objects, are skipped with a
/// warning naming their position. Only a malformed JSON array is an error.
pub fn parse_records(text: &str) -> Result<Vec<RawRecord>> {
    let trimmed = text.trim_start();
    let values: Vec<(usize, Value)> = if trimmed.starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(trimmed).context("invalid JSON array")?;
        values.into_iter().enumerate().map(|(i, v)| (i + 1, v)).collect()
    } else {
        let mut values = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(line) {
                Ok(value) => values.push((idx + 1, value)),
                Err(err) => {
                    tracing::warn!(line = idx + 1, error = %err, "skipping invalid JSON line");
                }
            }
        }
        values
    };

    let mut records = Vec::with_capacity(values.len());
    for (position, value) in values {
        if !value.is_object() {
            tracing::warn!(position, "skipping entry that is not a race record");
            continue;
        }
        match serde_json::from_value::<RawRecord>(value) {
            Ok(record) => records.push(record),
            Err(err) => tracing::warn!(position, error = %err, "skipping invalid race record"),
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_array() {
        let input = r#"[
            {"event": "Spring 5K", "date": "2021-04-10", "time": "22:30", "pace": "7:15"},
            {"event": "Boston Marathon", "date": "2023-04-17"}
        ]"#;
        let records = parse_records(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].event, "Boston Marathon");
    }

    #[test]
    fn parses_json_lines() {
        let input = "{\"event\": \"Spring 5K\"}\n\n{\"event\": \"Parkway Half\", \"distanceType\": \"Half Marathon\"}\n";
        let records = parse_records(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].distance_type.as_deref(), Some("Half Marathon"));
    }

    #[test]
    fn invalid_json_line_is_skipped() {
        let input = "{\"event\": \"Spring 5K\"}\n{not json\n{\"event\": \"Parkway Half\"}\n";
        let records = parse_records(input).unwrap();
        let events: Vec<&str> = records.iter().map(|r| r.event.as_str()).collect();
        assert_eq!(events, ["Spring 5K", "Parkway Half"]);
    }

    #[test]
    fn malformed_array_is_an_error() {
        let err = parse_records("[{\"event\": \"Spring 5K\"},").unwrap_err();
        assert_eq!(err.to_string(), "invalid JSON array");
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let input = r#"[{"event": "Spring 5K"}, "stray", 42, {"event": "Parkway Half"}]"#;
        let records = parse_records(input).unwrap();
        let events: Vec<&str> = records.iter().map(|r| r.event.as_str()).collect();
        assert_eq!(events, ["Spring 5K", "Parkway Half"]);
    }

    #[test]
    fn empty_input_is_empty_set() {
        assert!(parse_records("").unwrap().is_empty());
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn load_reads_configured_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("races.jsonl");
        std::fs::write(&path, "{\"event\": \"Spring 5K\"}\n").unwrap();
        let config = Config {
            input_path: path,
            ..Config::default()
        };

        let records = InputArgs::default().load(&config).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn load_reports_missing_file() {
        let args = InputArgs {
            path: Some(PathBuf::from("/nonexistent/races.json")),
        };
        let err = args.load(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("failed to read /nonexistent/races.json"));
    }
}
