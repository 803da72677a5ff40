// ============================================================
// Layer 2 — Dataset Sources
// ============================================================
// Turns a data_path string into a Vec<DataRecord>.
//
// The path is classified by a pure function (no I/O) into one
// of three strategies:
//
//   ".json" / ".jsonl" → JsonSource  (array or JSON-lines)
//   ".csv"             → CsvSource   (headered CSV)
//   anything else      → a named dataset looked up in a
//                        NamedSources registry
//
// Keeping classification separate from loading means the branch
// is testable without touching the filesystem.
//
// Reference: Rust Book §9 (Error Handling), §18 (Patterns)

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::record::DataRecord;
use crate::domain::traits::RecordSource;

// ─── Classification ───────────────────────────────────────────────────────────
/// The loading strategy selected for a data_path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// A .json or .jsonl file on disk
    Json,
    /// A .csv file on disk
    Csv,
    /// An identifier to resolve against a NamedSources registry
    Named(String),
}

/// Classify a data_path by suffix. Pure — no filesystem access.
pub fn classify_data_path(data_path: &str) -> SourceKind {
    if data_path.ends_with(".json") || data_path.ends_with(".jsonl") {
        SourceKind::Json
    } else if data_path.ends_with(".csv") {
        SourceKind::Csv
    } else {
        SourceKind::Named(data_path.to_string())
    }
}

// ─── JsonSource ───────────────────────────────────────────────────────────────
/// Reads records from a JSON file. Accepts either a top-level
/// array of records or JSON-lines (one object per line).
#[derive(Debug)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for JsonSource {
    fn load_records(&self) -> Result<Vec<DataRecord>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read data file '{}'", self.path.display()))?;

        // A JSON array parses in one shot; otherwise treat the
        // file as JSON-lines and parse each non-blank line.
        if raw.trim_start().starts_with('[') {
            let records: Vec<DataRecord> = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid JSON array in '{}'", self.path.display()))?;
            return Ok(records);
        }

        let mut records = Vec::new();
        for (lineno, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: DataRecord = serde_json::from_str(line).with_context(|| {
                format!("Invalid JSON record at {}:{}", self.path.display(), lineno + 1)
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

// ─── CsvSource ────────────────────────────────────────────────────────────────
/// Reads records from a headered CSV file with
/// instruction,input,output columns.
#[derive(Debug)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for CsvSource {
    fn load_records(&self) -> Result<Vec<DataRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Cannot read data file '{}'", self.path.display()))?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: DataRecord = row.with_context(|| {
                format!("Invalid CSV record in '{}'", self.path.display())
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

// ─── NamedSources ─────────────────────────────────────────────────────────────
/// Registry mapping dataset identifiers to files on disk.
///
/// The original pipeline forwarded non-file paths to a hosted
/// dataset hub; this crate has no hub client, so named sources
/// must be registered explicitly before use.
#[derive(Debug, Default)]
pub struct NamedSources {
    registry: HashMap<String, PathBuf>,
}

impl NamedSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as an alias for a record file. The file
    /// is classified by suffix when the name is resolved.
    pub fn register(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.registry.insert(name.into(), path.into());
    }

    fn resolve(&self, name: &str) -> Result<Box<dyn RecordSource>> {
        let Some(path) = self.registry.get(name) else {
            bail!("No registered dataset source named '{name}'");
        };
        match classify_data_path(&path.to_string_lossy()) {
            SourceKind::Json => Ok(Box::new(JsonSource::new(path))),
            SourceKind::Csv => Ok(Box::new(CsvSource::new(path))),
            SourceKind::Named(_) => {
                bail!(
                    "Registered source '{name}' points at '{}', which is not a .json/.jsonl/.csv file",
                    path.display()
                )
            }
        }
    }
}

// ─── open_source ──────────────────────────────────────────────────────────────
/// Select and construct the RecordSource for a data_path.
pub fn open_source(data_path: &str, named: &NamedSources) -> Result<Box<dyn RecordSource>> {
    match classify_data_path(data_path) {
        SourceKind::Json => Ok(Box::new(JsonSource::new(Path::new(data_path)))),
        SourceKind::Csv => Ok(Box::new(CsvSource::new(Path::new(data_path)))),
        SourceKind::Named(name) => named.resolve(&name),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_classify_by_suffix() {
        assert_eq!(classify_data_path("data/train.json"), SourceKind::Json);
        assert_eq!(classify_data_path("data/train.jsonl"), SourceKind::Json);
        assert_eq!(classify_data_path("data/train.csv"), SourceKind::Csv);
        assert_eq!(
            classify_data_path("yahma/alpaca-cleaned"),
            SourceKind::Named("yahma/alpaca-cleaned".to_string())
        );
    }

    #[test]
    fn test_json_array_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d.json");
        fs::write(
            &path,
            r#"[{"instruction":"a","input":"x","output":"1"},
               {"instruction":"b","output":"2"}]"#,
        )
        .unwrap();

        let records = JsonSource::new(&path).load_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].instruction, "a");
        assert!(records[1].input.is_none());
    }

    #[test]
    fn test_jsonl_file_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d.jsonl");
        fs::write(
            &path,
            "{\"instruction\":\"a\",\"output\":\"1\"}\n\n{\"instruction\":\"b\",\"output\":\"2\"}\n",
        )
        .unwrap();

        let records = JsonSource::new(&path).load_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].output, "2");
    }

    #[test]
    fn test_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d.csv");
        fs::write(&path, "instruction,input,output\na,x,1\nb,,2\n").unwrap();

        let records = CsvSource::new(&path).load_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].input.as_deref(), Some("x"));
        // CSV has no missing-cell notion — empty string is fine,
        // has_input already treats it as absent
        assert!(!records[1].has_input());
    }

    #[test]
    fn test_unregistered_name_fails() {
        let named = NamedSources::new();
        let err = open_source("some/hub-dataset", &named).unwrap_err();
        assert!(err.to_string().contains("some/hub-dataset"));
    }

    #[test]
    fn test_registered_name_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d.jsonl");
        fs::write(&path, "{\"instruction\":\"a\",\"output\":\"1\"}\n").unwrap();

        let mut named = NamedSources::new();
        named.register("my-set", &path);
        let records = open_source("my-set", &named).unwrap().load_records().unwrap();
        assert_eq!(records.len(), 1);
    }
}
