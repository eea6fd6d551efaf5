//! CSV Export
//!
//! Turns the current record set into the `student_scores.csv` download.
//!
//! The register number column is written as a spreadsheet formula
//! (`="0042"`) so spreadsheet programs keep it as text and leading zeros
//! survive. Free-text columns are written according to [`CsvStyle`].

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::records::StudentRecord;

/// File name offered for every export
pub const EXPORT_FILE_NAME: &str = "student_scores.csv";

/// Fixed header row
pub const CSV_HEADER: [&str; 7] = ["Register Number", "Name", "D", "S", "C", "I", "Assignment"];

/// How free-text fields are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvStyle {
    /// Fields joined with commas as-is. A comma or quote inside a name or
    /// assignment shifts that row's columns.
    #[default]
    Verbatim,
    /// Fields quoted when they contain a delimiter, quote or line break
    Rfc4180,
}

impl FromStr for CsvStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbatim" => Ok(CsvStyle::Verbatim),
            "rfc4180" | "quoted" => Ok(CsvStyle::Rfc4180),
            other => Err(format!("unknown CSV style: {}", other)),
        }
    }
}

impl fmt::Display for CsvStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvStyle::Verbatim => f.write_str("verbatim"),
            CsvStyle::Rfc4180 => f.write_str("rfc4180"),
        }
    }
}

/// A generated export ready to be downloaded or written
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub file_name: &'static str,
    pub content: String,
    /// Data rows, header excluded
    pub rows: usize,
}

impl CsvExport {
    /// Write to `path`, or to `path/student_scores.csv` when `path` is a directory
    pub fn write_to(&self, path: &Path) -> Result<std::path::PathBuf, ExportError> {
        let target = if path.is_dir() {
            path.join(self.file_name)
        } else {
            path.to_path_buf()
        };

        std::fs::write(&target, self.content.as_bytes())?;
        tracing::info!(path = ?target, rows = self.rows, "CSV export written");
        Ok(target)
    }
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export is not valid UTF-8")]
    Encoding,
}

/// Build the export for `records`.
///
/// Returns `Ok(None)` for an empty record set: there is nothing to download.
pub fn build_csv(records: &[StudentRecord], style: CsvStyle) -> Result<Option<CsvExport>, ExportError> {
    if records.is_empty() {
        return Ok(None);
    }

    let content = match style {
        CsvStyle::Verbatim => format_verbatim(records),
        CsvStyle::Rfc4180 => format_quoted(records)?,
    };

    Ok(Some(CsvExport {
        file_name: EXPORT_FILE_NAME,
        content,
        rows: records.len(),
    }))
}

/// `="value"` keeps spreadsheets from reading the key as a number
pub fn register_number_cell(register_number: &str) -> String {
    format!("=\"{}\"", register_number)
}

fn row_cells(record: &StudentRecord) -> [String; 7] {
    let [d, s, c, i] = record.scores.cells();
    [
        register_number_cell(&record.register_number),
        record.name.clone(),
        d,
        s,
        c,
        i,
        record.assignment.clone(),
    ]
}

fn format_verbatim(records: &[StudentRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for record in records {
        lines.push(row_cells(record).join(","));
    }

    lines.join("\n")
}

fn format_quoted(records: &[StudentRecord]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record(row_cells(record))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    let mut text = String::from_utf8(bytes).map_err(|_| ExportError::Encoding)?;

    // Same shape as the verbatim output: no terminator after the last row
    if text.ends_with('\n') {
        text.pop();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Scores;

    fn sample() -> Vec<StudentRecord> {
        vec![
            StudentRecord::new("0042", "Asha", Scores::new(8.0, 7.5, 9.0, 6.0), "Essay"),
            StudentRecord::new("0043", "Ravi", Scores::new(5.0, 5.0, 5.0, 5.0), ""),
        ]
    }

    #[test]
    fn test_empty_is_noop() {
        assert!(build_csv(&[], CsvStyle::Verbatim).unwrap().is_none());
        assert!(build_csv(&[], CsvStyle::Rfc4180).unwrap().is_none());
    }

    #[test]
    fn test_verbatim_layout() {
        let export = build_csv(&sample(), CsvStyle::Verbatim).unwrap().unwrap();
        let lines: Vec<&str> = export.content.lines().collect();

        assert_eq!(export.file_name, "student_scores.csv");
        assert_eq!(export.rows, 2);
        assert_eq!(lines[0], "Register Number,Name,D,S,C,I,Assignment");
        assert_eq!(lines[1], "=\"0042\",Asha,8,7.5,9,6,Essay");
        assert_eq!(lines[2], "=\"0043\",Ravi,5,5,5,5,");
        assert!(!export.content.ends_with('\n'));
    }

    #[test]
    fn test_every_row_starts_with_formula() {
        let export = build_csv(&sample(), CsvStyle::Verbatim).unwrap().unwrap();

        for (line, record) in export.content.lines().skip(1).zip(sample()) {
            let first = line.split(',').next().unwrap();
            assert_eq!(first, format!("=\"{}\"", record.register_number));
        }
    }

    #[test]
    fn test_verbatim_does_not_escape_free_text() {
        let records = vec![StudentRecord::new("1", "Doe, Jane", Scores::default(), "say \"hi\"")];
        let export = build_csv(&records, CsvStyle::Verbatim).unwrap().unwrap();

        assert_eq!(
            export.content.lines().nth(1).unwrap(),
            "=\"1\",Doe, Jane,0,0,0,0,say \"hi\""
        );
    }

    #[test]
    fn test_rfc4180_quotes_when_needed() {
        let records = vec![StudentRecord::new("1", "Doe, Jane", Scores::default(), "Lab")];
        let export = build_csv(&records, CsvStyle::Rfc4180).unwrap().unwrap();
        let lines: Vec<&str> = export.content.lines().collect();

        assert_eq!(lines[0], "Register Number,Name,D,S,C,I,Assignment");
        assert_eq!(lines[1], "\"=\"\"1\"\"\",\"Doe, Jane\",0,0,0,0,Lab");
        assert!(!export.content.ends_with('\n'));

        // A standard reader gets the original values back
        let mut reader = csv::Reader::from_reader(export.content.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "=\"1\"");
        assert_eq!(&row[1], "Doe, Jane");
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("verbatim".parse::<CsvStyle>().unwrap(), CsvStyle::Verbatim);
        assert_eq!("RFC4180".parse::<CsvStyle>().unwrap(), CsvStyle::Rfc4180);
        assert!("xlsx".parse::<CsvStyle>().is_err());
    }

    #[test]
    fn test_write_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let export = build_csv(&sample(), CsvStyle::Verbatim).unwrap().unwrap();

        let path = export.write_to(dir.path()).unwrap();

        assert_eq!(path, dir.path().join("student_scores.csv"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), export.content);
    }
}
