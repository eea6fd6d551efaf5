//! Records table model
//!
//! What the Home view shows below the form. Built fresh from the record list
//! on every render, so two renders of the same records are identical.

use serde::Serialize;

use crate::records::StudentRecord;

/// Column titles, the last one holding the per-row delete control
pub const TABLE_HEADER: [&str; 8] = ["Reg", "Name", "D", "S", "C", "I", "Assignment", "Action"];

/// Shown in place of data rows when there are no records
pub const EMPTY_MESSAGE: &str = "No Records Found";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableRow {
    /// One record; `cells` excludes the action column
    Record {
        register_number: String,
        cells: [String; 7],
    },
    /// Placeholder row spanning every column
    Empty { message: &'static str, colspan: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub header: [&'static str; 8],
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn from_records(records: &[StudentRecord]) -> Self {
        let rows = if records.is_empty() {
            vec![TableRow::Empty {
                message: EMPTY_MESSAGE,
                colspan: TABLE_HEADER.len(),
            }]
        } else {
            records
                .iter()
                .map(|r| {
                    let [d, s, c, i] = r.scores.cells();
                    TableRow::Record {
                        register_number: r.register_number.clone(),
                        cells: [
                            r.register_number.clone(),
                            r.name.clone(),
                            d,
                            s,
                            c,
                            i,
                            r.assignment.clone(),
                        ],
                    }
                })
                .collect()
        };

        Self {
            header: TABLE_HEADER,
            rows,
        }
    }

    /// Number of rows backed by a record
    pub fn data_rows(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r, TableRow::Record { .. }))
            .count()
    }

    /// Header plus body rows
    pub fn total_rows(&self) -> usize {
        1 + self.rows.len()
    }

    /// Fixed-width text rendering for terminals. The action column is omitted.
    pub fn render_text(&self) -> String {
        let columns = &self.header[..7];
        let mut widths: Vec<usize> = columns.iter().map(|h| h.chars().count()).collect();

        for row in &self.rows {
            if let TableRow::Record { cells, .. } = row {
                for (w, cell) in widths.iter_mut().zip(cells.iter()) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let mut out = String::new();
        out.push_str(&format_line(columns.iter().copied(), &widths));
        out.push('\n');
        out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 3 * (widths.len() - 1)));
        out.push('\n');

        for row in &self.rows {
            match row {
                TableRow::Record { cells, .. } => {
                    out.push_str(&format_line(cells.iter().map(String::as_str), &widths));
                }
                TableRow::Empty { message, .. } => out.push_str(message),
            }
            out.push('\n');
        }

        out
    }
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
