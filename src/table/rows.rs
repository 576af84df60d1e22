//! Row snapshots and delimited-text ingestion.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::core::errors::{DashError, Result};

/// One rendered record: the display text of each cell, left to right.
///
/// Rows are snapshots. Sorting reorders them but never edits a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    #[must_use]
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Cell text at `index`, or `None` when the row is shorter.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Join the cells back into one delimited line.
    #[must_use]
    pub fn to_delimited(&self, delimiter: char) -> String {
        let mut sep = [0_u8; 4];
        self.cells.join(&*delimiter.encode_utf8(&mut sep))
    }
}

impl From<Vec<String>> for Row {
    fn from(cells: Vec<String>) -> Self {
        Self::new(cells)
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Rows read from delimited text, with the optional header split off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DelimitedTable {
    pub header: Option<Row>,
    pub rows: Vec<Row>,
}

/// Read one row per line, splitting on `delimiter`. Blank lines are skipped.
///
/// Rows must all have the same width as the first one; a ragged table is
/// rejected here so the sort precondition (valid column index for every
/// row) holds downstream.
pub fn read_delimited<R: BufRead>(
    reader: R,
    delimiter: char,
    has_header: bool,
) -> Result<DelimitedTable> {
    let mut table = DelimitedTable::default();
    let mut width: Option<usize> = None;

    for (number, line) in reader.lines().enumerate() {
        let line_no = number + 1;
        let line = line.map_err(|error| DashError::TableInput {
            line: line_no,
            details: error.to_string(),
        })?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let row: Row = line.split(delimiter).collect();
        match width {
            None => width = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(DashError::TableInput {
                    line: line_no,
                    details: format!("expected {expected} cells, found {}", row.len()),
                });
            }
            Some(_) => {}
        }

        if has_header && table.header.is_none() {
            table.header = Some(row);
        } else {
            table.rows.push(row);
        }
    }

    Ok(table)
}
