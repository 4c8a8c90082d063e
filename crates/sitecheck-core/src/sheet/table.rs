//! Named-column table read from / written to a sheet.

use std::ops::Range;

use super::{Cell, SheetError};

/// A header row plus data rows, every row exactly as wide as the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Builds a table; short rows are padded with empty cells.
    ///
    /// A row with values past the last header cell widens the header with
    /// unnamed columns. Column names must be unique, so at most one column
    /// may be unnamed.
    pub fn new(mut header: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, SheetError> {
        let width = rows
            .iter()
            .map(|row| used_width(row))
            .fold(header.len(), usize::max);
        header.resize(width, String::new());

        for (i, name) in header.iter().enumerate() {
            if header[..i].contains(name) {
                return Err(SheetError::Malformed(if name.is_empty() {
                    "more than one column has an empty header".to_string()
                } else {
                    format!("duplicate column name '{name}'")
                }));
            }
        }

        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::default());
                row
            })
            .collect();

        Ok(Self { header, rows })
    }

    /// Interprets raw sheet values: first row is the header, the rest are records.
    /// A blank sheet yields an empty table with no columns.
    pub fn from_values(mut values: Vec<Vec<Cell>>) -> Result<Self, SheetError> {
        if values.is_empty() {
            return Ok(Self::default());
        }
        let rows = values.split_off(1);
        let header = values
            .pop()
            .unwrap_or_default()
            .iter()
            .map(Cell::to_string)
            .collect();
        Self::new(header, rows)
    }

    /// Header followed by rows, ready to be written back.
    pub fn to_values(&self) -> Vec<Vec<Cell>> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(self.header.iter().map(|h| Cell::text(h.as_str())).collect());
        out.extend(self.rows.iter().cloned());
        out
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Cell by row position and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[col])
    }

    /// Drops the columns at `range` (clamped to the table width).
    pub fn drop_columns(&mut self, range: Range<usize>) {
        let end = range.end.min(self.header.len());
        let start = range.start.min(end);
        self.header.drain(start..end);
        for row in &mut self.rows {
            row.drain(start..end);
        }
    }
}

/// Width up to and including the last non-empty cell.
fn used_width(row: &[Cell]) -> usize {
    row.iter().rposition(|c| !c.is_empty()).map_or(0, |i| i + 1)
}
