//! In-memory sheet.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{Cell, SheetError, SheetStore, Table};

/// Holds raw cell values exactly as a spreadsheet tab would.
///
/// Failure injection: `fail_writes` makes `write_table` fail after `clear`
/// succeeded, which is how a mid-write outage looks from the outside.
#[derive(Debug, Default)]
pub struct MemorySheet {
    values: Mutex<Vec<Vec<Cell>>>,
    reads: AtomicUsize,
    fail_writes: bool,
}

impl MemorySheet {
    pub fn new(values: Vec<Vec<Cell>>) -> Self {
        Self {
            values: Mutex::new(values),
            ..Self::default()
        }
    }

    /// Build from string slices: first row header, rest data.
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|r| r.iter().map(|c| Cell::from(*c)).collect())
                .collect(),
        )
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Current cell values (header first).
    pub fn values(&self) -> Vec<Vec<Cell>> {
        self.values.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Vec<Cell>>>, SheetError> {
        self.values
            .lock()
            .map_err(|_| SheetError::Malformed("memory sheet lock poisoned".to_string()))
    }
}

impl SheetStore for MemorySheet {
    fn read_table(&self) -> Result<Table, SheetError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Table::from_values(self.lock()?.clone())
    }

    fn clear(&self) -> Result<(), SheetError> {
        self.lock()?.clear();
        Ok(())
    }

    fn write_table(&self, table: &Table) -> Result<(), SheetError> {
        if self.fail_writes {
            return Err(SheetError::Api {
                status: 503,
                message: "write rejected".to_string(),
            });
        }
        *self.lock()? = table.to_values();
        Ok(())
    }
}
