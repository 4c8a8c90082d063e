//! Spreadsheet collaborator.
//!
//! The synchronizer only depends on [`SheetStore`]; the Google implementation
//! and the in-memory one are interchangeable behind it.

mod cell;
mod error;
pub mod google;
mod memory;
mod table;

pub use cell::Cell;
pub use error::SheetError;
pub use google::{Endpoints, GoogleSheets, ServiceAccountKey};
pub use memory::MemorySheet;
pub use table::Table;

/// Whole-sheet operations needed for one run. Implementations block.
pub trait SheetStore: Send + Sync {
    /// All rows as records keyed by the header row.
    fn read_table(&self) -> Result<Table, SheetError>;
    /// Remove every value from the sheet.
    fn clear(&self) -> Result<(), SheetError>;
    /// Write header + rows starting at the top-left cell.
    fn write_table(&self, table: &Table) -> Result<(), SheetError>;
}
