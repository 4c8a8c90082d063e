//! Error taxonomy for a sync run.
//!
//! Three kinds: bad sheet input (caller's fault), per-site classification
//! failures (recovered as "no" verdicts), and everything that aborts a run.
//! Text is produced by `Display` only; callers map kinds to status codes.

use std::fmt;
use thiserror::Error;

use crate::fetch::FetchError;
use crate::sheet::SheetError;

/// The sheet content cannot be processed as given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Missing '{column}' column")]
    MissingColumn { column: String },
    /// A column the run writes already exists somewhere other than right after `Website`.
    #[error("Column '{column}' already exists; move it directly after 'Website' or rename it")]
    ReservedColumn { column: String },
}

/// One site could not be classified. Never aborts a run.
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("{source}")]
    Fetch { url: String, source: FetchError },
    #[error("classification task failed: {0}")]
    Worker(String),
}

/// Which spreadsheet step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetOp {
    Read,
    Clear,
    Write,
}

impl fmt::Display for SheetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SheetOp::Read => "read",
            SheetOp::Clear => "clear",
            SheetOp::Write => "write",
        };
        f.write_str(s)
    }
}

/// A run failed and was aborted.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Input(#[from] InputError),
    /// `sheet_cleared` is true when the sheet had already been emptied (write after clear).
    #[error("sheet {op} failed: {source}{}", cleared_note(.sheet_cleared))]
    Sheet {
        op: SheetOp,
        source: SheetError,
        sheet_cleared: bool,
    },
    #[error("sync task failed: {0}")]
    Worker(String),
}

fn cleared_note(sheet_cleared: &bool) -> &'static str {
    if *sheet_cleared {
        " (the sheet was cleared and is now empty)"
    } else {
        ""
    }
}

impl SyncError {
    pub fn is_input(&self) -> bool {
        matches!(self, SyncError::Input(_))
    }
}
