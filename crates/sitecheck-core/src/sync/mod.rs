//! Sheet synchronizer: read rows, classify each site, write the sheet back.
//!
//! The spreadsheet and the fetcher are both blocking; every call into them
//! runs on tokio's blocking pool so the server stays responsive during a run.

mod classify_all;
mod result_table;

pub use classify_all::classify_all;
pub use result_table::{
    build_result_table, prepare, PreparedInput, EXPLANATION_COLUMN, VERDICT_COLUMN,
    WEBSITE_COLUMN,
};

use std::sync::Arc;

use crate::classifier::{Label, Verdict};
use crate::error::{SheetOp, SyncError};
use crate::fetch::SiteFetcher;
use crate::sheet::{SheetError, SheetStore, Table};

/// Counts for one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub rows: usize,
    pub yes: usize,
    pub no: usize,
    /// Subset of `no` caused by a fetch or worker failure.
    pub errors: usize,
}

impl SyncReport {
    pub fn from_verdicts(verdicts: &[Verdict]) -> Self {
        let mut report = Self {
            rows: verdicts.len(),
            ..Self::default()
        };
        for v in verdicts {
            match v.label {
                Label::Yes => report.yes += 1,
                Label::No => report.no += 1,
            }
            if v.is_error() {
                report.errors += 1;
            }
        }
        report
    }
}

/// One configured spreadsheet plus the fetcher used for its sites.
#[derive(Clone)]
pub struct SheetSynchronizer {
    store: Arc<dyn SheetStore>,
    fetcher: SiteFetcher,
    concurrency: usize,
}

impl SheetSynchronizer {
    /// Sequential classification (one fetch at a time).
    pub fn new(store: Arc<dyn SheetStore>, fetcher: SiteFetcher) -> Self {
        Self {
            store,
            fetcher,
            concurrency: 1,
        }
    }

    /// Allow up to `n` fetches in flight; `0` is treated as `1`.
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Runs one full synchronization.
    ///
    /// Input problems are detected before any site is fetched. A failure
    /// while writing leaves the sheet cleared; the error says so.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let table = self
            .blocking(SheetOp::Read, |store| store.read_table())
            .await?;
        tracing::info!(rows = table.len(), "sheet read");

        let input = prepare(table)?;
        let verdicts = classify_all(input.urls.clone(), &self.fetcher, self.concurrency).await;
        let report = SyncReport::from_verdicts(&verdicts);
        let result = result_for(&input, &verdicts)?;

        self.blocking(SheetOp::Clear, |store| store.clear()).await?;
        let write = self
            .blocking(SheetOp::Write, move |store| store.write_table(&result))
            .await;
        if let Err(e) = write {
            let e = mark_cleared(e);
            tracing::error!("{e}");
            return Err(e);
        }

        tracing::info!(
            rows = report.rows,
            yes = report.yes,
            no = report.no,
            errors = report.errors,
            "sheet updated"
        );
        Ok(report)
    }

    async fn blocking<T, F>(&self, op: SheetOp, f: F) -> Result<T, SyncError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn SheetStore) -> Result<T, SheetError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| SyncError::Worker(e.to_string()))?
            .map_err(|source| SyncError::Sheet {
                op,
                source,
                sheet_cleared: false,
            })
    }
}

/// The table to write back. Nothing has touched the sheet yet when this fails.
fn result_for(input: &PreparedInput, verdicts: &[Verdict]) -> Result<Table, SyncError> {
    if verdicts.len() != input.urls.len() {
        return Err(SyncError::Worker(format!(
            "{} verdicts for {} rows",
            verdicts.len(),
            input.urls.len()
        )));
    }
    build_result_table(input, verdicts)
        .map_err(|e| SyncError::Worker(format!("building result table: {e}")))
}

fn mark_cleared(e: SyncError) -> SyncError {
    match e {
        SyncError::Sheet { op, source, .. } => SyncError::Sheet {
            op,
            source,
            sheet_cleared: true,
        },
        other => other,
    }
}
