//! CLI command handlers, one per file.

mod check;
mod run;
mod serve;

pub use check::run_check;
pub use run::run_sync;
pub use serve::run_serve;

use anyhow::{Context, Result};
use sitecheck_core::config::SitecheckConfig;
use sitecheck_core::fetch::SiteFetcher;
use sitecheck_core::sheet::GoogleSheets;
use sitecheck_core::sync::SheetSynchronizer;
use std::sync::Arc;

/// Builds the Google Sheets client from the environment, checks it can reach
/// the spreadsheet, and wires it to a curl fetcher.
pub(crate) async fn connect_synchronizer(cfg: &SitecheckConfig) -> Result<SheetSynchronizer> {
    let sheets = GoogleSheets::from_config(cfg)
        .with_context(|| format!("load credentials from ${}", cfg.credentials_env))?;
    let sheets = tokio::task::spawn_blocking(move || sheets.connect().map(|()| sheets))
        .await
        .context("connect task failed")?
        .with_context(|| format!("open spreadsheet '{}'", cfg.spreadsheet_name))?;

    Ok(
        SheetSynchronizer::new(Arc::new(sheets), SiteFetcher::curl())
            .with_concurrency(cfg.classify_concurrency),
    )
}
