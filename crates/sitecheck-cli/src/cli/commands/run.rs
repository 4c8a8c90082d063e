//! `sitecheck run` – one synchronization from the terminal.

use anyhow::Result;
use sitecheck_core::config::SitecheckConfig;

use super::connect_synchronizer;

pub async fn run_sync(cfg: &SitecheckConfig) -> Result<()> {
    let synchronizer = connect_synchronizer(cfg).await?;
    let report = synchronizer.run().await?;
    println!(
        "{} rows: {} yes, {} no ({} errors)",
        report.rows, report.yes, report.no, report.errors
    );
    Ok(())
}
