//! `sitecheck serve` – HTTP endpoint that triggers a run per request.

use anyhow::{Context, Result};
use sitecheck_core::config::SitecheckConfig;

use super::connect_synchronizer;
use crate::server::{self, AppState};

pub async fn run_serve(cfg: &SitecheckConfig, bind: Option<&str>) -> Result<()> {
    let addr = bind.unwrap_or(&cfg.bind_addr);
    let synchronizer = connect_synchronizer(cfg).await?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    let local = listener.local_addr()?;
    tracing::info!(%local, spreadsheet = %cfg.spreadsheet_name, "listening");
    println!("sitecheck listening on http://{local}");

    let app = server::build_router(AppState::new(synchronizer));
    axum::serve(listener, app)
        .with_graceful_shutdown(server::wait_for_shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}
