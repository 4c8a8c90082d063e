//! HTTP endpoint: `POST /check-websites` runs one synchronization.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use sitecheck_core::sync::SheetSynchronizer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    synchronizer: Arc<SheetSynchronizer>,
}

impl AppState {
    pub fn new(synchronizer: SheetSynchronizer) -> Self {
        Self {
            synchronizer: Arc::new(synchronizer),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/check-websites", post(check_websites))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// The request body is ignored; every request is a full run.
async fn check_websites(State(state): State<AppState>) -> Response {
    match state.synchronizer.run().await {
        Ok(report) => {
            tracing::info!(rows = report.rows, "check-websites succeeded");
            (StatusCode::OK, Json(json!({"status": "success"}))).into_response()
        }
        Err(e) if e.is_input() => {
            tracing::warn!("check-websites rejected: {e}");
            (StatusCode::BAD_REQUEST, Json(json!({"error": e.to_string()}))).into_response()
        }
        Err(e) => {
            tracing::error!("check-websites failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}

pub async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                tracing::warn!("signal handlers unavailable, falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("shutdown signal received");
}
