//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::state::AppState;
use crate::inspect::{signature_count, ENGINE_VERSION};

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/status", get(status))
        .route("/scan", get(scan));

    if state.config.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    if state.config.logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Status endpoint
async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "engine_version": ENGINE_VERSION,
        "uptime_secs": state.uptime().as_secs(),
        "mode": state.inspector.config().mode,
        "max_depth": state.inspector.config().max_depth,
        "signatures": signature_count(),
        "automaton_states": state.inspector.automaton_states(),
    }))
}

/// Scan query parameters
#[derive(Deserialize)]
pub struct ScanParams {
    /// URL-decoded inspection input, `tokens|payload`
    #[serde(default)]
    input: Option<String>,
}

/// Inspect one input and render the verdict as `"<status>|<detected>"`.
///
/// A missing `input` parameter is the no-usable-input case: nothing is
/// inspected and the body stays empty.
async fn scan(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScanParams>,
) -> impl IntoResponse {
    let Some(input) = params.input else {
        return (StatusCode::OK, String::new());
    };

    let verdict = state.inspector.inspect(&input);
    tracing::debug!(
        status = verdict.status,
        detected = verdict.detected,
        len = input.len(),
        "scan verdict"
    );

    (StatusCode::OK, verdict.wire())
}
