use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use std::time::Instant;

use crate::{db, AppState};

/// Component health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: ComponentStatus,
    pub version: &'static str,
    pub database: ComponentStatus,
    pub latency_ms: u128,
}

/// Readiness probe: pings the database.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let database = match db::check_connection(&state.db).await {
        Ok(()) => ComponentStatus::Up,
        Err(_) => ComponentStatus::Down,
    };
    let status_code = match database {
        ComponentStatus::Up => StatusCode::OK,
        ComponentStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        status_code,
        Json(HealthResponse {
            status: database,
            version: env!("CARGO_PKG_VERSION"),
            database,
            latency_ms: start.elapsed().as_millis(),
        }),
    )
}
