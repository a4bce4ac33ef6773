use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use valour_shared::{HealthCheck, HealthResponse, HealthStatus};

use crate::services::profile_service;
use crate::AppState;

/// Health check that probes the database.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    let database = HealthCheck::from_result("database", profile_service::ping(state.bot.db()));
    let response = HealthResponse::from_checks("valour-bot", env!("CARGO_PKG_VERSION"), vec![database]);

    let status = match response.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(response)).into_response()
}

/// Returns Prometheus metrics.
pub async fn metrics(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}
