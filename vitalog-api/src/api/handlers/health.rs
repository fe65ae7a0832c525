use std::time::{SystemTime, UNIX_EPOCH};

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use vitalog_domain::health::{system_health, SystemStatus};

use crate::api::AppState;

/// Server start time, set once at startup for uptime reporting
static SERVER_START_TIME: OnceCell<u64> = OnceCell::new();

/// Record the server start time. Idempotent.
pub fn initialize_server_start_time() {
    let _ = SERVER_START_TIME.set(unix_timestamp());
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Health check response model
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current service status ("ok" or "degraded")
    pub status: SystemStatus,

    /// Current application version from the Cargo manifest
    pub version: String,

    /// Timestamp of when the response was generated
    pub timestamp: u64,

    /// Uptime of the service in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,

    /// Whether the record store is configured
    pub store_configured: bool,
}

/// Service health check.
///
/// Reports `degraded` when the record store is unconfigured: the service
/// stays up, but persistence and queries are disabled.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse),
    ),
    tag = "health"
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let health = system_health(state.store_configured);
    let now = unix_timestamp();

    let response = HealthResponse {
        status: health.status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime: SERVER_START_TIME.get().map(|start| now.saturating_sub(*start)),
        store_configured: health.store_configured,
    };

    (StatusCode::OK, Json(response))
}
