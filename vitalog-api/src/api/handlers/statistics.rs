use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{info, instrument};

use vitalog_domain::services::vitals::StatisticsReport;

use crate::api::AppState;
use crate::entities::{ErrorResponse, StatisticsParams};
use super::readings::service_error_response;

/// Default statistics window in calendar months
const DEFAULT_MONTHS: u32 = 1;

/// Longest supported statistics window
const MAX_MONTHS: u32 = 12;

/// Generate a statistics report for a patient
#[utoipa::path(
    get,
    path = "/api/v1/statistics",
    params(StatisticsParams),
    responses(
        (status = 200, description = "Statistics report", body = StatisticsReport),
        (status = 400, description = "Missing HN", body = ErrorResponse),
        (status = 502, description = "Record store failure", body = ErrorResponse),
        (status = 503, description = "Record store not configured", body = ErrorResponse),
    ),
    tag = "statistics"
)]
#[instrument(skip(state))]
pub async fn get_statistics(
    State(state): State<AppState>,
    Query(params): Query<StatisticsParams>,
) -> Result<impl IntoResponse, Response> {
    let months = params
        .months
        .unwrap_or(DEFAULT_MONTHS)
        .clamp(1, MAX_MONTHS);

    info!("Generating statistics over {} month(s)", months);

    match state.service.statistics(&params.hn, months).await {
        Ok(report) => Ok((StatusCode::OK, Json(report))),
        Err(e) => Err(service_error_response(
            e,
            "เกิดข้อผิดพลาดในการสร้างสถิติ",
        )),
    }
}
