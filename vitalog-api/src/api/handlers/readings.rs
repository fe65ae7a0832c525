use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument, warn};
use validator::Validate;

use vitalog_domain::entities::RecordType;
use vitalog_domain::services::VitalsServiceError;

use crate::api::AppState;
use crate::entities::{
    CreateReadingRequest, ErrorResponse, ReadingResponse, SearchParams, SearchResponse,
    SubmitResponse,
};

/// Map a service error to an HTTP response.
///
/// `store_prefix` is the operation-specific Thai failure text prepended to
/// store error messages.
pub(super) fn service_error_response(err: VitalsServiceError, store_prefix: &str) -> Response {
    match err {
        VitalsServiceError::Validation(v) => {
            warn!("Validation failed: {}", v.code());
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(v.code(), v.to_string())),
            )
                .into_response()
        }
        VitalsServiceError::NotConfigured => {
            warn!("Rejecting request: record store is not configured");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(
                    "store_not_configured",
                    VitalsServiceError::NotConfigured.to_string(),
                )),
            )
                .into_response()
        }
        VitalsServiceError::Store(message) => {
            error!("Record store failure: {}", message);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new(
                    "store_error",
                    format!("{}: {}", store_prefix, message),
                )),
            )
                .into_response()
        }
    }
}

/// Submit a new vitals reading
#[utoipa::path(
    post,
    path = "/api/v1/readings",
    request_body = CreateReadingRequest,
    responses(
        (status = 201, description = "Reading stored", body = SubmitResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 502, description = "Record store failure", body = ErrorResponse),
        (status = 503, description = "Record store not configured", body = ErrorResponse),
    ),
    tag = "readings"
)]
#[instrument(skip(state, payload))]
pub async fn create_reading(
    State(state): State<AppState>,
    Json(payload): Json<CreateReadingRequest>,
) -> Result<impl IntoResponse, Response> {
    if let Err(validation_errors) = payload.validate() {
        let details: Vec<String> = validation_errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid {}", field),
                })
            })
            .collect();

        let mut error = ErrorResponse::new("invalid_request", "Request validation failed");
        error.details = Some(details);
        return Err((StatusCode::BAD_REQUEST, Json(error)).into_response());
    }

    match state.service.submit_reading(payload.into()).await {
        Ok(reading) => {
            info!("Reading stored for HN {}", reading.hn);
            let response = SubmitResponse {
                message: "บันทึกข้อมูลเรียบร้อยแล้ว".to_string(),
                reading: ReadingResponse::from(reading),
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => Err(service_error_response(
            e,
            "เกิดข้อผิดพลาดในการบันทึกข้อมูล",
        )),
    }
}

/// Search a patient's readings, newest first
#[utoipa::path(
    get,
    path = "/api/v1/readings",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching readings", body = SearchResponse),
        (status = 400, description = "Missing HN or unknown record type", body = ErrorResponse),
        (status = 502, description = "Record store failure", body = ErrorResponse),
        (status = 503, description = "Record store not configured", body = ErrorResponse),
    ),
    tag = "readings"
)]
#[instrument(skip(state))]
pub async fn search_readings(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, Response> {
    let record_type = match params.record_type.as_deref().filter(|s| !s.is_empty()) {
        Some(code) => match RecordType::from_code(code) {
            Some(record_type) => Some(record_type),
            None => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(
                        "unknown_record_type",
                        format!("Unknown record type: {}", code),
                    )),
                )
                    .into_response())
            }
        },
        None => None,
    };

    match state.service.search_readings(&params.hn, record_type).await {
        Ok(readings) => {
            let response = SearchResponse {
                hn: params.hn.trim().to_string(),
                count: readings.len(),
                readings: readings.into_iter().map(ReadingResponse::from).collect(),
            };
            Ok((StatusCode::OK, Json(response)))
        }
        Err(e) => Err(service_error_response(
            e,
            "เกิดข้อผิดพลาดในการค้นหาข้อมูล",
        )),
    }
}
