use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::entities;

/// OpenAPI documentation for the Vitalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::readings::create_reading,
        handlers::readings::search_readings,
        handlers::statistics::get_statistics,
        handlers::health::health_check,
    ),
    components(schemas(
        entities::reading::CreateReadingRequest,
        entities::reading::SubmitResponse,
        entities::reading::ReadingResponse,
        entities::reading::SearchResponse,
        entities::common::ErrorResponse,
        handlers::health::HealthResponse,
        vitalog_domain::entities::reading::RecordType,
        vitalog_domain::entities::reading::TimePeriod,
        vitalog_domain::services::vitals::StatisticsReport,
        vitalog_domain::services::statistics::VitalsSummary,
        vitalog_domain::services::statistics::BloodPressureStats,
        vitalog_domain::services::statistics::DtxStats,
        vitalog_domain::health::SystemStatus,
    )),
    tags(
        (name = "readings", description = "Submit and search vitals readings"),
        (name = "statistics", description = "Aggregate statistics over a patient's readings"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "Vitalog API",
        description = "Patient vitals logging: blood pressure and DTX readings keyed by hospital number",
    )
)]
pub struct ApiDoc;

/// Build the Swagger UI routes serving the generated document
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
