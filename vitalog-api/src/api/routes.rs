use std::sync::Arc;

use axum::{
    routing::get,
    routing::post,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use vitalog_data::repository::SupabaseStore;
use vitalog_domain::services::{create_vitals_service, SharedRecordStore};

use crate::api::handlers::{health, readings, statistics};
use crate::api::AppState;
use crate::openapi::configure_swagger_routes;

/// Create the application router with the environment-configured store
pub async fn create_app() -> Router {
    debug!("Creating application router");

    let store = SupabaseStore::from_env().unwrap_or_else(|e| {
        error!("Failed to initialize record store client: {}. Running with a disabled store.", e);
        SupabaseStore::disabled()
    });

    let store_configured = store.is_configured();
    if !store_configured {
        warn!("Record store is not configured; persistence and queries are disabled");
    }

    let shared: SharedRecordStore = Arc::new(store);
    let state = AppState {
        service: Arc::new(create_vitals_service(shared)),
        store_configured,
    };

    create_app_with_state(state)
}

/// Create the application router over the given state.
///
/// Tests build state over the in-memory store and call this directly.
pub fn create_app_with_state(state: AppState) -> Router {
    // Vitals API routes
    let api_routes = Router::new()
        .route(
            "/readings",
            post(readings::create_reading).get(readings::search_readings),
        )
        .route("/statistics", get(statistics::get_statistics));

    debug!("API routes configured");

    // Public routes
    let public_routes = Router::new().route("/health", get(health::health_check));

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(state);

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    debug!("Swagger UI merged");

    // Initialize health check startup time
    health::initialize_server_start_time();

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    let swagger = configure_swagger_routes();

    app.merge(swagger)
}
