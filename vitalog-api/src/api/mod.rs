pub mod handlers;
pub mod routes;

#[cfg(test)]
mod routes_tests;

use std::sync::Arc;

use axum::Router;

use vitalog_domain::services::{SharedRecordStore, VitalsService};

/// Shared state threaded into every request handler
#[derive(Clone)]
pub struct AppState {
    /// The vitals service over the configured record store
    pub service: Arc<VitalsService<SharedRecordStore>>,

    /// Whether the record store was configured at startup
    pub store_configured: bool,
}

/// Create the application router
pub async fn create_application() -> Router {
    routes::create_app().await
}
