use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::api::handlers::{alerts, health, vitals};
use crate::openapi::configure_swagger_routes;

/// Create the application router with the default service wiring
pub async fn create_app() -> Router {
    debug!("Creating application router");
    create_app_with_service(vitals::create_service())
}

/// Create the application router over an explicit vitals service.
///
/// Used by tests to substitute a mock service without touching process
/// environment.
pub fn create_app_with_service(vitals_service: vitals::VitalsApiService) -> Router {
    let health_service = health::create_health_service();

    // Set up API routes
    let api_routes = Router::new()
        // Define specific routes before parametrized routes to avoid conflicts
        .route("/alerts/send", post(alerts::send_alert))
        .route("/alerts/:subject_id", get(alerts::get_subject_alerts))
        .route("/vitals", post(vitals::submit_vitals))
        .route("/vitals/reading/:reading_id", get(vitals::get_vitals_reading))
        .route("/vitals/:subject_id", get(vitals::get_subject_vitals));

    debug!("API routes configured");

    // Set up public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service));

    debug!("Public routes configured");

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(vitals_service)
        .layer(TraceLayer::new_for_http());

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    // Initialize health check service startup time
    health::initialize_server_start_time();
    debug!("Health check service initialized");

    app
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    let swagger = configure_swagger_routes();
    app.merge(swagger)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Arc;
    use vital_watch_domain::testing::MockVitalsService;

    /// Create a test application over a seeded mock service
    pub async fn create_test_app() -> Router {
        let service = MockVitalsService::new();
        service
            .seed_guardian("subject-1", "Jordan Doe", "+15551234567")
            .await;
        create_app_with_service(Arc::new(service))
    }
}
