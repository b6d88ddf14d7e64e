use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Vitals endpoints
        crate::api::handlers::vitals::submit_vitals,
        crate::api::handlers::vitals::get_vitals_reading,
        crate::api::handlers::vitals::get_subject_vitals,

        // Alert endpoints
        crate::api::handlers::alerts::send_alert,
        crate::api::handlers::alerts::get_subject_alerts,
    ),
    components(
        schemas(
            // Entities
            crate::entities::vitals::VitalsReadingResponse,
            crate::entities::alert::SendAlertRequest,
            crate::entities::alert::NotificationResponse,
            crate::entities::alert::AlertResponse,
            crate::entities::alert::AlertStatusResponse,
            crate::entities::common::PublicErrorResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,

            // Vitals handlers
            crate::api::handlers::vitals::ErrorResponse,
            crate::api::handlers::vitals::VitalsSubmissionResponse,

            // Domain schemas
            vital_watch_domain::entities::vitals::RawVitalsPayload,
            vital_watch_domain::entities::alert::NotificationChannel,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "vitals", description = "Vitals submission and history endpoints"),
        (name = "alerts", description = "Emergency alert endpoints")
    ),
    info(
        title = "VitalWatch API",
        version = "0.1.0",
        description = "API for vitals ingestion, threshold evaluation and emergency alerting",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_generation() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "VitalWatch API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().unwrap();
        assert!(tags.iter().any(|tag| tag.name == "vitals"));
        assert!(tags.iter().any(|tag| tag.name == "alerts"));

        // Verify paths are defined for our endpoints
        assert!(openapi.paths.paths.contains_key("/health"));
        assert!(openapi.paths.paths.contains_key("/api/v1/vitals"));
        assert!(openapi
            .paths
            .paths
            .contains_key("/api/v1/vitals/reading/{reading_id}"));
        assert!(openapi.paths.paths.contains_key("/api/v1/vitals/{subject_id}"));
        assert!(openapi.paths.paths.contains_key("/api/v1/alerts/send"));
        assert!(openapi.paths.paths.contains_key("/api/v1/alerts/{subject_id}"));
    }
}
