use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

// Import domain entities and services
use vital_watch_domain::entities::alert::Classification;
use vital_watch_domain::entities::vitals::RawVitalsPayload;
use vital_watch_domain::services::{
    create_default_vitals_service, VitalsServiceError, VitalsServiceTrait,
};

// Import our entities
use crate::entities::alert::AlertStatusResponse;
use crate::entities::vitals::VitalsReadingResponse;

/// Error response format for API
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a validation error response
    pub fn validation_error(message: &str) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.to_string(),
        }
    }

    /// Create an internal error response
    pub fn internal_error() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An unexpected error occurred".to_string(),
        }
    }

    /// Create a not-found error response
    pub fn not_found(message: &str) -> Self {
        Self {
            error: "not_found".to_string(),
            message: message.to_string(),
        }
    }

    /// Create a notification failure response for the alert-send endpoint
    pub fn notification_failed(message: &str) -> Self {
        Self {
            error: "notification_failed".to_string(),
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = match self.error.as_str() {
            "validation_error" | "bad_request" => StatusCode::BAD_REQUEST,
            "not_found" => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

/// Response for a vitals submission.
///
/// The vitals outcome and the alert outcome are reported side by side; a
/// notification failure shows up in the body, not in the HTTP status.
#[derive(Debug, Serialize, ToSchema)]
pub struct VitalsSubmissionResponse {
    /// Whether the vitals reading was persisted
    pub recorded: bool,

    /// The persisted reading
    pub reading: VitalsReadingResponse,

    /// Whether the reading classified as an emergency
    pub emergency_detected: bool,

    /// Human-readable rationale for an emergency classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,

    /// Alert-stage sub-result
    pub alert: AlertStatusResponse,
}

/// Service type for dependency injection
pub type VitalsApiService = Arc<dyn VitalsServiceTrait + Send + Sync>;

/// Create a default service for the handlers to use
pub fn create_service() -> VitalsApiService {
    Arc::new(create_default_vitals_service())
}

/// Submit a vitals reading
#[utoipa::path(
    post,
    path = "/api/v1/vitals",
    request_body = RawVitalsPayload,
    responses(
        (status = 201, description = "Vitals recorded; emergency and notification status in body", body = VitalsSubmissionResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "vitals"
)]
#[instrument(skip(service, payload))]
pub async fn submit_vitals(
    State(service): State<VitalsApiService>,
    Json(payload): Json<RawVitalsPayload>,
) -> Result<impl IntoResponse, Response> {
    info!("Processing vitals submission");

    match service.submit_reading(payload).await {
        Ok(submission) => {
            let emergency_detected =
                submission.assessment.classification == Classification::Emergency;
            let rationale = if emergency_detected {
                Some(submission.assessment.rationale())
            } else {
                None
            };

            info!(
                "Vitals reading {} recorded for subject {} (emergency: {})",
                submission.reading.id, submission.reading.subject_id, emergency_detected
            );

            let response = VitalsSubmissionResponse {
                recorded: true,
                reading: submission.reading.into(),
                emergency_detected,
                rationale,
                alert: submission.alert.into(),
            };

            // 2xx whenever the vitals persisted, regardless of the
            // notification outcome.
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => {
            let error_message = e.to_string();
            if error_message.contains("Validation") {
                warn!("Invalid vitals submission: {}", error_message);
                Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::validation_error(&error_message)),
                )
                    .into_response())
            } else {
                error!("Error recording vitals: {}", error_message);
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::internal_error()),
                )
                    .into_response())
            }
        }
    }
}

/// Path parameters for subject-scoped lookups
#[derive(Debug, Deserialize)]
pub struct SubjectPath {
    /// Identifier of the monitored subject
    pub subject_id: String,
}

/// Path parameters for single-reading lookups
#[derive(Debug, Deserialize)]
pub struct ReadingPath {
    /// Identifier of the vitals reading
    pub reading_id: String,
}

/// Get a single vitals reading by its identifier
#[utoipa::path(
    get,
    path = "/api/v1/vitals/reading/{reading_id}",
    params(
        ("reading_id" = String, Path, description = "Reading identifier")
    ),
    responses(
        (status = 200, description = "The requested reading", body = VitalsReadingResponse),
        (status = 400, description = "Malformed reading identifier", body = ErrorResponse),
        (status = 404, description = "No reading with that identifier", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "vitals"
)]
#[instrument(skip(service))]
pub async fn get_vitals_reading(
    State(service): State<VitalsApiService>,
    Path(path): Path<ReadingPath>,
) -> Result<impl IntoResponse, Response> {
    info!("Fetching vitals reading {}", path.reading_id);

    match service.get_reading_by_id(&path.reading_id).await {
        Ok(reading) => {
            let response: VitalsReadingResponse = reading.into();
            Ok((StatusCode::OK, Json(response)))
        }
        Err(VitalsServiceError::Validation(message)) => {
            warn!("Invalid reading identifier: {}", message);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::validation_error(&message)),
            )
                .into_response())
        }
        Err(VitalsServiceError::NotFound(message)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(&message)),
        )
            .into_response()),
        Err(e) => {
            error!("Failed to fetch vitals reading: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error()),
            )
                .into_response())
        }
    }
}

/// Get all vitals readings for a subject
#[utoipa::path(
    get,
    path = "/api/v1/vitals/{subject_id}",
    params(
        ("subject_id" = String, Path, description = "Subject identifier")
    ),
    responses(
        (status = 200, description = "Vitals readings for the subject", body = [VitalsReadingResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "vitals"
)]
#[instrument(skip(service))]
pub async fn get_subject_vitals(
    State(service): State<VitalsApiService>,
    Path(path): Path<SubjectPath>,
) -> Result<impl IntoResponse, Response> {
    info!("Fetching vitals readings for subject {}", path.subject_id);

    match service.get_readings_for_subject(&path.subject_id).await {
        Ok(readings) => {
            let readings: Vec<VitalsReadingResponse> =
                readings.into_iter().map(Into::into).collect();
            Ok((StatusCode::OK, Json(readings)))
        }
        Err(e) => {
            error!("Failed to fetch vitals readings: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error()),
            )
                .into_response())
        }
    }
}
