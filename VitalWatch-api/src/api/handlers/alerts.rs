use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument, warn};
use validator::Validate;

use vital_watch_domain::entities::alert::NotificationChannel;

use super::vitals::{ErrorResponse, SubjectPath, VitalsApiService};
use crate::entities::alert::{AlertResponse, NotificationResponse, SendAlertRequest};

/// Send a message to a subject's emergency contact.
///
/// Unlike the vitals submission flow, a provider failure here maps to a
/// failing status for this call alone: there is no persisted outcome to
/// report alongside it.
#[utoipa::path(
    post,
    path = "/api/v1/alerts/send",
    request_body = SendAlertRequest,
    responses(
        (status = 200, description = "Notification sent, simulated, or skipped", body = NotificationResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Notification delivery failed", body = ErrorResponse),
    ),
    tag = "alerts"
)]
#[instrument(skip(service, request))]
pub async fn send_alert(
    State(service): State<VitalsApiService>,
    Json(request): Json<SendAlertRequest>,
) -> Result<impl IntoResponse, Response> {
    if let Err(validation_errors) = request.validate() {
        warn!("Invalid alert-send request: {}", validation_errors);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation_error(
                &validation_errors.to_string(),
            )),
        )
            .into_response());
    }

    info!("Sending alert message for subject {}", request.subject_id);

    match service.send_alert(&request.subject_id, &request.message).await {
        Ok(outcome) => {
            if outcome.channel == NotificationChannel::Failed {
                let detail = outcome
                    .error_detail
                    .clone()
                    .unwrap_or_else(|| "delivery failed".to_string());
                error!("Alert delivery failed: {}", detail);
                return Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::notification_failed(&detail)),
                )
                    .into_response());
            }

            let response: NotificationResponse = outcome.into();
            Ok((StatusCode::OK, Json(response)))
        }
        Err(e) => {
            let error_message = e.to_string();
            if error_message.contains("Validation") {
                warn!("Invalid alert-send request: {}", error_message);
                Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::validation_error(&error_message)),
                )
                    .into_response())
            } else {
                error!("Error sending alert: {}", error_message);
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::internal_error()),
                )
                    .into_response())
            }
        }
    }
}

/// Get all persisted alerts for a subject
#[utoipa::path(
    get,
    path = "/api/v1/alerts/{subject_id}",
    params(
        ("subject_id" = String, Path, description = "Subject identifier")
    ),
    responses(
        (status = 200, description = "Alerts for the subject", body = [AlertResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "alerts"
)]
#[instrument(skip(service))]
pub async fn get_subject_alerts(
    State(service): State<VitalsApiService>,
    Path(path): Path<SubjectPath>,
) -> Result<impl IntoResponse, Response> {
    info!("Fetching alerts for subject {}", path.subject_id);

    match service.get_alerts_for_subject(&path.subject_id).await {
        Ok(alerts) => {
            let alerts: Vec<AlertResponse> = alerts.into_iter().map(Into::into).collect();
            Ok((StatusCode::OK, Json(alerts)))
        }
        Err(e) => {
            error!("Failed to fetch alerts: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error()),
            )
                .into_response())
        }
    }
}
