use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use vital_watch_domain::entities::alert::{
    AlertRecord as DomainAlertRecord, NotificationChannel, NotificationOutcome,
};
use vital_watch_domain::entities::vitals::AlertOutcome;

/// Request payload for the standalone alert-send endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SendAlertRequest {
    /// Identifier of the monitored subject
    #[validate(length(min = 1, message = "subject_id must not be empty"))]
    pub subject_id: String,

    /// Message body to deliver to the emergency contact
    #[validate(length(min = 1, max = 640, message = "Message must be between 1 and 640 characters"))]
    pub message: String,
}

/// Public representation of a notification attempt
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponse {
    /// Delivery channel: REAL_SEND, SIMULATED, FAILED or SKIPPED_NO_CONTACT
    pub channel: NotificationChannel,

    /// Phone number the notification was addressed to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    /// Provider message reference, present only on a real send
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_reference: Option<String>,

    /// Failure description, present only on a failed send
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,

    /// The composed message body, when one was produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<NotificationOutcome> for NotificationResponse {
    fn from(outcome: NotificationOutcome) -> Self {
        Self {
            channel: outcome.channel,
            recipient: outcome.recipient,
            provider_reference: outcome.provider_reference,
            error_detail: outcome.error_detail,
            message: outcome.message,
        }
    }
}

/// Public representation of a persisted alert
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AlertResponse {
    /// Unique identifier for the alert
    pub id: String,

    /// Identifier of the monitored subject
    pub subject_id: String,

    /// Kind of alert, e.g. EMERGENCY_VITALS
    pub alert_type: String,

    /// Severity of the alert
    pub severity: String,

    /// Structured snapshot of the triggering values and message
    pub payload: serde_json::Value,

    /// Whether the alert has been resolved
    pub resolved: bool,

    /// When the alert was recorded (RFC 3339)
    pub triggered_at: String,
}

impl From<DomainAlertRecord> for AlertResponse {
    fn from(alert: DomainAlertRecord) -> Self {
        Self {
            id: alert.id,
            subject_id: alert.subject_id,
            alert_type: alert.alert_type.to_string(),
            severity: alert.severity.to_string(),
            payload: alert.payload,
            resolved: alert.resolved,
            triggered_at: alert.triggered_at,
        }
    }
}

/// Alert-stage sub-result reported with a vitals submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AlertStatusResponse {
    /// One of: not_required, recorded, record_failed
    pub status: String,

    /// Identifier of the persisted alert, when one was recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_id: Option<String>,

    /// Notification attempt result, when an alert was recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationResponse>,

    /// Storage failure description, when the alert could not be recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<AlertOutcome> for AlertStatusResponse {
    fn from(outcome: AlertOutcome) -> Self {
        match outcome {
            AlertOutcome::NotRequired => Self {
                status: "not_required".to_string(),
                alert_id: None,
                notification: None,
                detail: None,
            },
            AlertOutcome::Recorded {
                alert_id,
                notification,
            } => Self {
                status: "recorded".to_string(),
                alert_id: Some(alert_id),
                notification: Some(notification.into()),
                detail: None,
            },
            AlertOutcome::RecordFailed { detail } => Self {
                status: "record_failed".to_string(),
                alert_id: None,
                notification: None,
                detail: Some(detail),
            },
        }
    }
}
