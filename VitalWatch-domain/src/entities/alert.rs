use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

// Persisted alert shapes live in the data layer; re-exported here so api
// code does not need to depend on the data crate directly.
pub use vital_watch_data::models::alert::{AlertRecord, AlertSeverity, AlertType, NewAlertRecord};

/// Classification of a canonical vitals reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum Classification {
    /// No threshold breached
    Normal,
    /// At least one vital crossed its critical threshold
    Emergency,
}

/// A single vital value crossing its critical threshold
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct VitalBreach {
    /// Name of the breached vital, e.g. "systolic blood pressure"
    pub vital: String,

    /// The measured value, rendered for display
    pub value: String,

    /// Human-readable description of the breach
    pub detail: String,
}

/// Result of evaluating a reading against the clinical thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct VitalsAssessment {
    /// Overall classification
    pub classification: Classification,

    /// The breaches that caused an emergency classification; empty when normal
    pub breaches: Vec<VitalBreach>,
}

impl VitalsAssessment {
    /// A normal assessment with no breaches
    pub fn normal() -> Self {
        Self {
            classification: Classification::Normal,
            breaches: Vec::new(),
        }
    }

    /// Whether this assessment requires an alert
    pub fn is_emergency(&self) -> bool {
        self.classification == Classification::Emergency
    }

    /// Human-readable rationale, suitable for the alert payload and the
    /// notification message
    pub fn rationale(&self) -> String {
        self.breaches
            .iter()
            .map(|b| b.detail.clone())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Channel through which a notification was (or was not) delivered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum NotificationChannel {
    /// The message was handed to the real provider
    #[serde(rename = "REAL_SEND")]
    RealSend,

    /// No provider configured; the message was composed and logged only
    #[serde(rename = "SIMULATED")]
    Simulated,

    /// The provider call failed; the alert record is retained
    #[serde(rename = "FAILED")]
    Failed,

    /// No contact on file for the subject; nothing was attempted
    #[serde(rename = "SKIPPED_NO_CONTACT")]
    SkippedNoContact,
}

/// Result of attempting to reach a guardian or contact.
///
/// Transient: returned and logged, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct NotificationOutcome {
    /// How (or whether) the notification went out
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

impl NotificationOutcome {
    /// Outcome for a message accepted by the real provider
    pub fn real_send(recipient: String, provider_reference: String, message: String) -> Self {
        Self {
            channel: NotificationChannel::RealSend,
            recipient: Some(recipient),
            provider_reference: Some(provider_reference),
            error_detail: None,
            message: Some(message),
        }
    }

    /// Outcome for a simulated send when no provider is configured
    pub fn simulated(recipient: String, message: String) -> Self {
        Self {
            channel: NotificationChannel::Simulated,
            recipient: Some(recipient),
            provider_reference: None,
            error_detail: None,
            message: Some(message),
        }
    }

    /// Outcome for a failed provider call
    pub fn failed(recipient: Option<String>, error_detail: String) -> Self {
        Self {
            channel: NotificationChannel::Failed,
            recipient,
            provider_reference: None,
            error_detail: Some(error_detail),
            message: None,
        }
    }

    /// Outcome when no contact could be resolved for the subject
    pub fn skipped() -> Self {
        Self {
            channel: NotificationChannel::SkippedNoContact,
            recipient: None,
            provider_reference: None,
            error_detail: None,
            message: None,
        }
    }
}
