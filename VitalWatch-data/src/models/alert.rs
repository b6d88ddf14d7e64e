use serde::{Deserialize, Serialize};

/// Kind of alert recorded by the pipeline.
///
/// The broader system has other alert types; only vitals-derived emergency
/// alerts are produced here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertType {
    /// Alert triggered by an emergency-level vitals reading
    #[serde(rename = "EMERGENCY_VITALS")]
    EmergencyVitals,
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertType::EmergencyVitals => write!(f, "EMERGENCY_VITALS"),
        }
    }
}

/// Severity of a persisted alert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertSeverity {
    /// Immediate attention required
    #[serde(rename = "CRITICAL")]
    Critical,
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Data model for a persisted alert.
///
/// Created by the alert dispatcher when a reading classifies as an
/// emergency; mutated only by the (out-of-scope) resolution workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Unique identifier for the alert
    pub id: String,

    /// Identifier of the monitored subject
    pub subject_id: String,

    /// Kind of alert
    pub alert_type: AlertType,

    /// Severity of the alert
    pub severity: AlertSeverity,

    /// Structured snapshot of the triggering values and message
    pub payload: serde_json::Value,

    /// Whether the alert has been resolved
    pub resolved: bool,

    /// When the alert was recorded (RFC 3339, server-assigned)
    pub triggered_at: String,
}

/// Request payload for persisting a new alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlertRecord {
    /// Identifier of the monitored subject
    pub subject_id: String,

    /// Kind of alert
    pub alert_type: AlertType,

    /// Severity of the alert
    pub severity: AlertSeverity,

    /// Structured snapshot of the triggering values and message
    pub payload: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_wire_names() {
        assert_eq!(AlertType::EmergencyVitals.to_string(), "EMERGENCY_VITALS");
        assert_eq!(AlertSeverity::Critical.to_string(), "CRITICAL");
        assert_eq!(
            serde_json::to_string(&AlertType::EmergencyVitals).unwrap(),
            "\"EMERGENCY_VITALS\""
        );
        assert_eq!(
            serde_json::to_string(&AlertSeverity::Critical).unwrap(),
            "\"CRITICAL\""
        );
    }
}
