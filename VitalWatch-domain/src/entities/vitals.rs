use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use crate::entities::alert::{NotificationOutcome, VitalsAssessment};

/// Raw vitals payload as submitted by a client.
///
/// Clients send either snake_case or camelCase keys, and blood pressure
/// arrives either as discrete systolic/diastolic fields or as a single
/// combined "120/80" string. Every field is optional here; the normalizer
/// resolves the aliasing once, and the rest of the pipeline only ever sees
/// the canonical shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct RawVitalsPayload {
    /// Identifier of the monitored subject
    pub subject_id: Option<String>,

    /// camelCase spelling of `subject_id`
    #[serde(rename = "subjectId")]
    pub subject_id_camel: Option<String>,

    /// Combined blood pressure string, e.g. "120/80"
    pub blood_pressure: Option<String>,

    /// camelCase spelling of `blood_pressure`
    #[serde(rename = "bloodPressure")]
    pub blood_pressure_camel: Option<String>,

    /// Discrete systolic pressure in mmHg
    pub systolic: Option<i32>,

    /// Discrete diastolic pressure in mmHg
    pub diastolic: Option<i32>,

    /// Heart rate in beats per minute
    pub heart_rate: Option<i32>,

    /// camelCase spelling of `heart_rate`
    #[serde(rename = "heartRate")]
    pub heart_rate_camel: Option<i32>,

    /// Blood glucose in mg/dL
    pub blood_glucose: Option<f64>,

    /// camelCase spelling of `blood_glucose`
    #[serde(rename = "bloodGlucose")]
    pub blood_glucose_camel: Option<f64>,

    /// Body weight
    pub body_weight: Option<f64>,

    /// camelCase spelling of `body_weight`
    #[serde(rename = "bodyWeight")]
    pub body_weight_camel: Option<f64>,

    /// Oxygen saturation percentage
    pub oxygen_saturation: Option<f64>,

    /// camelCase spelling of `oxygen_saturation`
    #[serde(rename = "oxygenSaturation")]
    pub oxygen_saturation_camel: Option<f64>,

    /// Body temperature
    pub body_temperature: Option<f64>,

    /// camelCase spelling of `body_temperature`
    #[serde(rename = "bodyTemperature")]
    pub body_temperature_camel: Option<f64>,

    /// Free-text notes
    pub notes: Option<String>,
}

/// Canonical vitals record produced by the normalizer.
///
/// All key aliasing and the combined blood-pressure string are resolved;
/// absent data stays `None`, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct CanonicalReading {
    /// Identifier of the monitored subject
    pub subject_id: String,

    /// Systolic blood pressure in mmHg
    pub systolic: Option<i32>,

    /// Diastolic blood pressure in mmHg
    pub diastolic: Option<i32>,

    /// Heart rate in beats per minute
    pub heart_rate: Option<i32>,

    /// Blood glucose in mg/dL
    pub blood_glucose: Option<f64>,

    /// Body weight
    pub body_weight: Option<f64>,

    /// Oxygen saturation percentage
    pub oxygen_saturation: Option<f64>,

    /// Body temperature
    pub body_temperature: Option<f64>,

    /// Free-text notes
    pub notes: Option<String>,
}

impl CanonicalReading {
    /// Create a reading for a subject with every vital absent
    pub fn empty(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            systolic: None,
            diastolic: None,
            heart_rate: None,
            blood_glucose: None,
            body_weight: None,
            oxygen_saturation: None,
            body_temperature: None,
            notes: None,
        }
    }
}

/// Domain entity for a persisted vitals reading
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct VitalsReading {
    /// Unique identifier for the reading
    pub id: String,

    /// Identifier of the monitored subject
    pub subject_id: String,

    /// Systolic blood pressure in mmHg
    pub systolic: Option<i32>,

    /// Diastolic blood pressure in mmHg
    pub diastolic: Option<i32>,

    /// Heart rate in beats per minute
    pub heart_rate: Option<i32>,

    /// Blood glucose in mg/dL
    pub blood_glucose: Option<f64>,

    /// Body weight
    pub body_weight: Option<f64>,

    /// Oxygen saturation percentage
    pub oxygen_saturation: Option<f64>,

    /// Body temperature
    pub body_temperature: Option<f64>,

    /// Free-text notes
    pub notes: Option<String>,

    /// When the reading was persisted (RFC 3339)
    pub captured_at: String,
}

/// Outcome of the alert stage of a vitals submission.
///
/// The vitals row is already committed by the time this is produced;
/// an alert failure never rolls it back.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum AlertOutcome {
    /// Reading classified normal, no alert required
    NotRequired,

    /// Alert persisted; notification attempted with the given outcome
    Recorded {
        /// Identifier of the persisted alert
        alert_id: String,
        /// Result of the notification attempt
        notification: NotificationOutcome,
    },

    /// Emergency detected but the alert could not be persisted.
    /// The caller is told so it can retry or alert out-of-band.
    RecordFailed {
        /// Description of the storage failure
        detail: String,
    },
}

/// Full result of a vitals submission
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct VitalsSubmission {
    /// The persisted canonical reading
    pub reading: VitalsReading,

    /// Classification of the reading
    pub assessment: VitalsAssessment,

    /// What happened on the alert side
    pub alert: AlertOutcome,
}
