use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use vital_watch_domain::entities::vitals::VitalsReading as DomainVitalsReading;

/// Public representation of a persisted vitals reading
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VitalsReadingResponse {
    /// Unique identifier for the reading
    pub id: String,

    /// Identifier of the monitored subject
    pub subject_id: String,

    /// Systolic blood pressure in mmHg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub systolic: Option<i32>,

    /// Diastolic blood pressure in mmHg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<i32>,

    /// Heart rate in beats per minute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<i32>,

    /// Blood glucose in mg/dL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_glucose: Option<f64>,

    /// Body weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_weight: Option<f64>,

    /// Oxygen saturation percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<f64>,

    /// Body temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_temperature: Option<f64>,

    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// When the reading was persisted (RFC 3339)
    pub captured_at: String,
}

impl From<DomainVitalsReading> for VitalsReadingResponse {
    fn from(reading: DomainVitalsReading) -> Self {
        Self {
            id: reading.id,
            subject_id: reading.subject_id,
            systolic: reading.systolic,
            diastolic: reading.diastolic,
            heart_rate: reading.heart_rate,
            blood_glucose: reading.blood_glucose,
            body_weight: reading.body_weight,
            oxygen_saturation: reading.oxygen_saturation,
            body_temperature: reading.body_temperature,
            notes: reading.notes,
            captured_at: reading.captured_at,
        }
    }
}
