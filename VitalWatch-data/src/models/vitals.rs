use serde::{Deserialize, Serialize};

/// Data model for a canonical vitals reading.
///
/// A reading is created once per submission and is immutable afterwards;
/// there are no update or delete operations for this model.
#[derive(Debug, Clone, Serialize, Deserialize)]
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

    /// Free-text notes supplied with the reading
    pub notes: Option<String>,

    /// When the reading was persisted (RFC 3339, server-assigned)
    pub captured_at: String,
}

/// Request payload for persisting a new vitals reading.
///
/// Produced by the domain normalizer; `id` and `captured_at` are assigned
/// by the repository at insert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVitalsReading {
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

    /// Free-text notes supplied with the reading
    pub notes: Option<String>,
}

impl NewVitalsReading {
    /// Create an empty reading for a subject, with every vital absent.
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
