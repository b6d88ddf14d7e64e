use crate::entities::vitals::{CanonicalReading, VitalsReading};
use uuid::Uuid;

/// Conversion functions between domain entities and data models
/// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Helper function to safely parse a string ID to UUID
///
/// Centralizes UUID parsing so invalid identifiers produce one consistent
/// error message across the application.
pub fn parse_string_to_uuid(id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(id).map_err(|_| format!("Invalid UUID format: {}", id))
}

/// Convert from data model to domain entity for a vitals reading
pub fn convert_to_domain_reading(
    data_reading: vital_watch_data::models::vitals::VitalsReading,
) -> VitalsReading {
    VitalsReading {
        id: data_reading.id,
        subject_id: data_reading.subject_id,
        systolic: data_reading.systolic,
        diastolic: data_reading.diastolic,
        heart_rate: data_reading.heart_rate,
        blood_glucose: data_reading.blood_glucose,
        body_weight: data_reading.body_weight,
        oxygen_saturation: data_reading.oxygen_saturation,
        body_temperature: data_reading.body_temperature,
        notes: data_reading.notes,
        captured_at: data_reading.captured_at,
    }
}

/// Convert a canonical reading into the data-layer insert request
pub fn convert_to_data_new_reading(
    canonical: &CanonicalReading,
) -> vital_watch_data::models::vitals::NewVitalsReading {
    vital_watch_data::models::vitals::NewVitalsReading {
        subject_id: canonical.subject_id.clone(),
        systolic: canonical.systolic,
        diastolic: canonical.diastolic,
        heart_rate: canonical.heart_rate,
        blood_glucose: canonical.blood_glucose,
        body_weight: canonical.body_weight,
        oxygen_saturation: canonical.oxygen_saturation,
        body_temperature: canonical.body_temperature,
        notes: canonical.notes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_convert_to_domain_reading() {
        let data_reading = vital_watch_data::models::vitals::VitalsReading {
            id: "123e4567-e89b-12d3-a456-426614174000".to_string(),
            subject_id: "subject-1".to_string(),
            systolic: Some(120),
            diastolic: Some(80),
            heart_rate: Some(72),
            blood_glucose: Some(96.5),
            body_weight: None,
            oxygen_saturation: Some(98.0),
            body_temperature: None,
            notes: Some("morning reading".to_string()),
            captured_at: Utc::now().to_rfc3339(),
        };

        let domain_reading = convert_to_domain_reading(data_reading.clone());

        assert_eq!(domain_reading.id, data_reading.id);
        assert_eq!(domain_reading.subject_id, data_reading.subject_id);
        assert_eq!(domain_reading.systolic, data_reading.systolic);
        assert_eq!(domain_reading.heart_rate, data_reading.heart_rate);
        assert_eq!(domain_reading.notes, data_reading.notes);
        assert_eq!(domain_reading.captured_at, data_reading.captured_at);
    }

    #[test]
    fn test_convert_to_data_new_reading() {
        let mut canonical = CanonicalReading::empty("subject-1");
        canonical.systolic = Some(190);
        canonical.diastolic = Some(100);
        canonical.notes = Some("felt dizzy".to_string());

        let data_request = convert_to_data_new_reading(&canonical);

        assert_eq!(data_request.subject_id, "subject-1");
        assert_eq!(data_request.systolic, Some(190));
        assert_eq!(data_request.diastolic, Some(100));
        assert_eq!(data_request.notes, Some("felt dizzy".to_string()));
        assert_eq!(data_request.heart_rate, None);
    }

    #[test]
    fn test_parse_string_to_uuid_invalid() {
        let result = parse_string_to_uuid("not-a-uuid");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid UUID format"));
    }
}
