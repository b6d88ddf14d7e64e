use crate::entities::alert::{Classification, VitalBreach, VitalsAssessment};
use crate::entities::vitals::VitalsReading;

/// Systolic pressure above this value is emergency-level (strict inequality)
pub const SYSTOLIC_CRITICAL: i32 = 180;

/// Heart rate above this value is emergency-level (strict inequality)
pub const HEART_RATE_HIGH: i32 = 150;

/// Heart rate below this value is emergency-level (strict inequality)
pub const HEART_RATE_LOW: i32 = 40;

/// Classify a canonical reading against the clinical thresholds.
///
/// The rules are independent and OR'd: any single breach classifies the
/// reading as an emergency. Boundary values are normal; the thresholds are
/// strict inequalities. A reading with every vital absent is normal.
/// Other captured vitals (oxygen saturation, temperature, glucose) are
/// informational only and carry no emergency rule here.
pub fn evaluate(reading: &VitalsReading) -> VitalsAssessment {
    let mut breaches = Vec::new();

    if let Some(systolic) = reading.systolic {
        if systolic > SYSTOLIC_CRITICAL {
            breaches.push(VitalBreach {
                vital: "systolic blood pressure".to_string(),
                value: format!("{} mmHg", systolic),
                detail: format!(
                    "critical high blood pressure: systolic {} mmHg exceeds {}",
                    systolic, SYSTOLIC_CRITICAL
                ),
            });
        }
    }

    if let Some(heart_rate) = reading.heart_rate {
        if heart_rate > HEART_RATE_HIGH || heart_rate < HEART_RATE_LOW {
            breaches.push(VitalBreach {
                vital: "heart rate".to_string(),
                value: format!("{} bpm", heart_rate),
                detail: format!(
                    "critical heart rate: {} bpm outside safe range {}-{}",
                    heart_rate, HEART_RATE_LOW, HEART_RATE_HIGH
                ),
            });
        }
    }

    if breaches.is_empty() {
        VitalsAssessment::normal()
    } else {
        VitalsAssessment {
            classification: Classification::Emergency,
            breaches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> VitalsReading {
        VitalsReading {
            id: "test-id".to_string(),
            subject_id: "subject-1".to_string(),
            systolic: None,
            diastolic: None,
            heart_rate: None,
            blood_glucose: None,
            body_weight: None,
            oxygen_saturation: None,
            body_temperature: None,
            notes: None,
            captured_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_all_null_reading_is_normal() {
        let assessment = evaluate(&reading());
        assert_eq!(assessment.classification, Classification::Normal);
        assert!(assessment.breaches.is_empty());
    }

    #[test]
    fn test_boundary_values_are_normal() {
        // Thresholds are strict inequalities
        let mut r = reading();
        r.systolic = Some(180);
        r.heart_rate = Some(150);
        assert_eq!(evaluate(&r).classification, Classification::Normal);

        r.heart_rate = Some(40);
        assert_eq!(evaluate(&r).classification, Classification::Normal);
    }

    #[test]
    fn test_high_systolic_is_emergency() {
        let mut r = reading();
        r.systolic = Some(181);

        let assessment = evaluate(&r);
        assert_eq!(assessment.classification, Classification::Emergency);
        assert_eq!(assessment.breaches.len(), 1);
        assert!(assessment.rationale().contains("blood pressure"));
    }

    #[test]
    fn test_high_heart_rate_is_emergency() {
        let mut r = reading();
        r.heart_rate = Some(160);

        let assessment = evaluate(&r);
        assert_eq!(assessment.classification, Classification::Emergency);
        assert!(assessment.rationale().contains("heart rate"));
        assert!(assessment.rationale().contains("160"));
    }

    #[test]
    fn test_low_heart_rate_is_emergency() {
        let mut r = reading();
        r.heart_rate = Some(39);
        assert_eq!(evaluate(&r).classification, Classification::Emergency);
    }

    #[test]
    fn test_rules_are_ored_and_both_reported() {
        let mut r = reading();
        r.systolic = Some(200);
        r.heart_rate = Some(30);

        let assessment = evaluate(&r);
        assert_eq!(assessment.classification, Classification::Emergency);
        assert_eq!(assessment.breaches.len(), 2);
        let rationale = assessment.rationale();
        assert!(rationale.contains("blood pressure"));
        assert!(rationale.contains("heart rate"));
    }

    #[test]
    fn test_normal_vitals_in_range() {
        let mut r = reading();
        r.systolic = Some(130);
        r.diastolic = Some(85);
        r.heart_rate = Some(72);

        let assessment = evaluate(&r);
        assert_eq!(assessment.classification, Classification::Normal);
    }

    #[test]
    fn test_other_vitals_carry_no_emergency_rules() {
        // Oxygen saturation and temperature are captured but informational.
        let mut r = reading();
        r.oxygen_saturation = Some(70.0);
        r.body_temperature = Some(41.5);
        r.blood_glucose = Some(500.0);

        assert_eq!(evaluate(&r).classification, Classification::Normal);
    }
}
