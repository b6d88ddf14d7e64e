use tracing::debug;

use crate::entities::vitals::{CanonicalReading, RawVitalsPayload};

/// Convert heterogeneous client-submitted vitals into a canonical reading.
///
/// Resolution order for blood pressure:
/// 1. discrete systolic/diastolic fields, when either is present (the
///    absent one stays `None`);
/// 2. otherwise a combined "S/D" string that splits into exactly two
///    integer tokens;
/// 3. otherwise both fields stay `None`.
///
/// Explicit wins over derived: any discrete field disables the combined
/// string entirely, so an explicit value is never replaced by a derived
/// one. For every other vital the first non-null alias wins. This never
/// fails; a malformed combined string degrades to absent fields by policy,
/// it is not an error.
pub fn normalize(subject_id: String, payload: &RawVitalsPayload) -> CanonicalReading {
    let combined = payload
        .blood_pressure
        .as_deref()
        .or(payload.blood_pressure_camel.as_deref());

    let (systolic, diastolic) = if payload.systolic.is_some() || payload.diastolic.is_some() {
        (payload.systolic, payload.diastolic)
    } else {
        match combined.and_then(parse_combined_blood_pressure) {
            Some((s, d)) => (Some(s), Some(d)),
            None => {
                if let Some(raw) = combined {
                    debug!("Ignoring malformed blood pressure string: {:?}", raw);
                }
                (None, None)
            }
        }
    };

    CanonicalReading {
        subject_id,
        systolic,
        diastolic,
        heart_rate: payload.heart_rate.or(payload.heart_rate_camel),
        blood_glucose: payload.blood_glucose.or(payload.blood_glucose_camel),
        body_weight: payload.body_weight.or(payload.body_weight_camel),
        oxygen_saturation: payload
            .oxygen_saturation
            .or(payload.oxygen_saturation_camel),
        body_temperature: payload
            .body_temperature
            .or(payload.body_temperature_camel),
        notes: payload.notes.clone(),
    }
}

/// Resolve the subject identifier from either naming convention
pub fn resolve_subject_id(payload: &RawVitalsPayload) -> Option<String> {
    payload
        .subject_id
        .clone()
        .or_else(|| payload.subject_id_camel.clone())
        .filter(|id| !id.trim().is_empty())
}

/// Parse a combined "S/D" blood pressure string.
///
/// Returns `None` unless the string splits on '/' into exactly two integer
/// tokens; "120", "120/80/60" and "abc/def" are all rejected.
fn parse_combined_blood_pressure(raw: &str) -> Option<(i32, i32)> {
    let tokens: Vec<&str> = raw.split('/').map(str::trim).collect();
    if tokens.len() != 2 {
        return None;
    }

    let systolic = tokens[0].parse::<i32>().ok()?;
    let diastolic = tokens[1].parse::<i32>().ok()?;
    Some((systolic, diastolic))
}
