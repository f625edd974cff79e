//! Pure validation predicates over scan inputs and result payloads.
//!
//! Every operation here is synchronous, side-effect free, and stateless:
//! it touches only its arguments and fixed constant schemas, and may be
//! called from any thread. Nothing in this module logs, blocks, or throws
//! for expected invalid input; a rejection is an ordinary return value the
//! caller must check before proceeding.
//!
//! Each check exists in two forms: a `check_*` function returning the
//! first [`Rejection`], and a `validate_*` predicate returning the bare
//! boolean. The aggregate pass/fail outcome is identical.

use crate::core::error::Rejection;
use crate::core::input::ScanInput;
use crate::core::result::ScanResult;
use crate::core::types::ScanType;
use crate::validation::schema::Schema;

use std::collections::BTreeSet;

/// Checks the fields every scan type shares: a declared sex in
/// {"male","female"}, an integer height, and an integer weight.
pub fn check_shared_config(input: &ScanInput) -> Result<(), Rejection> {
    Schema::shared().check(input)
}

/// Checks a face scan configuration.
///
/// The shared check runs first and short-circuits; the face-specific
/// fields and ranges are applied on top.
pub fn check_face_config(input: &ScanInput) -> Result<(), Rejection> {
    check_shared_config(input)?;
    Schema::face().check(input)
}

/// Checks a body scan configuration.
///
/// The shared check runs first and short-circuits; height and weight are
/// then re-checked against the body ranges, which differ from the face
/// ranges.
pub fn check_body_config(input: &ScanInput) -> Result<(), Rejection> {
    check_shared_config(input)?;
    Schema::body().check(input)
}

/// Checks a finger scan configuration.
///
/// Finger scans are independent of the shared fields; only the scan
/// duration is required.
pub fn check_finger_config(input: &ScanInput) -> Result<(), Rejection> {
    Schema::finger().check(input)
}

/// Checks a configuration against the schema for the given scan type.
pub fn check_config(scan_type: ScanType, input: &ScanInput) -> Result<(), Rejection> {
    match scan_type {
        ScanType::Face => check_face_config(input),
        ScanType::Body => check_body_config(input),
        ScanType::Finger => check_finger_config(input),
    }
}

/// Boolean form of [`check_shared_config`].
pub fn validate_shared_config(input: &ScanInput) -> bool {
    check_shared_config(input).is_ok()
}

/// Boolean form of [`check_face_config`].
pub fn validate_face_config(input: &ScanInput) -> bool {
    check_face_config(input).is_ok()
}

/// Boolean form of [`check_body_config`].
pub fn validate_body_config(input: &ScanInput) -> bool {
    check_body_config(input).is_ok()
}

/// Boolean form of [`check_finger_config`].
pub fn validate_finger_config(input: &ScanInput) -> bool {
    check_finger_config(input).is_ok()
}

/// Boolean form of [`check_config`].
pub fn validate_config(scan_type: ScanType, input: &ScanInput) -> bool {
    check_config(scan_type, input).is_ok()
}

/// Returns the required keys absent from the result's payload, in order.
pub fn missing_result_keys(result: &ScanResult, required: &BTreeSet<String>) -> Vec<String> {
    required
        .iter()
        .filter(|key| !result.contains_key(key.as_str()))
        .cloned()
        .collect()
}

/// Checks that a single result payload's key set is a superset of
/// `required`, returning the first missing key as a rejection.
///
/// Extra unrecognized keys are accepted; this is a superset check, not an
/// exact match.
pub fn check_result_keys(result: &ScanResult, required: &BTreeSet<String>) -> Result<(), Rejection> {
    match required.iter().find(|key| !result.contains_key(key.as_str())) {
        Some(key) => Err(Rejection::missing_field(key.as_str())),
        None => Ok(()),
    }
}

/// Returns `true` if every result in the sequence carries all required
/// keys.
///
/// An empty sequence passes vacuously; that is the defined contract, since
/// the body-scan smoothing path supplies a possibly-empty history.
pub fn validate_result_schema(results: &[ScanResult], required: &BTreeSet<String>) -> bool {
    results
        .iter()
        .all(|result| check_result_keys(result, required).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{keys, DiabetesStatus, Sex};
    use crate::validation::schema::{body_persistence_keys, key_set};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn shared_input() -> ScanInput {
        ScanInput::new()
            .with_sex(Sex::Male)
            .with_height_cm(180)
            .with_weight_kg(85)
    }

    fn face_input() -> ScanInput {
        // The canonical face payload used by every host variant.
        shared_input()
            .with_age_years(35)
            .with_smoker(false)
            .with_hypertension(false)
            .with_blood_pressure_medication(false)
            .with_diabetes_status(DiabetesStatus::None)
    }

    fn body_result() -> ScanResult {
        let mut payload = BTreeMap::new();
        payload.insert(keys::SEX.to_string(), json!("male"));
        payload.insert(keys::HEIGHT_CM.to_string(), json!(180));
        payload.insert(keys::WEIGHT_KG.to_string(), json!(85));
        payload.insert(keys::RAW_CHEST.to_string(), json!(104.1));
        payload.insert(keys::RAW_HIPS.to_string(), json!(98.4));
        payload.insert(keys::RAW_INSEAM.to_string(), json!(82.0));
        payload.insert(keys::RAW_THIGH.to_string(), json!(60.2));
        payload.insert(keys::RAW_WAIST.to_string(), json!(87.3));
        payload.insert(keys::RAW_WEIGHT_PREDICT.to_string(), json!(85.6));
        payload.insert(keys::RAW_FITNESS.to_string(), json!(3120.0));
        payload.insert(keys::RAW_BODY_FAT.to_string(), json!(21.4));
        payload.insert(keys::ID.to_string(), json!("r-1"));
        payload.insert(keys::DATE.to_string(), json!("2024-05-01T09:30:00Z"));
        ScanResult::new(ScanType::Body, payload)
    }

    #[test]
    fn test_shared_requires_all_three_fields() {
        assert!(validate_shared_config(&shared_input()));

        for key in [keys::SEX, keys::HEIGHT_CM, keys::WEIGHT_KG] {
            let mut params = shared_input().into_params();
            params.remove(key);
            let input = ScanInput::from(params);
            assert!(!validate_shared_config(&input), "missing {key} must fail");
        }
    }

    #[test]
    fn test_shared_rejects_unknown_sex() {
        let input = shared_input().with_param(keys::SEX, "other");
        assert!(!validate_shared_config(&input));

        let input = shared_input().with_param(keys::SEX, "female");
        assert!(validate_shared_config(&input));
    }

    #[test]
    fn test_shared_rejects_mistyped_fields() {
        let input = shared_input().with_param(keys::HEIGHT_CM, "180");
        assert!(!validate_shared_config(&input));

        let input = shared_input().with_param(keys::WEIGHT_KG, true);
        assert!(!validate_shared_config(&input));
    }

    #[test]
    fn test_face_accepts_canonical_input() {
        assert!(validate_face_config(&face_input()));
    }

    #[test]
    fn test_face_age_boundaries() {
        assert!(!validate_face_config(&face_input().with_age_years(12)));
        assert!(validate_face_config(&face_input().with_age_years(13)));
        assert!(validate_face_config(&face_input().with_age_years(120)));
        assert!(!validate_face_config(&face_input().with_age_years(121)));
    }

    #[test]
    fn test_face_diabetic_enum() {
        let input = face_input().with_param(keys::DIABETIC, "type3");
        assert!(!validate_face_config(&input));

        let input = face_input().with_param(keys::DIABETIC, "type1");
        assert!(validate_face_config(&input));
    }

    #[test]
    fn test_face_rechecks_height_range() {
        // Valid for the shared kind check but above the face ceiling.
        let input = face_input().with_height_cm(310);
        assert!(validate_shared_config(&input));
        assert!(!validate_face_config(&input));
    }

    #[test]
    fn test_face_short_circuits_on_shared_failure() {
        let mut params = face_input().into_params();
        params.remove(keys::SEX);
        let input = ScanInput::from(params);

        match check_face_config(&input) {
            Err(Rejection::MissingField { key }) => assert_eq!(key, keys::SEX),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_body_height_boundaries() {
        assert!(!validate_body_config(&shared_input().with_height_cm(49)));
        assert!(validate_body_config(&shared_input().with_height_cm(50)));
        assert!(validate_body_config(&shared_input().with_height_cm(255)));
        assert!(!validate_body_config(&shared_input().with_height_cm(256)));
    }

    #[test]
    fn test_body_weight_boundaries() {
        assert!(!validate_body_config(&shared_input().with_weight_kg(15)));
        assert!(validate_body_config(&shared_input().with_weight_kg(16)));
        assert!(validate_body_config(&shared_input().with_weight_kg(300)));
        assert!(!validate_body_config(&shared_input().with_weight_kg(301)));
    }

    #[test]
    fn test_body_and_face_ranges_are_independent() {
        // Weight 20 is inside the body range but below the face floor.
        let input = face_input().with_weight_kg(20);
        assert!(validate_body_config(&input));
        assert!(!validate_face_config(&input));

        // Height 30 is inside the face range but below the body floor.
        let input = face_input().with_height_cm(30).with_weight_kg(30);
        assert!(validate_face_config(&input));
        assert!(!validate_body_config(&input));
    }

    #[test]
    fn test_finger_scan_length_floor() {
        let input = ScanInput::new().with_scan_length_secs(19);
        assert!(!validate_finger_config(&input));

        let input = ScanInput::new().with_scan_length_secs(20);
        assert!(validate_finger_config(&input));
    }

    #[test]
    fn test_finger_is_independent_of_shared_fields() {
        // No sex, height, or weight, yet the finger check passes.
        let input = ScanInput::new().with_scan_length_secs(60);
        assert!(!validate_shared_config(&input));
        assert!(validate_finger_config(&input));
    }

    #[test]
    fn test_check_config_dispatch() {
        assert!(validate_config(ScanType::Face, &face_input()));
        assert!(validate_config(ScanType::Body, &shared_input()));
        assert!(!validate_config(
            ScanType::Finger,
            &ScanInput::new().with_scan_length_secs(5)
        ));
    }

    #[test]
    fn test_result_schema_empty_sequence_passes() {
        assert!(validate_result_schema(&[], &body_persistence_keys()));
    }

    #[test]
    fn test_result_schema_missing_key_fails() {
        let mut result = body_result();
        result.payload.remove(keys::DATE);
        assert!(!validate_result_schema(
            std::slice::from_ref(&result),
            &body_persistence_keys()
        ));

        match check_result_keys(&result, &body_persistence_keys()) {
            Err(Rejection::MissingField { key }) => assert_eq!(key, keys::DATE),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_result_schema_superset_passes() {
        let result = body_result()
            .with_value("percent_adj_bodyFat", json!(20.9))
            .with_value("uid", json!("user-1"));
        assert!(validate_result_schema(
            std::slice::from_ref(&result),
            &body_persistence_keys()
        ));
    }

    #[test]
    fn test_result_schema_canonical_payload_passes() {
        assert!(validate_result_schema(
            &[body_result()],
            &body_persistence_keys()
        ));
    }

    #[test]
    fn test_result_schema_one_bad_result_fails_the_set() {
        let good = body_result();
        let mut bad = body_result();
        bad.payload.remove(keys::RAW_WAIST);

        assert!(!validate_result_schema(
            &[good, bad],
            &body_persistence_keys()
        ));
    }

    #[test]
    fn test_result_schema_required_keys_are_a_parameter() {
        let result = body_result();

        // A narrower token scope exposes only the identity fields.
        assert!(validate_result_schema(
            std::slice::from_ref(&result),
            &key_set(&[keys::ID, keys::DATE])
        ));

        // A wider scope requires adjusted fields this payload lacks.
        let mut wider = body_persistence_keys();
        wider.insert("percent_adj_bodyFat".to_string());
        assert!(!validate_result_schema(std::slice::from_ref(&result), &wider));
    }

    #[test]
    fn test_missing_result_keys_lists_all_gaps() {
        let mut result = body_result();
        result.payload.remove(keys::ID);
        result.payload.remove(keys::DATE);

        let missing = missing_result_keys(&result, &body_persistence_keys());
        assert_eq!(missing, vec![keys::DATE.to_string(), keys::ID.to_string()]);
    }
}
