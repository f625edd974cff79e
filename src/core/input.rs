//! Scan input configuration.
//!
//! This module provides `ScanInput`, the parameter mapping a caller builds
//! immediately before initiating a scan. The mapping is validated against
//! the scan type's schema and then forwarded to the SDK unmodified.

use crate::core::types::{keys, DiabetesStatus, ParamValue, Sex};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A scan input configuration: a mapping from parameter key to value.
///
/// Inputs are transient value objects. They are created by the caller,
/// checked once by the validator, and discarded after the scan request is
/// sent; nothing retains them.
///
/// # Examples
///
/// ```rust
/// use multiscan_bridge::core::{ScanInput, Sex};
///
/// let input = ScanInput::new()
///     .with_sex(Sex::Male)
///     .with_height_cm(180)
///     .with_weight_kg(85);
///
/// assert_eq!(input.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanInput {
    params: BTreeMap<String, ParamValue>,
}

impl ScanInput {
    /// Creates a new empty scan input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an arbitrary parameter, returning self for chaining.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Sets an arbitrary parameter in place.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(key.into(), value.into());
    }

    /// Sets the declared sex.
    pub fn with_sex(self, sex: Sex) -> Self {
        self.with_param(keys::SEX, sex)
    }

    /// Sets the declared height in centimeters.
    pub fn with_height_cm(self, height: i64) -> Self {
        self.with_param(keys::HEIGHT_CM, height)
    }

    /// Sets the declared weight in kilograms.
    pub fn with_weight_kg(self, weight: i64) -> Self {
        self.with_param(keys::WEIGHT_KG, weight)
    }

    /// Sets the declared age in years.
    pub fn with_age_years(self, age: i64) -> Self {
        self.with_param(keys::AGE_YR, age)
    }

    /// Sets the smoker flag.
    pub fn with_smoker(self, smoker: bool) -> Self {
        self.with_param(keys::SMOKER, smoker)
    }

    /// Sets the hypertension flag.
    pub fn with_hypertension(self, hypertension: bool) -> Self {
        self.with_param(keys::HYPERTENSION, hypertension)
    }

    /// Sets the blood-pressure-medication flag.
    pub fn with_blood_pressure_medication(self, taking: bool) -> Self {
        self.with_param(keys::BP_MEDICATION, taking)
    }

    /// Sets the declared diabetic status.
    pub fn with_diabetes_status(self, status: DiabetesStatus) -> Self {
        self.with_param(keys::DIABETIC, status)
    }

    /// Sets the finger scan duration in seconds.
    pub fn with_scan_length_secs(self, seconds: i64) -> Self {
        self.with_param(keys::SCAN_LENGTH_SEC, seconds)
    }

    /// Returns the value for the given key, if present.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// Returns `true` if the given key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates over the parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consumes the input and returns the underlying parameter map.
    pub fn into_params(self) -> BTreeMap<String, ParamValue> {
        self.params
    }
}

impl From<BTreeMap<String, ParamValue>> for ScanInput {
    fn from(params: BTreeMap<String, ParamValue>) -> Self {
        Self { params }
    }
}

impl FromIterator<(String, ParamValue)> for ScanInput {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FieldKind;

    #[test]
    fn test_typed_setters_use_conventional_keys() {
        let input = ScanInput::new()
            .with_sex(Sex::Male)
            .with_height_cm(180)
            .with_weight_kg(85)
            .with_smoker(false);

        assert_eq!(input.get(keys::SEX).and_then(|v| v.as_str()), Some("male"));
        assert_eq!(input.get(keys::HEIGHT_CM).and_then(|v| v.as_int()), Some(180));
        assert_eq!(input.get(keys::WEIGHT_KG).and_then(|v| v.as_int()), Some(85));
        assert_eq!(input.get(keys::SMOKER).and_then(|v| v.as_bool()), Some(false));
    }

    #[test]
    fn test_raw_params() {
        let mut input = ScanInput::new();
        input.set_param("enum_ent_sex", "female");
        input.set_param("cm_ent_height", 165i64);

        assert_eq!(input.len(), 2);
        assert_eq!(input.get("enum_ent_sex").map(|v| v.kind()), Some(FieldKind::Str));
        assert_eq!(input.get("cm_ent_height").map(|v| v.kind()), Some(FieldKind::Int));
    }

    #[test]
    fn test_later_set_wins() {
        let input = ScanInput::new().with_height_cm(170).with_height_cm(180);
        assert_eq!(input.get(keys::HEIGHT_CM).and_then(|v| v.as_int()), Some(180));
        assert_eq!(input.len(), 1);
    }

    #[test]
    fn test_from_iterator() {
        let input: ScanInput = [
            ("enum_ent_sex".to_string(), ParamValue::from("male")),
            ("kg_ent_weight".to_string(), ParamValue::from(90i64)),
        ]
        .into_iter()
        .collect();

        assert!(input.contains_key("enum_ent_sex"));
        assert!(input.contains_key("kg_ent_weight"));
    }
}
