//! Validation schemas for scan configurations and result payloads.
//!
//! Schemas are fixed, declarative field-spec sets with no lifecycle beyond
//! process startup. Each scan type composes the shared schema with its own
//! additions; result payloads are checked against required-key sets that
//! callers supply, since different SDK token scopes expose different field
//! subsets.

use crate::core::error::Rejection;
use crate::core::input::ScanInput;
use crate::core::types::{keys, FieldKind};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A value constraint applied after a field's kind check passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Constraint {
    /// Any value of the right kind is accepted.
    Any,

    /// An inclusive integer range.
    IntRange {
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },

    /// An inclusive integer floor with no ceiling.
    AtLeast {
        /// Inclusive lower bound.
        min: i64,
    },

    /// A restricted string set.
    OneOf {
        /// The accepted values.
        allowed: Vec<String>,
    },
}

/// A single required field in a scan configuration schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// The parameter key this spec applies to.
    pub key: String,

    /// The kind of value the field must carry.
    pub kind: FieldKind,

    /// The constraint on the field's value.
    pub constraint: Constraint,
}

impl FieldSpec {
    /// A required string field with no value constraint.
    pub fn string(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Str,
            constraint: Constraint::Any,
        }
    }

    /// A required integer field with no value constraint.
    pub fn integer(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Int,
            constraint: Constraint::Any,
        }
    }

    /// A required boolean field; any value is accepted once type-checked.
    pub fn boolean(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Bool,
            constraint: Constraint::Any,
        }
    }

    /// A required integer field within an inclusive range.
    pub fn int_range(key: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Int,
            constraint: Constraint::IntRange { min, max },
        }
    }

    /// A required integer field with an inclusive floor.
    pub fn at_least(key: impl Into<String>, min: i64) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Int,
            constraint: Constraint::AtLeast { min },
        }
    }

    /// A required string field restricted to the given value set.
    pub fn one_of(key: impl Into<String>, allowed: &[&str]) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Str,
            constraint: Constraint::OneOf {
                allowed: allowed.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    /// Checks this spec against the given input.
    pub fn check(&self, input: &ScanInput) -> Result<(), Rejection> {
        let value = input
            .get(&self.key)
            .ok_or_else(|| Rejection::missing_field(&self.key))?;

        if value.kind() != self.kind {
            return Err(Rejection::wrong_kind(&self.key, self.kind));
        }

        match &self.constraint {
            Constraint::Any => Ok(()),

            Constraint::IntRange { min, max } => {
                let Some(n) = value.as_int() else {
                    return Err(Rejection::wrong_kind(&self.key, FieldKind::Int));
                };
                if n < *min || n > *max {
                    return Err(Rejection::OutOfRange {
                        key: self.key.clone(),
                        value: n,
                        min: *min,
                        max: Some(*max),
                    });
                }
                Ok(())
            }

            Constraint::AtLeast { min } => {
                let Some(n) = value.as_int() else {
                    return Err(Rejection::wrong_kind(&self.key, FieldKind::Int));
                };
                if n < *min {
                    return Err(Rejection::OutOfRange {
                        key: self.key.clone(),
                        value: n,
                        min: *min,
                        max: None,
                    });
                }
                Ok(())
            }

            Constraint::OneOf { allowed } => {
                let Some(s) = value.as_str() else {
                    return Err(Rejection::wrong_kind(&self.key, FieldKind::Str));
                };
                if !allowed.iter().any(|a| a == s) {
                    return Err(Rejection::NotInSet {
                        key: self.key.clone(),
                        value: s.to_string(),
                        allowed: allowed.clone(),
                    });
                }
                Ok(())
            }
        }
    }
}

/// An ordered set of field specs a scan input must satisfy in full.
///
/// No partial credit: the first failing spec rejects the whole input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Creates a schema from the given specs.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// The schema every scan type shares: declared sex, height, and weight.
    ///
    /// Height and weight are only kind-checked here; the per-type schemas
    /// re-check them with their own ranges.
    pub fn shared() -> Self {
        Self::new(vec![
            FieldSpec::one_of(keys::SEX, &["male", "female"]),
            FieldSpec::integer(keys::HEIGHT_CM),
            FieldSpec::integer(keys::WEIGHT_KG),
        ])
    }

    /// Face-specific additions, applied after [`Schema::shared`] passes.
    pub fn face() -> Self {
        Self::new(vec![
            FieldSpec::int_range(keys::AGE_YR, 13, 120),
            FieldSpec::boolean(keys::SMOKER),
            FieldSpec::boolean(keys::HYPERTENSION),
            FieldSpec::boolean(keys::BP_MEDICATION),
            FieldSpec::one_of(keys::DIABETIC, &["none", "type1", "type2"]),
            FieldSpec::int_range(keys::HEIGHT_CM, 25, 300),
            FieldSpec::int_range(keys::WEIGHT_KG, 25, 300),
        ])
    }

    /// Body-specific additions, applied after [`Schema::shared`] passes.
    ///
    /// The ranges differ from the face ranges and are checked independently:
    /// a body-valid config is not necessarily face-valid and vice versa.
    pub fn body() -> Self {
        Self::new(vec![
            FieldSpec::int_range(keys::HEIGHT_CM, 50, 255),
            FieldSpec::int_range(keys::WEIGHT_KG, 16, 300),
        ])
    }

    /// The finger schema. Finger scans do not require the shared fields.
    pub fn finger() -> Self {
        Self::new(vec![FieldSpec::at_least(keys::SCAN_LENGTH_SEC, 20)])
    }

    /// Checks the input against every spec, returning the first failure.
    pub fn check(&self, input: &ScanInput) -> Result<(), Rejection> {
        for field in &self.fields {
            field.check(input)?;
        }
        Ok(())
    }

    /// Returns `true` if the input satisfies every spec.
    pub fn is_satisfied_by(&self, input: &ScanInput) -> bool {
        self.check(input).is_ok()
    }

    /// Returns the field specs.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

/// Builds a required-key set from string literals.
pub fn key_set(keys: &[&str]) -> BTreeSet<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

/// The required-key set a body-scan result must carry before it may be
/// persisted for smoothing or used to request extras.
pub fn body_persistence_keys() -> BTreeSet<String> {
    key_set(&[
        keys::SEX,
        keys::HEIGHT_CM,
        keys::WEIGHT_KG,
        keys::RAW_CHEST,
        keys::RAW_HIPS,
        keys::RAW_INSEAM,
        keys::RAW_THIGH,
        keys::RAW_WAIST,
        keys::RAW_WEIGHT_PREDICT,
        keys::RAW_FITNESS,
        keys::RAW_BODY_FAT,
        keys::ID,
        keys::DATE,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Sex;

    #[test]
    fn test_field_spec_missing() {
        let spec = FieldSpec::integer("cm_ent_height");
        let input = ScanInput::new();
        assert!(matches!(
            spec.check(&input),
            Err(Rejection::MissingField { .. })
        ));
    }

    #[test]
    fn test_field_spec_wrong_kind() {
        let spec = FieldSpec::integer("cm_ent_height");
        let input = ScanInput::new().with_param("cm_ent_height", "tall");
        assert!(matches!(
            spec.check(&input),
            Err(Rejection::WrongKind { .. })
        ));
    }

    #[test]
    fn test_int_range_boundaries() {
        let spec = FieldSpec::int_range("yr_ent_age", 13, 120);

        let at_floor = ScanInput::new().with_param("yr_ent_age", 13i64);
        assert!(spec.check(&at_floor).is_ok());

        let at_ceiling = ScanInput::new().with_param("yr_ent_age", 120i64);
        assert!(spec.check(&at_ceiling).is_ok());

        let below = ScanInput::new().with_param("yr_ent_age", 12i64);
        assert!(matches!(
            spec.check(&below),
            Err(Rejection::OutOfRange { .. })
        ));

        let above = ScanInput::new().with_param("yr_ent_age", 121i64);
        assert!(spec.check(&above).is_err());
    }

    #[test]
    fn test_at_least_has_no_ceiling() {
        let spec = FieldSpec::at_least("sec_ent_scanLength", 20);

        let long = ScanInput::new().with_param("sec_ent_scanLength", 86_400i64);
        assert!(spec.check(&long).is_ok());

        let short = ScanInput::new().with_param("sec_ent_scanLength", 19i64);
        assert!(spec.check(&short).is_err());
    }

    #[test]
    fn test_one_of() {
        let spec = FieldSpec::one_of("enum_ent_diabetic", &["none", "type1", "type2"]);

        let valid = ScanInput::new().with_param("enum_ent_diabetic", "type1");
        assert!(spec.check(&valid).is_ok());

        let invalid = ScanInput::new().with_param("enum_ent_diabetic", "type3");
        assert!(matches!(
            spec.check(&invalid),
            Err(Rejection::NotInSet { .. })
        ));
    }

    #[test]
    fn test_schema_first_failure_wins() {
        let schema = Schema::shared();
        let input = ScanInput::new().with_sex(Sex::Male);

        // Height is listed before weight, so the height rejection surfaces.
        match schema.check(&input) {
            Err(Rejection::MissingField { key }) => assert_eq!(key, keys::HEIGHT_CM),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_body_persistence_keys_count() {
        assert_eq!(body_persistence_keys().len(), 13);
    }
}
