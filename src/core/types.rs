//! Core types used throughout the multiscan-bridge library.
//!
//! This module defines the fundamental data structures for representing
//! scan types, user-declared entity attributes, and scan parameter values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of scan to perform.
///
/// The scan type determines which validation schema applies to the input
/// configuration and which measurements the SDK returns:
/// - `Face`: short video capture producing vital-sign estimates
/// - `Body`: full-body capture producing circumference measurements
/// - `Finger`: fingertip capture over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    /// Face scan.
    Face,
    /// Body scan.
    Body,
    /// Finger scan.
    Finger,
}

impl ScanType {
    /// Returns the stable string identifier for this scan type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Face => "face",
            Self::Body => "body",
            Self::Finger => "finger",
        }
    }

    /// Returns `true` if this scan type can produce extras (e.g. a 3D mesh).
    pub fn supports_extras(&self) -> bool {
        matches!(self, Self::Body)
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Biological sex as declared by the user before a scan.
///
/// The SDK only accepts the two values below; anything else is rejected
/// by shared-config validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl Sex {
    /// Returns the parameter-map value for this variant.
    pub fn as_param_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Parses a parameter-map value, returning `None` for anything outside
    /// the accepted set.
    pub fn from_param_str(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param_str())
    }
}

/// Declared diabetic status, required by face scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiabetesStatus {
    /// Not diabetic.
    None,
    /// Type 1 diabetes.
    Type1,
    /// Type 2 diabetes.
    Type2,
}

impl DiabetesStatus {
    /// Returns the parameter-map value for this variant.
    pub fn as_param_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Type1 => "type1",
            Self::Type2 => "type2",
        }
    }

    /// Parses a parameter-map value, returning `None` for anything outside
    /// the accepted set.
    pub fn from_param_str(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Self::None),
            "type1" => Some(Self::Type1),
            "type2" => Some(Self::Type2),
            _ => None,
        }
    }
}

impl fmt::Display for DiabetesStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param_str())
    }
}

/// The kind of value a scan parameter may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A string value.
    Str,
    /// An integer value.
    Int,
    /// A boolean value.
    Bool,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str => write!(f, "string"),
            Self::Int => write!(f, "integer"),
            Self::Bool => write!(f, "boolean"),
        }
    }
}

/// A single scan input parameter value.
///
/// Scan input configurations are maps from string keys to values of one of
/// these three kinds. The SDK accepts nothing else, so the restriction is
/// enforced at the type level rather than with `serde_json::Value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A string parameter (e.g. a declared sex or diabetic status).
    Str(String),
    /// An integer parameter (e.g. a height in centimeters).
    Int(i64),
    /// A boolean parameter (e.g. a smoker flag).
    Bool(bool),
}

impl ParamValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Str(_) => FieldKind::Str,
            Self::Int(_) => FieldKind::Int,
            Self::Bool(_) => FieldKind::Bool,
        }
    }

    /// Returns the string value, if this is a string parameter.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value, if this is an integer parameter.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a boolean parameter.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Sex> for ParamValue {
    fn from(value: Sex) -> Self {
        Self::Str(value.as_param_str().to_string())
    }
}

impl From<DiabetesStatus> for ParamValue {
    fn from(value: DiabetesStatus) -> Self {
        Self::Str(value.as_param_str().to_string())
    }
}

/// A supplementary artifact derivable from a completed body-scan result.
///
/// Extras are fetched through a separate SDK call keyed by a prior result;
/// the result payload must pass schema validation first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ScanExtra {
    /// A 3D mesh of the scanned body.
    Mesh,
}

impl ScanExtra {
    /// Returns the stable string identifier for this extra.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mesh => "mesh",
        }
    }
}

impl fmt::Display for ScanExtra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Well-known parameter and payload keys.
///
/// Keys follow the SDK's unit/type/role convention: a unit or type prefix
/// (`cm_`, `kg_`, `yr_`, `sec_`, `bool_`, `enum_`), a role segment (`ent`
/// for user-declared entity fields, `raw` for SDK-produced measurements,
/// `adj` for historically-smoothed values), and the field name.
pub mod keys {
    /// Declared sex, one of `"male"` or `"female"`.
    pub const SEX: &str = "enum_ent_sex";
    /// Declared height in centimeters.
    pub const HEIGHT_CM: &str = "cm_ent_height";
    /// Declared weight in kilograms.
    pub const WEIGHT_KG: &str = "kg_ent_weight";
    /// Declared age in years.
    pub const AGE_YR: &str = "yr_ent_age";
    /// Smoker flag.
    pub const SMOKER: &str = "bool_ent_smoker";
    /// Hypertension flag.
    pub const HYPERTENSION: &str = "bool_ent_hypertension";
    /// Blood-pressure-medication flag.
    pub const BP_MEDICATION: &str = "bool_ent_bloodPressureMedication";
    /// Declared diabetic status, one of `"none"`, `"type1"`, `"type2"`.
    pub const DIABETIC: &str = "enum_ent_diabetic";
    /// Finger scan duration in seconds.
    pub const SCAN_LENGTH_SEC: &str = "sec_ent_scanLength";

    /// Raw chest circumference in centimeters.
    pub const RAW_CHEST: &str = "cm_raw_chest";
    /// Raw hip circumference in centimeters.
    pub const RAW_HIPS: &str = "cm_raw_hips";
    /// Raw inseam length in centimeters.
    pub const RAW_INSEAM: &str = "cm_raw_inseam";
    /// Raw thigh circumference in centimeters.
    pub const RAW_THIGH: &str = "cm_raw_thigh";
    /// Raw waist circumference in centimeters.
    pub const RAW_WAIST: &str = "cm_raw_waist";
    /// Raw predicted weight in kilograms.
    pub const RAW_WEIGHT_PREDICT: &str = "kg_raw_weightPredict";
    /// Raw fitness estimate in milliliters.
    pub const RAW_FITNESS: &str = "ml_raw_fitness";
    /// Raw body-fat percentage.
    pub const RAW_BODY_FAT: &str = "percent_raw_bodyFat";

    /// Unique result identifier assigned by the SDK.
    pub const ID: &str = "id";
    /// Completion date assigned by the SDK.
    pub const DATE: &str = "date";
}
