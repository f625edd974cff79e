//! Error types for the multiscan-bridge library.
//!
//! This module provides structured, typed errors for all failure scenarios.
//! The library never panics; all errors are returned as `Result` values.
//!
//! Validation failures occupy a middle ground: the validators themselves
//! are pure predicates whose only failure signal is a [`Rejection`] value,
//! and the client wraps that value in [`MultiScanError::InvalidInput`] when
//! a scan request is refused. The aggregate pass/fail outcome is identical
//! either way.

use crate::core::types::{FieldKind, ScanType};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// The reason a scan configuration or result payload was rejected.
///
/// A rejection is not an error in the `std::error::Error` sense; it is the
/// typed refinement of a validator returning `false`. Callers that only
/// need the boolean contract can ignore the variant entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rejection {
    /// A required field is absent.
    MissingField {
        /// The missing key.
        key: String,
    },

    /// A field is present but carries the wrong kind of value.
    WrongKind {
        /// The offending key.
        key: String,
        /// The kind the schema requires.
        expected: FieldKind,
    },

    /// An integer field is outside its accepted range.
    OutOfRange {
        /// The offending key.
        key: String,
        /// The value supplied.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound, if the range has one.
        max: Option<i64>,
    },

    /// A string field is outside its accepted value set.
    NotInSet {
        /// The offending key.
        key: String,
        /// The value supplied.
        value: String,
        /// The accepted values.
        allowed: Vec<String>,
    },
}

impl Rejection {
    /// Creates a `MissingField` rejection.
    pub fn missing_field(key: impl Into<String>) -> Self {
        Self::MissingField { key: key.into() }
    }

    /// Creates a `WrongKind` rejection.
    pub fn wrong_kind(key: impl Into<String>, expected: FieldKind) -> Self {
        Self::WrongKind {
            key: key.into(),
            expected,
        }
    }

    /// Returns the key the rejection refers to.
    pub fn key(&self) -> &str {
        match self {
            Self::MissingField { key }
            | Self::WrongKind { key, .. }
            | Self::OutOfRange { key, .. }
            | Self::NotInSet { key, .. } => key,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { key } => write!(f, "required field '{key}' is missing"),
            Self::WrongKind { key, expected } => {
                write!(f, "field '{key}' must be a {expected} value")
            }
            Self::OutOfRange {
                key,
                value,
                min,
                max: Some(max),
            } => write!(f, "field '{key}' value {value} is outside {min}..={max}"),
            Self::OutOfRange {
                key, value, min, ..
            } => write!(f, "field '{key}' value {value} is below the minimum of {min}"),
            Self::NotInSet {
                key,
                value,
                allowed,
            } => write!(
                f,
                "field '{key}' value '{value}' is not one of {allowed:?}"
            ),
        }
    }
}

/// The main error type for bridge operations.
///
/// All error variants include context about what failed and why,
/// enabling proper error handling and debugging.
#[derive(Debug, Error)]
pub enum MultiScanError {
    /// SDK setup did not complete.
    #[error("SDK setup failed: {reason}")]
    SetupFailed {
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The SDK refused the authorization request.
    #[error("authorization failed for user '{user_id}': {reason}")]
    AuthorizationFailed {
        /// The user the authorization was attempted for.
        user_id: String,
        /// Human-readable reason for the refusal.
        reason: String,
    },

    /// The client was used before `start()` completed successfully.
    #[error("client is not authorized; call start() first")]
    NotAuthorized,

    /// Scan resources did not become available within the polling budget.
    #[error("scan resources not available after {attempts} poll attempts")]
    ResourcesUnavailable {
        /// Number of availability checks performed.
        attempts: u32,
    },

    /// Resource polling was cancelled through its handle.
    #[error("resource download polling was cancelled")]
    DownloadCancelled,

    /// The scan input failed schema validation and was not forwarded.
    #[error("invalid {scan_type} scan input: {rejection}")]
    InvalidInput {
        /// The scan type the input was validated against.
        scan_type: ScanType,
        /// Why the input was rejected.
        rejection: Rejection,
    },

    /// A result payload is missing keys its schema requires.
    #[error("result payload is missing required keys: {missing:?}")]
    InvalidResult {
        /// The required keys that were absent.
        missing: Vec<String>,
    },

    /// The requested extra is not available for the result's scan type.
    #[error("extras are not supported for {scan_type} scan results")]
    ExtrasUnsupported {
        /// The scan type of the offending result.
        scan_type: ScanType,
    },

    /// The SDK call ran past the configured deadline.
    #[error("scan timed out after {elapsed:?}")]
    Timeout {
        /// How long the operation ran before timing out.
        elapsed: Duration,
    },

    /// The SDK returned a structured error.
    #[error("SDK call failed with code {code}: {message}")]
    Sdk {
        /// SDK-defined error code.
        code: i32,
        /// SDK-provided message.
        message: String,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl MultiScanError {
    /// Creates a `SetupFailed` error.
    pub fn setup_failed(reason: impl Into<String>) -> Self {
        Self::SetupFailed {
            reason: reason.into(),
        }
    }

    /// Creates an `AuthorizationFailed` error.
    pub fn authorization_failed(user_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AuthorizationFailed {
            user_id: user_id.into(),
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidInput` error.
    pub fn invalid_input(scan_type: ScanType, rejection: Rejection) -> Self {
        Self::InvalidInput {
            scan_type,
            rejection,
        }
    }

    /// Creates an `Sdk` error.
    pub fn sdk(code: i32, message: impl Into<String>) -> Self {
        Self::Sdk {
            code,
            message: message.into(),
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is recoverable (can be retried).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::ResourcesUnavailable { .. }
        )
    }

    /// Returns the validation rejection, if this is a validation failure.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::InvalidInput { rejection, .. } => Some(rejection),
            _ => None,
        }
    }
}

/// Error type for result persistence operations.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Failed to store a scan result.
    #[error("failed to store scan result: {reason}")]
    StoreFailed {
        /// Reason for the failure.
        reason: String,
    },

    /// Failed to load stored scan results.
    #[error("failed to load scan results: {reason}")]
    LoadFailed {
        /// Reason for the failure.
        reason: String,
    },
}

impl PersistenceError {
    /// Creates a `StoreFailed` error.
    pub fn store_failed(reason: impl Into<String>) -> Self {
        Self::StoreFailed {
            reason: reason.into(),
        }
    }

    /// Creates a `LoadFailed` error.
    pub fn load_failed(reason: impl Into<String>) -> Self {
        Self::LoadFailed {
            reason: reason.into(),
        }
    }
}

/// A specialized `Result` type for bridge operations.
pub type SdkResult<T> = Result<T, MultiScanError>;

/// A specialized `Result` type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;
