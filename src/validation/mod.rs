//! Scan configuration and result-schema validation.
//!
//! This module is the gate between callers and the SDK:
//!
//! - Input configurations are checked against per-scan-type schemas before
//!   a scan request is dispatched; on success the mapping is forwarded
//!   unmodified.
//! - Result payloads are checked against required-key schemas before any
//!   downstream use (extras retrieval, smoothing persistence).
//!
//! All operations are pure, synchronous predicates. A failed check is a
//! return value, never an exception; the caller decides whether to log,
//! abort, or prompt the user.

pub mod schema;
pub mod validator;

pub use crate::core::error::Rejection;
pub use schema::{body_persistence_keys, key_set, Constraint, FieldSpec, Schema};
pub use validator::{
    check_body_config, check_config, check_face_config, check_finger_config, check_result_keys,
    check_shared_config, missing_result_keys, validate_body_config, validate_config,
    validate_face_config, validate_finger_config, validate_result_schema, validate_shared_config,
};
