//! Scan result structures.
//!
//! This module defines `ScanResult`, the payload returned asynchronously by
//! the SDK after a scan completes, together with the metadata the bridge
//! attaches to it (a scan id and completion timestamp).

use crate::core::types::{keys, ScanType};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The result of a completed scan.
///
/// The `payload` is the SDK's result mapping, carried as-is: keys follow
/// the same unit/role convention as scan inputs, values are arbitrary JSON.
/// The bridge never interprets measurement values; it only verifies key
/// presence before downstream use (extras retrieval, smoothing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Bridge-assigned unique identifier for this scan.
    pub scan_id: String,

    /// The scan type that produced this result.
    pub scan_type: ScanType,

    /// When the SDK delivered the result.
    pub completed_at: DateTime<Utc>,

    /// The SDK's result mapping.
    pub payload: BTreeMap<String, serde_json::Value>,
}

impl ScanResult {
    /// Creates a new `ScanResult` wrapping the given SDK payload.
    pub fn new(scan_type: ScanType, payload: BTreeMap<String, serde_json::Value>) -> Self {
        Self {
            scan_id: uuid::Uuid::new_v4().to_string(),
            scan_type,
            completed_at: Utc::now(),
            payload,
        }
    }

    /// Adds a payload entry, returning self for chaining.
    pub fn with_value(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }

    /// Returns the payload value for the given key, if present.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.payload.get(key)
    }

    /// Returns `true` if the payload contains the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.payload.contains_key(key)
    }

    /// Iterates over the payload keys in order.
    pub fn payload_keys(&self) -> impl Iterator<Item = &str> {
        self.payload.keys().map(String::as_str)
    }

    /// Returns the SDK-assigned result id, if the payload carries one.
    pub fn result_id(&self) -> Option<&str> {
        self.payload.get(keys::ID).and_then(|v| v.as_str())
    }

    /// Returns the SDK-assigned completion date, if the payload carries one.
    ///
    /// The value is opaque; only its presence matters to validation.
    pub fn recorded_date(&self) -> Option<&serde_json::Value> {
        self.payload.get(keys::DATE)
    }

    /// Returns the number of payload entries.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_assigns_scan_id() {
        let a = ScanResult::new(ScanType::Body, BTreeMap::new());
        let b = ScanResult::new(ScanType::Body, BTreeMap::new());
        assert!(!a.scan_id.is_empty());
        assert_ne!(a.scan_id, b.scan_id);
    }

    #[test]
    fn test_payload_accessors() {
        let result = ScanResult::new(ScanType::Body, BTreeMap::new())
            .with_value("id", json!("r-123"))
            .with_value("date", json!("2024-05-01T09:30:00Z"))
            .with_value("cm_raw_waist", json!(82.4));

        assert_eq!(result.result_id(), Some("r-123"));
        assert!(result.recorded_date().is_some());
        assert!(result.contains_key("cm_raw_waist"));
        assert!(!result.contains_key("cm_raw_chest"));
        assert_eq!(result.payload_len(), 3);
    }

    #[test]
    fn test_payload_keys_are_ordered() {
        let result = ScanResult::new(ScanType::Body, BTreeMap::new())
            .with_value("b", json!(2))
            .with_value("a", json!(1));

        let keys: Vec<&str> = result.payload_keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
