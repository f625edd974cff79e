//! Mock SDK for testing.
//!
//! This module provides a configurable mock implementation of the
//! `MultiScanSdk` trait that simulates the vendor binary's behavior
//! without any native code: scripted result payloads, delayed resource
//! availability, authorization denial, and latency injection.

use crate::core::config::SdkCredentials;
use crate::core::error::{MultiScanError, SdkResult};
use crate::core::input::ScanInput;
use crate::core::result::ScanResult;
use crate::core::traits::MultiScanSdk;
use crate::core::types::{keys, ScanExtra, ScanType};

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

/// A mock SDK for testing purposes.
///
/// By default the mock is fully permissive: setup and authorization
/// succeed, resources are immediately available, and scans resolve with a
/// canonical payload for their scan type.
///
/// # Examples
///
/// ```rust
/// use multiscan_bridge::sdk::MockMultiScan;
/// use std::time::Duration;
///
/// // Resources become available on the third poll
/// let sdk = MockMultiScan::new()
///     .with_resources_ready_after(2)
///     .with_latency(Duration::from_millis(5));
///
/// // A mock that refuses authorization
/// let sdk = MockMultiScan::new().with_authorization_denied();
/// ```
#[derive(Debug)]
pub struct MockMultiScan {
    /// Name of this SDK instance.
    name: String,
    /// Scripted result payloads keyed by scan type.
    scripted_results: RwLock<HashMap<ScanType, BTreeMap<String, Value>>>,
    /// Scripted extras keyed by extra kind.
    scripted_extras: RwLock<HashMap<ScanExtra, Value>>,
    /// Simulated latency for scan initiation.
    latency: Option<Duration>,
    /// Number of availability checks that report false before resources
    /// become ready.
    resources_ready_after: AtomicU32,
    /// Whether a background download has been triggered.
    download_triggered: AtomicBool,
    /// Whether authorization requests are denied.
    deny_authorization: AtomicBool,
    /// Whether setup requests fail.
    fail_setup: AtomicBool,
    /// Counters for trait operations.
    setup_count: AtomicU64,
    authorize_count: AtomicU64,
    scan_count: AtomicU64,
    resources_check_count: AtomicU64,
    /// The most recent scan request, for forwarding assertions.
    last_input: RwLock<Option<(ScanType, ScanInput)>>,
}

impl MockMultiScan {
    /// Creates a new mock with default settings.
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            scripted_results: RwLock::new(HashMap::new()),
            scripted_extras: RwLock::new(HashMap::new()),
            latency: None,
            resources_ready_after: AtomicU32::new(0),
            download_triggered: AtomicBool::new(false),
            deny_authorization: AtomicBool::new(false),
            fail_setup: AtomicBool::new(false),
            setup_count: AtomicU64::new(0),
            authorize_count: AtomicU64::new(0),
            scan_count: AtomicU64::new(0),
            resources_check_count: AtomicU64::new(0),
            last_input: RwLock::new(None),
        }
    }

    /// Sets the name of this SDK instance.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Scripts the result payload for a scan type.
    pub fn with_result(self, scan_type: ScanType, payload: BTreeMap<String, Value>) -> Self {
        self.scripted_results
            .write()
            .unwrap()
            .insert(scan_type, payload);
        self
    }

    /// Scripts the value returned for an extra.
    pub fn with_extra(self, extra: ScanExtra, value: Value) -> Self {
        self.scripted_extras.write().unwrap().insert(extra, value);
        self
    }

    /// Sets the simulated latency for scan initiation.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes the first `checks` availability checks report false.
    pub fn with_resources_ready_after(self, checks: u32) -> Self {
        self.resources_ready_after.store(checks, Ordering::SeqCst);
        self
    }

    /// Makes authorization requests fail.
    pub fn with_authorization_denied(self) -> Self {
        self.deny_authorization.store(true, Ordering::SeqCst);
        self
    }

    /// Makes setup requests fail.
    pub fn with_setup_failure(self) -> Self {
        self.fail_setup.store(true, Ordering::SeqCst);
        self
    }

    /// Returns the number of setup calls.
    pub fn setup_count(&self) -> u64 {
        self.setup_count.load(Ordering::Relaxed)
    }

    /// Returns the number of authorize calls.
    pub fn authorize_count(&self) -> u64 {
        self.authorize_count.load(Ordering::Relaxed)
    }

    /// Returns the number of scans initiated.
    pub fn scan_count(&self) -> u64 {
        self.scan_count.load(Ordering::Relaxed)
    }

    /// Returns the number of resource availability checks.
    pub fn resources_check_count(&self) -> u64 {
        self.resources_check_count.load(Ordering::Relaxed)
    }

    /// Returns `true` if a background download was triggered.
    pub fn download_triggered(&self) -> bool {
        self.download_triggered.load(Ordering::SeqCst)
    }

    /// Returns the most recent scan request, if any.
    pub fn last_input(&self) -> Option<(ScanType, ScanInput)> {
        self.last_input.read().unwrap().clone()
    }

    fn default_payload_for(scan_type: ScanType) -> BTreeMap<String, Value> {
        match scan_type {
            ScanType::Body => sample_body_payload(),
            ScanType::Face => {
                let mut payload = BTreeMap::new();
                payload.insert(keys::ID.to_string(), json!("mock-face-result"));
                payload.insert(keys::DATE.to_string(), json!("2024-05-01T09:30:00Z"));
                payload.insert("bpm_raw_heartRate".to_string(), json!(64));
                payload
            }
            ScanType::Finger => {
                let mut payload = BTreeMap::new();
                payload.insert(keys::ID.to_string(), json!("mock-finger-result"));
                payload.insert(keys::DATE.to_string(), json!("2024-05-01T09:30:00Z"));
                payload.insert("bpm_raw_heartRate".to_string(), json!(62));
                payload.insert("percent_raw_spo2".to_string(), json!(98));
                payload
            }
        }
    }
}

impl Default for MockMultiScan {
    fn default() -> Self {
        Self::new()
    }
}

/// The canonical body-scan payload: every key the body persistence schema
/// requires, with plausible measurement values.
pub fn sample_body_payload() -> BTreeMap<String, Value> {
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
    payload.insert(keys::ID.to_string(), json!("mock-body-result"));
    payload.insert(keys::DATE.to_string(), json!("2024-05-01T09:30:00Z"));
    payload
}

#[async_trait]
impl MultiScanSdk for MockMultiScan {
    fn name(&self) -> &str {
        &self.name
    }

    async fn setup(&self, credentials: &SdkCredentials) -> SdkResult<()> {
        self.setup_count.fetch_add(1, Ordering::Relaxed);

        if self.fail_setup.load(Ordering::SeqCst) {
            return Err(MultiScanError::setup_failed("scripted setup failure"));
        }
        if !credentials.has_token() {
            return Err(MultiScanError::setup_failed("SDK token is empty"));
        }
        Ok(())
    }

    async fn authorize(&self, user_id: &str, _salt: &str, _claims: &[String]) -> SdkResult<()> {
        self.authorize_count.fetch_add(1, Ordering::Relaxed);

        if self.deny_authorization.load(Ordering::SeqCst) {
            return Err(MultiScanError::authorization_failed(
                user_id,
                "scripted authorization denial",
            ));
        }
        if user_id.is_empty() {
            return Err(MultiScanError::authorization_failed(
                user_id,
                "user id is empty",
            ));
        }
        Ok(())
    }

    async fn resources_ready(&self) -> SdkResult<bool> {
        self.resources_check_count.fetch_add(1, Ordering::Relaxed);

        let remaining = self.resources_ready_after.load(Ordering::SeqCst);
        if remaining == 0 {
            Ok(true)
        } else {
            self.resources_ready_after
                .store(remaining - 1, Ordering::SeqCst);
            Ok(false)
        }
    }

    async fn download_resources(&self) -> SdkResult<()> {
        self.download_triggered.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn initiate_scan(&self, scan_type: ScanType, input: &ScanInput) -> SdkResult<ScanResult> {
        self.scan_count.fetch_add(1, Ordering::Relaxed);

        // Simulate capture latency
        if let Some(latency) = self.latency {
            #[cfg(feature = "tokio-runtime")]
            tokio::time::sleep(latency).await;
            #[cfg(not(feature = "tokio-runtime"))]
            std::thread::sleep(latency);
        }

        *self.last_input.write().unwrap() = Some((scan_type, input.clone()));

        let payload = self
            .scripted_results
            .read()
            .unwrap()
            .get(&scan_type)
            .cloned()
            .unwrap_or_else(|| Self::default_payload_for(scan_type));

        Ok(ScanResult::new(scan_type, payload))
    }

    async fn get_extra(&self, _result: &ScanResult, extra: ScanExtra) -> SdkResult<Value> {
        if let Some(value) = self.scripted_extras.read().unwrap().get(&extra) {
            return Ok(value.clone());
        }
        match extra {
            ScanExtra::Mesh => Ok(json!({ "format": "obj", "vertices": [] })),
        }
    }

    async fn sdk_version(&self) -> Option<String> {
        Some("mock-0.0.0".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> SdkCredentials {
        SdkCredentials::new("token", "user-1", "salt")
    }

    #[tokio::test]
    async fn test_mock_setup_and_authorize() {
        let sdk = MockMultiScan::new();

        assert!(sdk.setup(&credentials()).await.is_ok());
        assert!(sdk.authorize("user-1", "salt", &[]).await.is_ok());
        assert_eq!(sdk.setup_count(), 1);
        assert_eq!(sdk.authorize_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_rejects_empty_token() {
        let sdk = MockMultiScan::new();
        let result = sdk
            .setup(&SdkCredentials::new("", "user-1", "salt"))
            .await;
        assert!(matches!(result, Err(MultiScanError::SetupFailed { .. })));
    }

    #[tokio::test]
    async fn test_mock_authorization_denial() {
        let sdk = MockMultiScan::new().with_authorization_denied();
        let result = sdk.authorize("user-1", "salt", &[]).await;
        assert!(matches!(
            result,
            Err(MultiScanError::AuthorizationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_mock_resources_become_ready() {
        let sdk = MockMultiScan::new().with_resources_ready_after(2);

        assert!(!sdk.resources_ready().await.unwrap());
        assert!(!sdk.resources_ready().await.unwrap());
        assert!(sdk.resources_ready().await.unwrap());
        assert_eq!(sdk.resources_check_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_scan_returns_scripted_payload() {
        let mut payload = BTreeMap::new();
        payload.insert("id".to_string(), json!("scripted"));
        let sdk = MockMultiScan::new().with_result(ScanType::Face, payload);

        let input = ScanInput::new();
        let result = sdk.initiate_scan(ScanType::Face, &input).await.unwrap();
        assert_eq!(result.result_id(), Some("scripted"));
        assert_eq!(sdk.scan_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_records_last_input() {
        let sdk = MockMultiScan::new();
        let input = ScanInput::new().with_scan_length_secs(30);

        sdk.initiate_scan(ScanType::Finger, &input).await.unwrap();

        let (scan_type, recorded) = sdk.last_input().unwrap();
        assert_eq!(scan_type, ScanType::Finger);
        assert_eq!(recorded, input);
    }

    #[test]
    fn test_sample_body_payload_is_schema_complete() {
        use crate::validation::{body_persistence_keys, validate_result_schema};

        let result = ScanResult::new(ScanType::Body, sample_body_payload());
        assert!(validate_result_schema(
            std::slice::from_ref(&result),
            &body_persistence_keys()
        ));
    }
}
