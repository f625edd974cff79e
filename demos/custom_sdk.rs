//! Custom SDK example demonstrating how to implement a new bridge backend.
//!
//! This example shows how to:
//! - Implement the MultiScanSdk trait for a custom wrapper
//! - Replay recorded result payloads instead of capturing
//! - Integrate with the MultiScanClient
//!
//! Run with: cargo run --example custom_sdk

use async_trait::async_trait;
use multiscan_bridge::prelude::*;
use multiscan_bridge::sdk::sample_body_payload;

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

/// An SDK that replays previously recorded result payloads.
///
/// Useful for demo environments and UI development, where driving the real
/// capture hardware on every run is impractical.
#[derive(Debug)]
struct ReplaySdk {
    name: String,
    recordings: RwLock<HashMap<ScanType, BTreeMap<String, serde_json::Value>>>,
}

impl ReplaySdk {
    /// Creates a new replay SDK with no recordings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            recordings: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a recorded payload for a scan type.
    pub fn with_recording(
        self,
        scan_type: ScanType,
        payload: BTreeMap<String, serde_json::Value>,
    ) -> Self {
        self.recordings.write().unwrap().insert(scan_type, payload);
        self
    }
}

#[async_trait]
impl MultiScanSdk for ReplaySdk {
    fn name(&self) -> &str {
        &self.name
    }

    async fn setup(&self, credentials: &SdkCredentials) -> SdkResult<()> {
        tracing::debug!(sdk = self.name(), "Replay SDK setup");
        if !credentials.has_token() {
            return Err(MultiScanError::setup_failed("SDK token is empty"));
        }
        Ok(())
    }

    async fn authorize(&self, user_id: &str, _salt: &str, _claims: &[String]) -> SdkResult<()> {
        tracing::debug!(sdk = self.name(), user_id, "Replay SDK authorize");
        Ok(())
    }

    async fn resources_ready(&self) -> SdkResult<bool> {
        // Recordings ship with the binary, nothing to download
        Ok(true)
    }

    async fn download_resources(&self) -> SdkResult<()> {
        Ok(())
    }

    async fn initiate_scan(&self, scan_type: ScanType, input: &ScanInput) -> SdkResult<ScanResult> {
        tracing::debug!(
            sdk = self.name(),
            scan_type = %scan_type,
            param_count = input.len(),
            "Replaying recorded result"
        );

        let payload = self
            .recordings
            .read()
            .unwrap()
            .get(&scan_type)
            .cloned()
            .ok_or_else(|| MultiScanError::sdk(-1, format!("no recording for {scan_type}")))?;

        Ok(ScanResult::new(scan_type, payload))
    }

    async fn get_extra(&self, result: &ScanResult, extra: ScanExtra) -> SdkResult<serde_json::Value> {
        tracing::debug!(scan_id = %result.scan_id, extra = %extra, "Replaying extra");
        Ok(serde_json::json!({ "format": "obj", "source": "replay" }))
    }

    fn supported_scan_types(&self) -> Vec<ScanType> {
        self.recordings.read().unwrap().keys().copied().collect()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Custom SDK Example ===\n");

    // A replay SDK serving the canonical body payload
    let sdk = ReplaySdk::new("replay").with_recording(ScanType::Body, sample_body_payload());

    let credentials =
        SdkCredentials::new("tok_demo_000", "user-42", "per-user-salt").with_claim("scan:body");

    let client = MultiScanClient::builder()
        .with_sdk(sdk)
        .with_credentials(credentials)
        .build()?;

    client.start().await?;
    client.ensure_resources().await?;

    // Test 1: A valid body scan replays the recording
    println!("=== Test 1: Valid body scan ===");
    let input = ScanInput::new()
        .with_sex(Sex::Female)
        .with_height_cm(165)
        .with_weight_kg(60);

    let result = client.scan(ScanType::Body, input).await?;
    println!("Result ID: {:?}", result.result_id());
    println!("Payload keys: {}", result.payload_len());

    let mesh = client.fetch_extra(&result, ScanExtra::Mesh).await?;
    println!("Mesh extra: {mesh}");

    // Test 2: An out-of-range input never reaches the SDK
    println!("\n=== Test 2: Rejected input ===");
    let too_tall = ScanInput::new()
        .with_sex(Sex::Female)
        .with_height_cm(310)
        .with_weight_kg(60);

    match client.scan(ScanType::Body, too_tall).await {
        Err(MultiScanError::InvalidInput { rejection, .. }) => {
            println!("Rejected as expected: {rejection}");
        }
        other => println!("Unexpected outcome: {other:?}"),
    }

    // Test 3: A scan type with no recording surfaces a structured SDK error
    println!("\n=== Test 3: Missing recording ===");
    let finger = ScanInput::new().with_scan_length_secs(30);
    match client.scan(ScanType::Finger, finger).await {
        Err(MultiScanError::Sdk { code, message }) => {
            println!("SDK error {code}: {message}");
        }
        other => println!("Unexpected outcome: {other:?}"),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
