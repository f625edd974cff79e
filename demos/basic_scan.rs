//! Basic scan example demonstrating the full client flow.
//!
//! This example shows how to:
//! - Build a client with injected credentials
//! - Run setup, authorization, and resource polling
//! - Validate and initiate a body scan
//! - Fetch the 3D mesh extra
//!
//! Run with: cargo run --example basic_scan

use multiscan_bridge::prelude::*;
use multiscan_bridge::sdk::MockMultiScan;
use multiscan_bridge::validation::validate_body_config;

use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== MultiScan Bridge Basic Scan Example ===\n");

    // In a real host these come from the environment or a secrets manager,
    // never from a compiled-in literal.
    let credentials = SdkCredentials::new("tok_demo_000", "user-42", "per-user-salt")
        .with_claim("scan:body");

    // The mock simulates a resource download that completes on the third poll
    let sdk = MockMultiScan::new().with_resources_ready_after(2);

    let config = ClientConfig::new().with_poll(
        ResourcePollConfig::new()
            .with_interval(Duration::from_millis(100))
            .with_max_attempts(10),
    );

    let client = MultiScanClient::builder()
        .with_sdk(sdk)
        .with_credentials(credentials)
        .with_config(config)
        .build()?;

    println!("Setting up and authorizing against '{}'...", client.sdk_name());
    client.start().await?;

    println!("Waiting for scan resources...");
    client.ensure_resources().await?;

    // Build the scan input the way a UI form would
    let input = ScanInput::new()
        .with_sex(Sex::Male)
        .with_height_cm(180)
        .with_weight_kg(85);

    println!("\nInput valid for a body scan: {}", validate_body_config(&input));

    // Perform the scan
    let result = client.scan(ScanType::Body, input).await?;

    println!("\n=== Scan Result ===");
    println!("Scan ID: {}", result.scan_id);
    println!("Result ID: {:?}", result.result_id());
    println!("Payload keys: {}", result.payload_len());
    for key in result.payload_keys().filter(|k| k.contains("_raw_")) {
        println!("  {} = {}", key, result.get(key).unwrap_or(&serde_json::Value::Null));
    }

    // Fetch the 3D mesh derived from the result
    let mesh = client.fetch_extra(&result, ScanExtra::Mesh).await?;
    println!("\nMesh extra: {mesh}");

    Ok(())
}
