//! Smoothing gate example.
//!
//! Body-scan smoothing asks the host for historical results. This example
//! shows the gate releasing a schema-complete history and substituting an
//! empty set once a schema-incomplete result enters the store.
//!
//! Run with: cargo run --example smoothing_gate

use multiscan_bridge::prelude::*;
use multiscan_bridge::sdk::sample_body_payload;

use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== MultiScan Bridge Smoothing Gate Example ===\n");

    let store = Arc::new(MemoryResultStore::new());
    let gate = SmoothingGate::new(Arc::clone(&store) as Arc<dyn ResultStore>);

    // Two schema-complete historical results
    store.put(ScanResult::new(ScanType::Body, sample_body_payload())).await?;
    store.put(ScanResult::new(ScanType::Body, sample_body_payload())).await?;

    let candidates = gate.candidate_results().await;
    println!("Complete history released: {} results", candidates.len());

    // A result missing a required measurement poisons the candidate set
    let mut incomplete = sample_body_payload();
    incomplete.remove("cm_raw_waist");
    store.put(ScanResult::new(ScanType::Body, incomplete)).await?;

    let candidates = gate.candidate_results().await;
    println!(
        "After an incomplete result entered the store: {} results (empty set substituted)",
        candidates.len()
    );

    Ok(())
}
