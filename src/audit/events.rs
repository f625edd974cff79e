//! Audit event emission functions.

use crate::core::error::Rejection;
use crate::core::result::ScanResult;
use crate::core::types::{ScanExtra, ScanType};

/// Emits an audit event for completed SDK setup.
pub fn emit_setup_completed(sdk: &str) {
    tracing::info!(
        target: "multiscan_bridge::audit",
        event_type = "setup_completed",
        sdk = %sdk,
        "SDK setup completed"
    );
}

/// Emits an audit event for a granted authorization.
pub fn emit_authorization(sdk: &str, user_id: &str, claim_count: usize) {
    tracing::info!(
        target: "multiscan_bridge::audit",
        event_type = "authorization_granted",
        sdk = %sdk,
        user_id = %user_id,
        claim_count = claim_count,
        "User authorized"
    );
}

/// Emits an audit event for a triggered background resource download.
pub fn emit_download_triggered(sdk: &str) {
    tracing::info!(
        target: "multiscan_bridge::audit",
        event_type = "download_triggered",
        sdk = %sdk,
        "Background resource download triggered"
    );
}

/// Emits an audit event for an availability check that came back negative.
pub fn emit_resource_poll(sdk: &str, attempt: u32, max_attempts: u32) {
    tracing::debug!(
        target: "multiscan_bridge::audit",
        event_type = "resource_poll",
        sdk = %sdk,
        attempt = attempt,
        max_attempts = max_attempts,
        "Scan resources not yet available"
    );
}

/// Emits an audit event once scan resources are available.
pub fn emit_resources_ready(sdk: &str, attempts: u32) {
    tracing::info!(
        target: "multiscan_bridge::audit",
        event_type = "resources_ready",
        sdk = %sdk,
        attempts = attempts,
        "Scan resources available"
    );
}

/// Emits an audit event for a scan request that passed validation and is
/// being forwarded to the SDK.
pub fn emit_scan_requested(scan_type: ScanType, param_count: usize) {
    tracing::info!(
        target: "multiscan_bridge::audit",
        event_type = "scan_requested",
        scan_type = %scan_type,
        param_count = param_count,
        "Scan requested"
    );
}

/// Emits an audit event for a scan input refused by validation.
pub fn emit_scan_rejected(scan_type: ScanType, rejection: &Rejection) {
    tracing::warn!(
        target: "multiscan_bridge::audit",
        event_type = "scan_rejected",
        scan_type = %scan_type,
        key = %rejection.key(),
        rejection = %rejection,
        "Scan input rejected"
    );
}

/// Emits an audit event for a completed scan.
pub fn emit_scan_completed(result: &ScanResult) {
    tracing::info!(
        target: "multiscan_bridge::audit",
        event_type = "scan_completed",
        scan_id = %result.scan_id,
        scan_type = %result.scan_type,
        result_id = ?result.result_id(),
        payload_keys = result.payload_len(),
        "Scan completed"
    );
}

/// Emits an audit event for a fetched extra.
pub fn emit_extra_fetched(scan_id: &str, extra: ScanExtra) {
    tracing::info!(
        target: "multiscan_bridge::audit",
        event_type = "extra_fetched",
        scan_id = %scan_id,
        extra = %extra,
        "Extra fetched"
    );
}

/// Emits an audit event for a smoothing-gate decision.
pub fn emit_smoothing_gate(candidates: usize, released: bool) {
    tracing::info!(
        target: "multiscan_bridge::audit",
        event_type = "smoothing_gate",
        candidates = candidates,
        released = released,
        "Smoothing gate decision"
    );
}
