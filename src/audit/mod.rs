//! Structured audit logging for the scan lifecycle.
//!
//! This module provides functions for emitting structured events using the
//! `tracing` crate. Events can be captured by any tracing subscriber (JSON
//! file, OpenTelemetry, etc.). The validators themselves never log; only
//! the client emits events, at the boundary around each lifecycle step.

mod events;

pub use events::{
    emit_authorization, emit_download_triggered, emit_extra_fetched, emit_resource_poll,
    emit_resources_ready, emit_scan_completed, emit_scan_rejected, emit_scan_requested,
    emit_setup_completed, emit_smoothing_gate,
};
