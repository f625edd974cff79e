//! # MultiScan Bridge
//!
//! A typed, validating bridge over an opaque body, face, and finger
//! scanning SDK.
//!
//! ## Overview
//!
//! The vendor's scanning engine is a closed native binary: computer vision,
//! body modeling, and capture all live behind its API. What a host
//! application owns is the glue around it, and the one piece of that glue
//! with real invariants is validation. This crate provides:
//!
//! - Per-scan-type schema validation of input configurations before a scan
//!   request is dispatched
//! - Required-key verification of result payloads before they are used for
//!   extras retrieval or smoothing persistence
//! - A client that drives the five-step flow (setup, authorize, resource
//!   download polling, scan, extras) against an abstract SDK trait
//! - A schema-gated persistence delegate for body-scan smoothing
//! - Structured audit logging for every lifecycle step
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use multiscan_bridge::prelude::*;
//! use multiscan_bridge::sdk::MockMultiScan;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credentials are injected, never compiled in
//!     let credentials = SdkCredentials::new(token, "user-42", salt)
//!         .with_claim("scan:body");
//!
//!     let client = MultiScanClient::builder()
//!         .with_sdk(MockMultiScan::new())
//!         .with_credentials(credentials)
//!         .build()?;
//!
//!     client.start().await?;
//!     client.ensure_resources().await?;
//!
//!     let input = ScanInput::new()
//!         .with_sex(Sex::Male)
//!         .with_height_cm(180)
//!         .with_weight_kg(85);
//!
//!     let result = client.scan(ScanType::Body, input).await?;
//!     let mesh = client.fetch_extra(&result, ScanExtra::Mesh).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! The validators are also usable standalone, with no client at all:
//!
//! ```rust
//! use multiscan_bridge::core::{ScanInput, Sex};
//! use multiscan_bridge::validation::validate_body_config;
//!
//! let input = ScanInput::new()
//!     .with_sex(Sex::Female)
//!     .with_height_cm(165)
//!     .with_weight_kg(60);
//!
//! assert!(validate_body_config(&input));
//! ```
//!
//! ## Features
//!
//! - `default` - Includes tokio runtime support
//! - `tokio-runtime` - Scan timeouts and resource polling via tokio
//!
//! ## Architecture
//!
//! The library is organized into several layers:
//!
//! - **Core**: Fundamental types, the SDK trait, and error handling
//! - **Validation**: Schemas and the pure validation predicates
//! - **Session**: Client orchestration and resource download polling
//! - **Sdk**: The mock SDK implementation
//! - **Persistence**: Result storage and the smoothing gate
//! - **Audit**: Structured logging for the scan lifecycle

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod audit;
pub mod core;
pub mod persistence;
pub mod sdk;
pub mod session;
pub mod validation;

// Re-export commonly used types at the crate root
pub use crate::core::{
    DiabetesStatus, MultiScanError, MultiScanSdk, ParamValue, Rejection, ScanExtra, ScanInput,
    ScanResult, ScanType, SdkCredentials, SdkResult, Sex,
};

pub use crate::persistence::{MemoryResultStore, ResultStore, SmoothingGate};
pub use crate::session::{ClientConfig, MultiScanClient, PollHandle, ResourcePollConfig};
pub use crate::validation::{Schema, body_persistence_keys, validate_result_schema};

/// Prelude module for convenient imports.
///
/// ```rust
/// use multiscan_bridge::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{
        DiabetesStatus, MultiScanError, MultiScanSdk, ParamValue, Rejection, ScanExtra, ScanInput,
        ScanResult, ScanType, SdkCredentials, SdkResult, Sex,
    };
    pub use crate::persistence::{MemoryResultStore, ResultStore, SmoothingGate};
    pub use crate::session::{ClientConfig, MultiScanClient, PollHandle, ResourcePollConfig};
    pub use crate::validation::{
        body_persistence_keys, validate_body_config, validate_config, validate_face_config,
        validate_finger_config, validate_result_schema, validate_shared_config,
    };
}
