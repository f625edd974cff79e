//! SDK implementations.
//!
//! The real scanning engine is a proprietary native binary wrapped behind
//! the [`MultiScanSdk`](crate::core::MultiScanSdk) trait by the host
//! application. This crate ships only the mock, which tests and examples
//! use in its place.
//!
//! ## Implementing the real bridge
//!
//! ```rust,ignore
//! use multiscan_bridge::core::{MultiScanSdk, SdkResult, SdkCredentials};
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! pub struct VendorSdk {
//!     // FFI handle into the vendor binary
//! }
//!
//! #[async_trait]
//! impl MultiScanSdk for VendorSdk {
//!     fn name(&self) -> &str {
//!         "vendor"
//!     }
//!
//!     async fn setup(&self, credentials: &SdkCredentials) -> SdkResult<()> {
//!         // Marshal into the vendor setup call
//!         todo!()
//!     }
//!
//!     // ...
//! }
//! ```

pub mod mock;

// Re-exports
pub use mock::{sample_body_payload, MockMultiScan};
