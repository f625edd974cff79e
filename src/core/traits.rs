//! Core traits for the multiscan-bridge library.
//!
//! This module defines the `MultiScanSdk` trait that wraps the proprietary
//! scanning engine. The real implementation is a thin FFI layer over the
//! vendor binary; tests and examples use the mock in [`crate::sdk`].

use crate::core::config::SdkCredentials;
use crate::core::error::SdkResult;
use crate::core::input::ScanInput;
use crate::core::result::ScanResult;
use crate::core::types::{ScanExtra, ScanType};

use async_trait::async_trait;
use std::fmt::Debug;

/// The abstract surface of the scanning SDK.
///
/// The bridge orchestrates the five-step flow (setup, authorize, resource
/// availability, scan initiation, extras retrieval) against this trait and
/// never calls the vendor binary directly.
///
/// # Implementation Notes
///
/// - Implementations must be `Send + Sync` for use in async contexts.
/// - Implementations should never panic; all failures are returned as
///   `MultiScanError`.
/// - `initiate_scan` receives an input that has already passed schema
///   validation; implementations must forward it unmodified.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use multiscan_bridge::core::{
///     MultiScanSdk, ScanExtra, ScanInput, ScanResult, ScanType, SdkCredentials, SdkResult,
/// };
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct VendorSdk {
///     // FFI handle into the vendor binary
/// }
///
/// #[async_trait]
/// impl MultiScanSdk for VendorSdk {
///     fn name(&self) -> &str {
///         "vendor"
///     }
///
///     async fn setup(&self, credentials: &SdkCredentials) -> SdkResult<()> {
///         // Pass the token through to the vendor setup call...
///         todo!()
///     }
///
///     // ...remaining operations
/// #   async fn authorize(&self, _: &str, _: &str, _: &[String]) -> SdkResult<()> { todo!() }
/// #   async fn resources_ready(&self) -> SdkResult<bool> { todo!() }
/// #   async fn download_resources(&self) -> SdkResult<()> { todo!() }
/// #   async fn initiate_scan(&self, _: ScanType, _: &ScanInput) -> SdkResult<ScanResult> { todo!() }
/// #   async fn get_extra(&self, _: &ScanResult, _: ScanExtra) -> SdkResult<serde_json::Value> { todo!() }
/// }
/// ```
#[async_trait]
pub trait MultiScanSdk: Send + Sync + Debug {
    /// Returns the name of this SDK implementation.
    ///
    /// This should be a stable, human-readable identifier like "vendor" or
    /// "mock".
    fn name(&self) -> &str;

    /// Initializes the SDK with the given credentials.
    ///
    /// Only the token is consumed here; the remaining credential fields are
    /// used by [`authorize`](Self::authorize).
    async fn setup(&self, credentials: &SdkCredentials) -> SdkResult<()>;

    /// Authorizes a user against the SDK's backend.
    ///
    /// The user id, salt, and claims are opaque credentials passed through
    /// verbatim; the bridge does not interpret them.
    async fn authorize(&self, user_id: &str, salt: &str, claims: &[String]) -> SdkResult<()>;

    /// Returns `true` if the on-device scan resources are downloaded and
    /// ready for use.
    async fn resources_ready(&self) -> SdkResult<bool>;

    /// Triggers a background download of the scan resources.
    ///
    /// The call returns as soon as the download is scheduled; completion is
    /// observed by polling [`resources_ready`](Self::resources_ready).
    async fn download_resources(&self) -> SdkResult<()>;

    /// Initiates a scan and resolves with its result payload.
    ///
    /// # Errors
    ///
    /// Returns `MultiScanError::Sdk` for failures inside the vendor binary
    /// (capture aborted, pose lost, permission denied, ...).
    async fn initiate_scan(&self, scan_type: ScanType, input: &ScanInput) -> SdkResult<ScanResult>;

    /// Retrieves a supplementary artifact derived from a completed scan.
    async fn get_extra(
        &self,
        result: &ScanResult,
        extra: ScanExtra,
    ) -> SdkResult<serde_json::Value>;

    /// Returns the scan types this implementation supports.
    fn supported_scan_types(&self) -> Vec<ScanType> {
        vec![ScanType::Face, ScanType::Body, ScanType::Finger]
    }

    /// Returns the vendor SDK version, if available.
    async fn sdk_version(&self) -> Option<String> {
        None
    }
}

/// A boxed SDK for type-erased storage.
pub type BoxedSdk = Box<dyn MultiScanSdk>;

/// An arc-wrapped SDK for shared ownership.
pub type ArcSdk = std::sync::Arc<dyn MultiScanSdk>;
