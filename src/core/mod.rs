//! Core types and traits for the multiscan-bridge library.
//!
//! This module provides the fundamental building blocks used throughout
//! the library:
//!
//! - [`types`] - Common types like `ScanType`, `ParamValue`, `ScanExtra`
//! - [`input`] - The scan input parameter mapping
//! - [`result`] - Scan result structures
//! - [`traits`] - The `MultiScanSdk` trait
//! - [`error`] - Structured error types and validation rejections
//! - [`config`] - Injected SDK credentials

pub mod config;
pub mod error;
pub mod input;
pub mod result;
pub mod traits;
pub mod types;

// Re-export commonly used types at the core level
pub use config::SdkCredentials;
pub use error::{MultiScanError, PersistenceError, PersistenceResult, Rejection, SdkResult};
pub use input::ScanInput;
pub use result::ScanResult;
pub use traits::{ArcSdk, BoxedSdk, MultiScanSdk};
pub use types::{DiabetesStatus, FieldKind, ParamValue, ScanExtra, ScanType, Sex};
