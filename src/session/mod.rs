//! Client orchestration of the scan flow.
//!
//! The [`MultiScanClient`] drives the five-step flow against the SDK:
//! setup, authorization, resource availability (with background download
//! polling), scan initiation, and extras retrieval. Validation gates every
//! boundary crossing; the asynchronous steps themselves belong to the SDK.

pub mod client;
pub mod resources;

pub use client::{ClientConfig, MultiScanClient, MultiScanClientBuilder};
pub use resources::{PollHandle, ResourcePollConfig};

#[cfg(feature = "tokio-runtime")]
pub use resources::poll_until_ready;
