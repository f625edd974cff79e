//! Resource download polling.
//!
//! The SDK downloads its scan resources in the background; completion is
//! only observable by polling the availability check. This module models
//! that as a cancellable repeating timer task around the pure availability
//! predicate.

#[cfg(feature = "tokio-runtime")]
use crate::core::error::{MultiScanError, SdkResult};
#[cfg(feature = "tokio-runtime")]
use crate::core::traits::MultiScanSdk;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for resource availability polling.
#[derive(Debug, Clone)]
pub struct ResourcePollConfig {
    /// Fixed interval between availability checks.
    pub interval: Duration,

    /// Maximum number of availability checks before giving up.
    pub max_attempts: u32,
}

impl Default for ResourcePollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            max_attempts: 100,
        }
    }
}

impl ResourcePollConfig {
    /// Creates a new polling configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration that checks availability exactly once.
    pub fn single_check() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Sets the polling interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the maximum number of attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Returns whether another attempt should be made after `attempt`
    /// checks have already run.
    pub fn should_continue(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// A handle for cancelling an in-flight polling loop.
///
/// Handles are cheap to clone; cancelling any clone stops the loop at its
/// next decision point.
#[derive(Debug, Clone, Default)]
pub struct PollHandle {
    cancelled: Arc<AtomicBool>,
}

impl PollHandle {
    /// Creates a new, uncancelled handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns `true` if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Polls the SDK's availability check until resources are ready.
///
/// The first check runs immediately; subsequent checks are spaced by the
/// configured interval. The loop stops early if the handle is cancelled or
/// the SDK returns an error.
///
/// # Errors
///
/// - `MultiScanError::DownloadCancelled` if the handle was cancelled.
/// - `MultiScanError::ResourcesUnavailable` if the attempt budget ran out.
/// - Any error the availability check itself returns.
#[cfg(feature = "tokio-runtime")]
pub async fn poll_until_ready(
    sdk: &dyn MultiScanSdk,
    config: &ResourcePollConfig,
    handle: &PollHandle,
) -> SdkResult<()> {
    let mut attempt = 0;
    loop {
        if handle.is_cancelled() {
            return Err(MultiScanError::DownloadCancelled);
        }

        if sdk.resources_ready().await? {
            crate::audit::emit_resources_ready(sdk.name(), attempt + 1);
            return Ok(());
        }

        attempt += 1;
        crate::audit::emit_resource_poll(sdk.name(), attempt, config.max_attempts);

        if !config.should_continue(attempt) {
            return Err(MultiScanError::ResourcesUnavailable { attempts: attempt });
        }

        tokio::time::sleep(config.interval).await;
    }
}
