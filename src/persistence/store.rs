//! Result store trait definition.

use crate::core::error::PersistenceError;
use crate::core::result::ScanResult;

use async_trait::async_trait;
use std::fmt::Debug;

/// Trait for scan result storage implementations.
///
/// The SDK's smoothing step asks for a user's historical body-scan results
/// so it can derive adjusted measurements. Implementations of this trait
/// provide that history; the bridge never stores anything itself.
///
/// Results must be returned oldest-first, since the SDK compares
/// historical and current results in order.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use multiscan_bridge::persistence::ResultStore;
/// use multiscan_bridge::core::{PersistenceError, ScanResult};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct DatabaseResultStore {
///     // Your storage implementation
/// }
///
/// #[async_trait]
/// impl ResultStore for DatabaseResultStore {
///     async fn put(&self, result: ScanResult) -> Result<(), PersistenceError> {
///         // Persist the result
///         todo!()
///     }
///
///     async fn all(&self) -> Result<Vec<ScanResult>, PersistenceError> {
///         // Load every stored result, oldest first
///         todo!()
///     }
///
///     async fn clear(&self) -> Result<(), PersistenceError> {
///         // Remove everything
///         todo!()
///     }
/// }
/// ```
#[async_trait]
pub trait ResultStore: Send + Sync + Debug {
    /// Stores a scan result.
    async fn put(&self, result: ScanResult) -> Result<(), PersistenceError>;

    /// Returns every stored result, oldest first.
    async fn all(&self) -> Result<Vec<ScanResult>, PersistenceError>;

    /// Removes all stored results.
    async fn clear(&self) -> Result<(), PersistenceError>;
}
