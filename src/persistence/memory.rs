//! In-memory result store.

use crate::core::error::PersistenceError;
use crate::core::result::ScanResult;
use crate::persistence::store::ResultStore;

use async_trait::async_trait;
use std::sync::RwLock;

/// A result store backed by process memory.
///
/// Suitable for tests, examples, and hosts that persist results through
/// their own channels and only need a scratch history for smoothing.
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    results: RwLock<Vec<ScanResult>>,
}

impl MemoryResultStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored results.
    pub fn len(&self) -> usize {
        self.results
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Returns `true` if the store holds no results.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn put(&self, result: ScanResult) -> Result<(), PersistenceError> {
        self.results
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(result);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<ScanResult>, PersistenceError> {
        Ok(self
            .results
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        self.results
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ScanType;
    use std::collections::BTreeMap;

    fn result() -> ScanResult {
        ScanResult::new(ScanType::Body, BTreeMap::new())
    }

    #[tokio::test]
    async fn test_put_and_all_preserve_order() {
        let store = MemoryResultStore::new();

        let first = result();
        let second = result();
        let first_id = first.scan_id.clone();
        let second_id = second.scan_id.clone();

        store.put(first).await.unwrap();
        store.put(second).await.unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].scan_id, first_id);
        assert_eq!(all[1].scan_id, second_id);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MemoryResultStore::new();
        store.put(result()).await.unwrap();
        assert!(!store.is_empty());

        store.clear().await.unwrap();
        assert!(store.is_empty());
        assert!(store.all().await.unwrap().is_empty());
    }
}
