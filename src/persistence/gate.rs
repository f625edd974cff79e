//! The smoothing gate.
//!
//! When the SDK derives adjusted (`_adj_`) measurements it calls back into
//! the host for the user's historical body-scan results. The gate sits on
//! that callback: a candidate set is released to the SDK only if every
//! result in it satisfies the required-key schema; otherwise an empty set
//! is substituted and the SDK falls back to raw values.

use crate::core::result::ScanResult;
use crate::persistence::store::ResultStore;
use crate::validation::schema::body_persistence_keys;
use crate::validation::validator::validate_result_schema;

use std::collections::BTreeSet;
use std::sync::Arc;

/// Gates historical results behind result-schema validation.
///
/// The gate is infallible from the SDK's point of view: storage errors and
/// schema failures both collapse to an empty candidate set.
#[derive(Debug, Clone)]
pub struct SmoothingGate {
    store: Arc<dyn ResultStore>,
    required_keys: BTreeSet<String>,
}

impl SmoothingGate {
    /// Creates a gate over the given store using the canonical body
    /// persistence key set.
    pub fn new(store: Arc<dyn ResultStore>) -> Self {
        Self {
            store,
            required_keys: body_persistence_keys(),
        }
    }

    /// Replaces the required-key set.
    ///
    /// Different SDK token scopes expose different field subsets, so the
    /// schema is configurable rather than fixed.
    pub fn with_required_keys(mut self, required_keys: BTreeSet<String>) -> Self {
        self.required_keys = required_keys;
        self
    }

    /// Returns the required-key set in force.
    pub fn required_keys(&self) -> &BTreeSet<String> {
        &self.required_keys
    }

    /// Loads the stored history and returns it if it passes schema
    /// validation, or an empty set otherwise.
    ///
    /// An empty history passes vacuously and is released as-is.
    pub async fn candidate_results(&self) -> Vec<ScanResult> {
        let results = match self.store.all().await {
            Ok(results) => results,
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    "failed to load historical results; substituting empty set"
                );
                return Vec::new();
            }
        };

        let released = validate_result_schema(&results, &self.required_keys);
        crate::audit::emit_smoothing_gate(results.len(), released);

        if released {
            results
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{keys, ScanType};
    use crate::persistence::memory::MemoryResultStore;
    use crate::sdk::sample_body_payload;

    fn complete_result() -> ScanResult {
        ScanResult::new(ScanType::Body, sample_body_payload())
    }

    #[tokio::test]
    async fn test_gate_releases_valid_history() {
        let store = Arc::new(MemoryResultStore::new());
        store.put(complete_result()).await.unwrap();
        store.put(complete_result()).await.unwrap();

        let gate = SmoothingGate::new(store);
        assert_eq!(gate.candidate_results().await.len(), 2);
    }

    #[tokio::test]
    async fn test_gate_substitutes_empty_on_schema_failure() {
        let store = Arc::new(MemoryResultStore::new());
        store.put(complete_result()).await.unwrap();

        let mut incomplete = complete_result();
        incomplete.payload.remove(keys::RAW_WAIST);
        store.put(incomplete).await.unwrap();

        // One bad result poisons the whole candidate set.
        let gate = SmoothingGate::new(store);
        assert!(gate.candidate_results().await.is_empty());
    }

    #[tokio::test]
    async fn test_gate_passes_empty_history_through() {
        let store = Arc::new(MemoryResultStore::new());
        let gate = SmoothingGate::new(store);
        assert!(gate.candidate_results().await.is_empty());
    }

    #[tokio::test]
    async fn test_gate_with_custom_keys() {
        let store = Arc::new(MemoryResultStore::new());
        let mut payload = sample_body_payload();
        payload.remove(keys::RAW_FITNESS);
        store
            .put(ScanResult::new(ScanType::Body, payload))
            .await
            .unwrap();

        // Fails under the canonical schema...
        let gate = SmoothingGate::new(Arc::clone(&store) as Arc<dyn ResultStore>);
        assert!(gate.candidate_results().await.is_empty());

        // ...but a narrower scope accepts it.
        let mut narrower = body_persistence_keys();
        narrower.remove(keys::RAW_FITNESS);
        let gate = SmoothingGate::new(store).with_required_keys(narrower);
        assert_eq!(gate.candidate_results().await.len(), 1);
    }
}
