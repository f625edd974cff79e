//! The main client orchestrating the scan flow.

use crate::core::config::SdkCredentials;
use crate::core::error::{MultiScanError, SdkResult};
use crate::core::input::ScanInput;
use crate::core::result::ScanResult;
use crate::core::traits::{ArcSdk, MultiScanSdk};
use crate::core::types::{ScanExtra, ScanType};
use crate::persistence::{ResultStore, SmoothingGate};
use crate::session::resources::{PollHandle, ResourcePollConfig};
use crate::validation::schema::body_persistence_keys;
use crate::validation::validator::{check_config, missing_result_keys};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Timeout for a single scan initiation.
    pub scan_timeout: Duration,

    /// Resource availability polling configuration.
    pub poll: ResourcePollConfig,

    /// Whether `ensure_resources` triggers a background download when the
    /// resources are absent.
    pub auto_download: bool,

    /// Whether schema-complete body-scan results are recorded into the
    /// result store for later smoothing.
    pub persist_body_results: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scan_timeout: Duration::from_secs(120),
            poll: ResourcePollConfig::default(),
            auto_download: true,
            persist_body_results: true,
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scan timeout.
    pub fn with_scan_timeout(mut self, timeout: Duration) -> Self {
        self.scan_timeout = timeout;
        self
    }

    /// Sets the polling configuration.
    pub fn with_poll(mut self, poll: ResourcePollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Enables or disables automatic resource downloads.
    pub fn with_auto_download(mut self, enabled: bool) -> Self {
        self.auto_download = enabled;
        self
    }

    /// Enables or disables body-result persistence.
    pub fn with_persist_body_results(mut self, enabled: bool) -> Self {
        self.persist_body_results = enabled;
        self
    }
}

/// Builder for creating a `MultiScanClient`.
pub struct MultiScanClientBuilder {
    sdk: Option<ArcSdk>,
    credentials: Option<SdkCredentials>,
    store: Option<Arc<dyn ResultStore>>,
    config: ClientConfig,
}

impl MultiScanClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            sdk: None,
            credentials: None,
            store: None,
            config: ClientConfig::default(),
        }
    }

    /// Sets the SDK implementation.
    pub fn with_sdk<S: MultiScanSdk + 'static>(mut self, sdk: S) -> Self {
        self.sdk = Some(Arc::new(sdk));
        self
    }

    /// Sets an SDK implementation wrapped in an Arc.
    pub fn with_arc_sdk(mut self, sdk: ArcSdk) -> Self {
        self.sdk = Some(sdk);
        self
    }

    /// Sets the injected credentials.
    pub fn with_credentials(mut self, credentials: SdkCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the result store used for body-scan smoothing.
    pub fn with_result_store<R: ResultStore + 'static>(mut self, store: R) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Sets a result store wrapped in an Arc.
    pub fn with_arc_result_store(mut self, store: Arc<dyn ResultStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<MultiScanClient, MultiScanError> {
        let sdk = self
            .sdk
            .ok_or_else(|| MultiScanError::configuration("an SDK implementation is required"))?;
        let credentials = self
            .credentials
            .ok_or_else(|| MultiScanError::configuration("credentials are required"))?;

        if !credentials.has_token() {
            return Err(MultiScanError::configuration("the SDK token is empty"));
        }

        Ok(MultiScanClient {
            sdk,
            credentials,
            store: self.store,
            config: self.config,
            authorized: AtomicBool::new(false),
        })
    }
}

impl Default for MultiScanClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The client driving the five-step scan flow against the SDK.
///
/// Setup and authorization run once through [`start`](Self::start);
/// afterwards scans may be initiated from any thread. Every scan input is
/// validated against its scan type's schema before being forwarded, and
/// every result payload is schema-checked before extras retrieval or
/// persistence.
pub struct MultiScanClient {
    /// The SDK implementation.
    sdk: ArcSdk,
    /// Injected credentials, passed through to setup and authorize.
    credentials: SdkCredentials,
    /// Optional store for body-scan smoothing history.
    store: Option<Arc<dyn ResultStore>>,
    /// Configuration.
    config: ClientConfig,
    /// Set once setup and authorization have completed.
    authorized: AtomicBool,
}

impl MultiScanClient {
    /// Creates a new builder.
    pub fn builder() -> MultiScanClientBuilder {
        MultiScanClientBuilder::new()
    }

    /// Runs SDK setup and user authorization.
    ///
    /// Must complete successfully before any scan is initiated.
    pub async fn start(&self) -> SdkResult<()> {
        self.sdk.setup(&self.credentials).await?;
        crate::audit::emit_setup_completed(self.sdk.name());

        self.sdk
            .authorize(
                self.credentials.user_id(),
                self.credentials.salt(),
                self.credentials.claims(),
            )
            .await?;
        crate::audit::emit_authorization(
            self.sdk.name(),
            self.credentials.user_id(),
            self.credentials.claims().len(),
        );

        self.authorized.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Returns `true` if setup and authorization have completed.
    pub fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }

    /// Ensures the scan resources are downloaded and ready.
    ///
    /// If the resources are absent and `auto_download` is enabled, a
    /// background download is triggered; availability is then polled at the
    /// configured interval.
    pub async fn ensure_resources(&self) -> SdkResult<()> {
        self.ensure_resources_with_handle(&PollHandle::new()).await
    }

    /// Like [`ensure_resources`](Self::ensure_resources), but cancellable
    /// through the given handle.
    pub async fn ensure_resources_with_handle(&self, handle: &PollHandle) -> SdkResult<()> {
        if self.sdk.resources_ready().await? {
            return Ok(());
        }

        if self.config.auto_download {
            self.sdk.download_resources().await?;
            crate::audit::emit_download_triggered(self.sdk.name());
        }

        #[cfg(feature = "tokio-runtime")]
        {
            crate::session::resources::poll_until_ready(self.sdk.as_ref(), &self.config.poll, handle)
                .await
        }

        #[cfg(not(feature = "tokio-runtime"))]
        {
            let _ = handle;
            Err(MultiScanError::ResourcesUnavailable { attempts: 1 })
        }
    }

    /// Validates the input against the scan type's schema and, on success,
    /// forwards it unmodified to the SDK.
    ///
    /// # Errors
    ///
    /// - `MultiScanError::NotAuthorized` if `start()` has not completed.
    /// - `MultiScanError::InvalidInput` if validation rejects the input;
    ///   the SDK is not called in that case.
    /// - `MultiScanError::Timeout` if the SDK exceeds the scan timeout.
    pub async fn scan(&self, scan_type: ScanType, input: ScanInput) -> SdkResult<ScanResult> {
        if !self.is_authorized() {
            return Err(MultiScanError::NotAuthorized);
        }

        if let Err(rejection) = check_config(scan_type, &input) {
            crate::audit::emit_scan_rejected(scan_type, &rejection);
            return Err(MultiScanError::invalid_input(scan_type, rejection));
        }

        crate::audit::emit_scan_requested(scan_type, input.len());

        let result = self.initiate_with_timeout(scan_type, &input).await?;
        crate::audit::emit_scan_completed(&result);

        if scan_type == ScanType::Body && self.config.persist_body_results {
            self.record_body_result(&result).await;
        }

        Ok(result)
    }

    /// Retrieves a supplementary artifact for a completed scan.
    ///
    /// The result payload must carry every key of the body persistence
    /// schema before the SDK is asked for the extra.
    pub async fn fetch_extra(
        &self,
        result: &ScanResult,
        extra: ScanExtra,
    ) -> SdkResult<serde_json::Value> {
        self.check_extras_preconditions(result)?;

        let value = self.sdk.get_extra(result, extra).await?;
        crate::audit::emit_extra_fetched(&result.scan_id, extra);
        Ok(value)
    }

    /// Retrieves several extras concurrently.
    ///
    /// The schema gate runs once for the result; individual extras that
    /// fail are logged and skipped. An error is returned only when every
    /// requested extra failed.
    pub async fn fetch_extras(
        &self,
        result: &ScanResult,
        extras: &[ScanExtra],
    ) -> SdkResult<Vec<(ScanExtra, serde_json::Value)>> {
        use futures::future::join_all;

        self.check_extras_preconditions(result)?;

        let futures: Vec<_> = extras
            .iter()
            .map(|&extra| async move { (extra, self.sdk.get_extra(result, extra).await) })
            .collect();

        let outcomes = join_all(futures).await;

        let mut fetched = Vec::with_capacity(outcomes.len());
        let mut first_error = None;
        for (extra, outcome) in outcomes {
            match outcome {
                Ok(value) => {
                    crate::audit::emit_extra_fetched(&result.scan_id, extra);
                    fetched.push((extra, value));
                }
                Err(error) => {
                    tracing::warn!(
                        scan_id = %result.scan_id,
                        extra = %extra,
                        error = %error,
                        "Extra retrieval failed, continuing with others"
                    );
                    first_error.get_or_insert(error);
                }
            }
        }

        if fetched.is_empty() {
            if let Some(error) = first_error {
                return Err(error);
            }
        }

        Ok(fetched)
    }

    /// Returns a smoothing gate over the configured result store, if any.
    pub fn smoothing_gate(&self) -> Option<SmoothingGate> {
        self.store.as_ref().map(|store| SmoothingGate::new(Arc::clone(store)))
    }

    /// Returns the name of the underlying SDK.
    pub fn sdk_name(&self) -> &str {
        self.sdk.name()
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns `true` if a result store is configured.
    pub fn has_result_store(&self) -> bool {
        self.store.is_some()
    }

    fn check_extras_preconditions(&self, result: &ScanResult) -> SdkResult<()> {
        if !result.scan_type.supports_extras() {
            return Err(MultiScanError::ExtrasUnsupported {
                scan_type: result.scan_type,
            });
        }

        let missing = missing_result_keys(result, &body_persistence_keys());
        if !missing.is_empty() {
            return Err(MultiScanError::InvalidResult { missing });
        }

        Ok(())
    }

    /// Records a schema-complete body result into the store. Storage
    /// problems are logged, never surfaced to the scan caller.
    async fn record_body_result(&self, result: &ScanResult) {
        let Some(store) = &self.store else {
            return;
        };

        if !missing_result_keys(result, &body_persistence_keys()).is_empty() {
            tracing::warn!(
                scan_id = %result.scan_id,
                "Body result is schema-incomplete, not recording for smoothing"
            );
            return;
        }

        if let Err(error) = store.put(result.clone()).await {
            tracing::warn!(
                scan_id = %result.scan_id,
                error = %error,
                "Failed to record body result for smoothing"
            );
        }
    }

    async fn initiate_with_timeout(
        &self,
        scan_type: ScanType,
        input: &ScanInput,
    ) -> SdkResult<ScanResult> {
        #[cfg(feature = "tokio-runtime")]
        {
            match tokio::time::timeout(
                self.config.scan_timeout,
                self.sdk.initiate_scan(scan_type, input),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(MultiScanError::Timeout {
                    elapsed: self.config.scan_timeout,
                }),
            }
        }

        #[cfg(not(feature = "tokio-runtime"))]
        {
            self.sdk.initiate_scan(scan_type, input).await
        }
    }
}

impl std::fmt::Debug for MultiScanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiScanClient")
            .field("sdk", &self.sdk.name())
            .field("user_id", &self.credentials.user_id())
            .field("has_result_store", &self.store.is_some())
            .field("config", &self.config)
            .field("authorized", &self.is_authorized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{DiabetesStatus, Sex};
    use crate::persistence::MemoryResultStore;
    use crate::sdk::MockMultiScan;

    fn credentials() -> SdkCredentials {
        SdkCredentials::new("token-abc", "user-1", "salt-1").with_claim("scan:body")
    }

    fn body_input() -> ScanInput {
        ScanInput::new()
            .with_sex(Sex::Male)
            .with_height_cm(180)
            .with_weight_kg(85)
    }

    fn face_input() -> ScanInput {
        body_input()
            .with_age_years(35)
            .with_smoker(false)
            .with_hypertension(false)
            .with_blood_pressure_medication(false)
            .with_diabetes_status(DiabetesStatus::None)
    }

    async fn started_client(sdk: MockMultiScan) -> MultiScanClient {
        let client = MultiScanClient::builder()
            .with_sdk(sdk)
            .with_credentials(credentials())
            .build()
            .unwrap();
        client.start().await.unwrap();
        client
    }

    #[test]
    fn test_builder_requires_sdk_and_credentials() {
        assert!(MultiScanClient::builder().build().is_err());
        assert!(MultiScanClient::builder()
            .with_sdk(MockMultiScan::new())
            .build()
            .is_err());
    }

    #[test]
    fn test_builder_rejects_empty_token() {
        let result = MultiScanClient::builder()
            .with_sdk(MockMultiScan::new())
            .with_credentials(SdkCredentials::new("", "user-1", "salt"))
            .build();
        assert!(matches!(
            result,
            Err(MultiScanError::Configuration { .. })
        ));
    }

    #[tokio::test]
    async fn test_scan_requires_start() {
        let client = MultiScanClient::builder()
            .with_sdk(MockMultiScan::new())
            .with_credentials(credentials())
            .build()
            .unwrap();

        let result = client.scan(ScanType::Body, body_input()).await;
        assert!(matches!(result, Err(MultiScanError::NotAuthorized)));
    }

    #[tokio::test]
    async fn test_scan_flow() {
        let client = started_client(MockMultiScan::new()).await;
        assert!(client.is_authorized());

        let result = client.scan(ScanType::Body, body_input()).await.unwrap();
        assert_eq!(result.scan_type, ScanType::Body);
        assert!(result.contains_key("cm_raw_waist"));
    }

    #[tokio::test]
    async fn test_invalid_input_is_not_forwarded() {
        let sdk = MockMultiScan::new();
        let client = MultiScanClient::builder()
            .with_sdk(sdk)
            .with_credentials(credentials())
            .build()
            .unwrap();
        client.start().await.unwrap();

        let result = client
            .scan(ScanType::Face, face_input().with_age_years(12))
            .await;

        match result {
            Err(MultiScanError::InvalidInput { scan_type, .. }) => {
                assert_eq!(scan_type, ScanType::Face);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_valid_input_is_forwarded_unmodified() {
        let sdk = Arc::new(MockMultiScan::new());
        let client = MultiScanClient::builder()
            .with_arc_sdk(Arc::clone(&sdk) as ArcSdk)
            .with_credentials(credentials())
            .build()
            .unwrap();
        client.start().await.unwrap();

        let input = face_input();
        client.scan(ScanType::Face, input.clone()).await.unwrap();

        // The mock saw exactly what the caller built.
        let (scan_type, recorded) = sdk.last_input().unwrap();
        assert_eq!(scan_type, ScanType::Face);
        assert_eq!(recorded, input);
    }

    #[tokio::test]
    async fn test_ensure_resources_triggers_download_and_polls() {
        let config = ClientConfig::new().with_poll(
            ResourcePollConfig::new()
                .with_interval(Duration::from_millis(1))
                .with_max_attempts(10),
        );
        let client = MultiScanClient::builder()
            .with_sdk(MockMultiScan::new().with_resources_ready_after(3))
            .with_credentials(credentials())
            .with_config(config)
            .build()
            .unwrap();

        assert!(client.ensure_resources().await.is_ok());
    }

    #[tokio::test]
    async fn test_ensure_resources_cancellation() {
        let client = MultiScanClient::builder()
            .with_sdk(MockMultiScan::new().with_resources_ready_after(1000))
            .with_credentials(credentials())
            .build()
            .unwrap();

        let handle = PollHandle::new();
        handle.cancel();
        let result = client.ensure_resources_with_handle(&handle).await;
        assert!(matches!(result, Err(MultiScanError::DownloadCancelled)));
    }

    #[tokio::test]
    async fn test_fetch_extra_rejects_non_body_results() {
        let client = started_client(MockMultiScan::new()).await;
        let result = client.scan(ScanType::Face, face_input()).await.unwrap();

        let outcome = client.fetch_extra(&result, ScanExtra::Mesh).await;
        assert!(matches!(
            outcome,
            Err(MultiScanError::ExtrasUnsupported { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_extra_rejects_incomplete_payload() {
        let client = started_client(MockMultiScan::new()).await;
        let mut result = client.scan(ScanType::Body, body_input()).await.unwrap();
        result.payload.remove("date");

        let outcome = client.fetch_extra(&result, ScanExtra::Mesh).await;
        match outcome {
            Err(MultiScanError::InvalidResult { missing }) => {
                assert_eq!(missing, vec!["date".to_string()]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_extra_returns_mesh() {
        let client = started_client(MockMultiScan::new()).await;
        let result = client.scan(ScanType::Body, body_input()).await.unwrap();

        let mesh = client.fetch_extra(&result, ScanExtra::Mesh).await.unwrap();
        assert!(mesh.get("format").is_some());
    }

    #[tokio::test]
    async fn test_fetch_extras_concurrent() {
        let client = started_client(MockMultiScan::new()).await;
        let result = client.scan(ScanType::Body, body_input()).await.unwrap();

        let extras = client
            .fetch_extras(&result, &[ScanExtra::Mesh])
            .await
            .unwrap();
        assert_eq!(extras.len(), 1);
        assert_eq!(extras[0].0, ScanExtra::Mesh);
    }

    #[tokio::test]
    async fn test_body_results_are_recorded_for_smoothing() {
        let client = MultiScanClient::builder()
            .with_sdk(MockMultiScan::new())
            .with_credentials(credentials())
            .with_result_store(MemoryResultStore::new())
            .build()
            .unwrap();
        client.start().await.unwrap();

        client.scan(ScanType::Body, body_input()).await.unwrap();
        client.scan(ScanType::Body, body_input()).await.unwrap();

        let gate = client.smoothing_gate().unwrap();
        assert_eq!(gate.candidate_results().await.len(), 2);
    }

    #[tokio::test]
    async fn test_face_results_are_not_recorded() {
        let client = MultiScanClient::builder()
            .with_sdk(MockMultiScan::new())
            .with_credentials(credentials())
            .with_result_store(MemoryResultStore::new())
            .build()
            .unwrap();
        client.start().await.unwrap();

        client.scan(ScanType::Face, face_input()).await.unwrap();

        let gate = client.smoothing_gate().unwrap();
        assert!(gate.candidate_results().await.is_empty());
    }

    #[tokio::test]
    async fn test_authorization_failure_propagates() {
        let client = MultiScanClient::builder()
            .with_sdk(MockMultiScan::new().with_authorization_denied())
            .with_credentials(credentials())
            .build()
            .unwrap();

        let result = client.start().await;
        assert!(matches!(
            result,
            Err(MultiScanError::AuthorizationFailed { .. })
        ));
        assert!(!client.is_authorized());
    }
}
