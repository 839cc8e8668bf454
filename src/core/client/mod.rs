//! Public client surface + builder.
//! Internals are split into `send` (paced, retried transport), `retry` (policies) and
//! `constants` (UA + defaults).

pub(crate) mod constants;
mod retry;
mod send;

pub use retry::{Backoff, CacheMode, RetryConfig};

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use url::Url;

use crate::core::cache::RequestCache;
use crate::core::connection::ConnectionHealth;
use crate::core::queue::{QueueConfig, RequestQueue};
use crate::core::session::Session;
use crate::core::storage::{LocalStore, MemoryStore};
use crate::core::SvError;
use crate::fallback::Synthesizer;
use constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, ENV_BASE_URL, ENV_DEMO_MODE, ENV_TIMEOUT_MS, USER_AGENT};

/// Cache of decoded JSON bodies keyed by endpoint.
pub type ResponseCache = RequestCache<Value, Arc<SvError>>;

#[derive(Debug)]
struct ClientState {
    cache: ResponseCache,
    queue: RequestQueue,
    health: RwLock<ConnectionHealth>,
    session: Session,
    store: Arc<dyn LocalStore>,
    synthesizer: Synthesizer,
    // Guards every read-modify-write of the pending-write log.
    offline_log: Mutex<()>,
    // Held for a whole replay so two syncs never send the same write twice.
    offline_sync: Mutex<()>,
}

/// The SparkVibe API client.
///
/// Clones share one cache, one request queue, one health tracker and one session store, so a
/// single client can be handed to every part of an application. Independent instances (for
/// example one per test) are created with [`SvClient::builder`].
#[derive(Debug, Clone)]
pub struct SvClient {
    http: Client,
    base_url: Url,
    timeout: Duration,
    retry: RetryConfig,
    write_retry: RetryConfig,
    cache_enabled: bool,
    fallback_enabled: bool,
    demo_mode: bool,
    state: Arc<ClientState>,
}

impl SvClient {
    /// Create a new builder.
    pub fn builder() -> SvClientBuilder {
        SvClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn synthesizer(&self) -> &Synthesizer {
        &self.state.synthesizer
    }

    pub(crate) fn offline_log(&self) -> &Mutex<()> {
        &self.state.offline_log
    }

    pub(crate) fn offline_sync(&self) -> &Mutex<()> {
        &self.state.offline_sync
    }

    pub(crate) fn retry_for(&self, write: bool) -> &RetryConfig {
        if write { &self.write_retry } else { &self.retry }
    }

    /// Resolves an endpoint path (`/leaderboard`, `auth/signin?x=1`) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns `SvError::Url` if the joined URL is invalid.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, SvError> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// The base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The persisted session (token and current user).
    pub fn session(&self) -> &Session {
        &self.state.session
    }

    /// The local store backing the session and offline-sync log.
    pub fn store(&self) -> &Arc<dyn LocalStore> {
        &self.state.store
    }

    /// The shared response cache.
    pub fn cache(&self) -> &ResponseCache {
        &self.state.cache
    }

    /// The shared request queue.
    pub fn queue(&self) -> &RequestQueue {
        &self.state.queue
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    pub fn fallback_enabled(&self) -> bool {
        self.fallback_enabled
    }

    /// Whether sign-in and sign-up may be answered with a synthesized demo session.
    pub fn demo_mode(&self) -> bool {
        self.demo_mode
    }

    /// A snapshot of the connection health.
    pub async fn health(&self) -> ConnectionHealth {
        self.state.health.read().await.clone()
    }

    pub(crate) async fn record_success(&self) {
        self.state.health.write().await.record_success();
    }

    pub(crate) async fn record_failure(&self, transport: bool) {
        self.state.health.write().await.record_failure(transport);
    }

    pub(crate) async fn next_timeout(&self) -> Duration {
        self.state.health.read().await.scaled_timeout(self.timeout)
    }

    /// Invalidates one cached endpoint. Returns whether an entry was dropped.
    pub async fn delete_cache_key(&self, key: &str) -> bool {
        self.state.cache.delete(key).await
    }

    /// Invalidates a route together with all its query-string variants.
    pub async fn invalidate_route(&self, path: &str) -> usize {
        self.state.cache.delete_route(path).await
    }

    /// Invalidates every cached endpoint.
    pub async fn clear_cache(&self) {
        self.state.cache.clear().await;
    }

    /// Stops the request queue after draining it. Later queued calls fail with
    /// `SvError::QueueClosed`.
    pub async fn shutdown(&self) {
        self.state.queue.shutdown().await;
    }
}

/* ----------------------- Builder ----------------------- */

/// Configures and creates an [`SvClient`].
#[derive(Default)]
pub struct SvClientBuilder {
    user_agent: Option<String>,
    base_url: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: Option<RetryConfig>,
    write_retry: Option<RetryConfig>,
    queue: Option<QueueConfig>,
    cache_disabled: bool,
    fallback_disabled: bool,
    demo_mode: bool,
    fallback_seed: Option<u64>,
    store: Option<Arc<dyn LocalStore>>,
}

impl SvClientBuilder {
    /// A builder pre-populated from `SPARKVIBE_API_URL`, `SPARKVIBE_TIMEOUT_MS` and
    /// `SPARKVIBE_DEMO_MODE`. Unset or unparsable variables keep the defaults.
    ///
    /// # Errors
    ///
    /// Returns `SvError::Url` if `SPARKVIBE_API_URL` is set but is not a valid URL.
    pub fn from_env() -> Result<Self, SvError> {
        let mut b = Self::default();
        if let Ok(raw) = std::env::var(ENV_BASE_URL)
            && !raw.trim().is_empty()
        {
            b.base_url = Some(Url::parse(raw.trim())?);
        }
        if let Some(ms) = std::env::var(ENV_TIMEOUT_MS)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            b.timeout = Some(Duration::from_millis(ms));
        }
        if let Ok(v) = std::env::var(ENV_DEMO_MODE) {
            b.demo_mode = matches!(v.trim(), "1" | "true" | "yes");
        }
        Ok(b)
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the API base (e.g., `https://api.sparkvibe.app/api/`).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Base per-request timeout, before connection-health scaling. Default: 8s.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Retry policy for GET requests.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Retry policy for POST/PUT/DELETE requests. Default: [`RetryConfig::writes`].
    #[must_use]
    pub fn write_retry_config(mut self, cfg: RetryConfig) -> Self {
        self.write_retry = Some(cfg);
        self
    }

    /// Convenience to turn retries off for every method.
    #[must_use]
    pub fn retry_enabled(mut self, enabled: bool) -> Self {
        let mut read = self.retry.take().unwrap_or_default();
        read.enabled = enabled;
        let mut write = self.write_retry.take().unwrap_or_else(RetryConfig::writes);
        write.enabled = enabled && write.max_retries > 0;
        self.retry = Some(read);
        self.write_retry = Some(write);
        self
    }

    /// Pacing of the shared request queue.
    #[must_use]
    pub const fn queue_config(mut self, cfg: QueueConfig) -> Self {
        self.queue = Some(cfg);
        self
    }

    /// Enable or disable the in-memory response cache. Default: enabled.
    #[must_use]
    pub const fn cache(mut self, enabled: bool) -> Self {
        self.cache_disabled = !enabled;
        self
    }

    /// Enable or disable fallback synthesis. Default: enabled.
    #[must_use]
    pub const fn fallback(mut self, enabled: bool) -> Self {
        self.fallback_disabled = !enabled;
        self
    }

    /// Allow sign-in/sign-up to succeed with a synthesized demo session when the backend is
    /// unreachable. Default: disabled.
    #[must_use]
    pub const fn demo_mode(mut self, enabled: bool) -> Self {
        self.demo_mode = enabled;
        self
    }

    /// Seed the synthesizer's cosmetic randomness, for reproducible fallback output.
    #[must_use]
    pub const fn fallback_seed(mut self, seed: u64) -> Self {
        self.fallback_seed = Some(seed);
        self
    }

    /// Persist session and offline-sync state in `store`. Default: a fresh [`MemoryStore`].
    #[must_use]
    pub fn store(mut self, store: Arc<dyn LocalStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<SvClient, SvError> {
        let mut base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };
        // `Url::join` drops the last path segment unless the base ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }
        let http = httpb.build()?;

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn LocalStore>);

        Ok(SvClient {
            http,
            base_url,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            retry: self.retry.unwrap_or_default(),
            write_retry: self.write_retry.unwrap_or_else(RetryConfig::writes),
            cache_enabled: !self.cache_disabled,
            fallback_enabled: !self.fallback_disabled,
            demo_mode: self.demo_mode,
            state: Arc::new(ClientState {
                cache: RequestCache::new(),
                queue: RequestQueue::new(self.queue.unwrap_or_default()),
                health: RwLock::new(ConnectionHealth::default()),
                session: Session::new(Arc::clone(&store)),
                store,
                synthesizer: Synthesizer::new(self.fallback_seed),
                offline_log: Mutex::new(()),
                offline_sync: Mutex::new(()),
            }),
        })
    }
}
