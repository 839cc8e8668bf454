//! Centralized constants for default endpoints, UA, and pacing.

use std::time::Duration;

/// Default UA sent with every request.
pub(crate) const USER_AGENT: &str = concat!("sparkvibe-rs/", env!("CARGO_PKG_VERSION"));

/// Local development backend (path prefix included).
pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/";

/// Environment variable overriding the base URL in `SvClientBuilder::from_env`.
pub(crate) const ENV_BASE_URL: &str = "SPARKVIBE_API_URL";

/// Environment variable overriding the request timeout, in milliseconds.
pub(crate) const ENV_TIMEOUT_MS: &str = "SPARKVIBE_TIMEOUT_MS";

/// Environment variable enabling the offline auth bypass (`1` or `true`).
pub(crate) const ENV_DEMO_MODE: &str = "SPARKVIBE_DEMO_MODE";

/// Per-request timeout before health scaling.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Minimum spacing between consecutive queued requests.
pub(crate) const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Pause after each queued request before the next one is considered.
pub(crate) const DEFAULT_COOLDOWN: Duration = Duration::from_millis(50);

/// TTL for GET endpoints that do not declare their own.
pub(crate) const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

/// Store keys, shared with the browser build so persisted sessions stay readable.
pub(crate) const STORE_KEY_TOKEN: &str = "token";
pub(crate) const STORE_KEY_USER: &str = "user";
pub(crate) const STORE_KEY_PENDING: &str = "pendingSync";
pub(crate) const STORE_KEY_LAST_SYNC: &str = "lastSync";
