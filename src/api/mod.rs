//! Untyped `get`/`post`/`put`/`delete` that hide the cache, the queue and fallback synthesis.
//!
//! Pipeline for one call:
//! 1. GETs consult the response cache (keyed by endpoint, single-flight).
//! 2. The network attempt runs through the paced queue with the client's retry policy.
//! 3. A 401 clears the stored session before anything is returned.
//! 4. On failure, known endpoints are answered by the synthesizer (`"fallback": true`);
//!    application errors, unknown endpoints and auth without demo mode are returned as-is.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::client::constants::DEFAULT_CACHE_TTL;
use crate::core::{CacheMode, RetryConfig, SvClient, SvError, User, net};
use crate::fallback::{Endpoint, Operation};
use crate::offline;

/// Per-call knobs for the wrapped functions.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// How a GET uses the response cache. Ignored for writes.
    pub cache_mode: CacheMode,
    /// Freshness of a cached GET; defaults to the route's TTL.
    pub cache_ttl: Option<Duration>,
    /// Replaces the client's retry policy for this call.
    pub retry: Option<RetryConfig>,
    /// Whether the attempt waits its turn in the paced queue.
    pub queued: bool,
    /// Whether a failed call may be answered by the synthesizer.
    pub fallback: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            cache_mode: CacheMode::Use,
            cache_ttl: None,
            retry: None,
            queued: true,
            fallback: true,
        }
    }
}

impl RequestOptions {
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    #[must_use]
    pub const fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry = cfg;
        self
    }

    #[must_use]
    pub const fn queued(mut self, queued: bool) -> Self {
        self.queued = queued;
        self
    }

    #[must_use]
    pub const fn fallback(mut self, enabled: bool) -> Self {
        self.fallback = enabled;
        self
    }
}

/// `GET endpoint`, cached.
///
/// # Errors
///
/// Returns an error only when no fallback applies: application errors, unknown endpoints,
/// or fallback disabled.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client, opts), err, level = "debug"))]
pub async fn get(client: &SvClient, endpoint: &str, opts: &RequestOptions) -> Result<Value, SvError> {
    request(client, Method::GET, endpoint, None, opts).await
}

/// `POST endpoint` with a JSON body. Never retried unless the client's write policy says so.
///
/// # Errors
///
/// See [`get`]. Sign-in and sign-up also fail when the backend is unreachable outside demo
/// mode.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client, data, opts), err, level = "debug"))]
pub async fn post<B: Serialize + ?Sized>(
    client: &SvClient,
    endpoint: &str,
    data: &B,
    opts: &RequestOptions,
) -> Result<Value, SvError> {
    let body = serde_json::to_value(data)?;
    request(client, Method::POST, endpoint, Some(body), opts).await
}

/// `PUT endpoint` with a JSON body.
///
/// # Errors
///
/// See [`get`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client, data, opts), err, level = "debug"))]
pub async fn put<B: Serialize + ?Sized>(
    client: &SvClient,
    endpoint: &str,
    data: &B,
    opts: &RequestOptions,
) -> Result<Value, SvError> {
    let body = serde_json::to_value(data)?;
    request(client, Method::PUT, endpoint, Some(body), opts).await
}

/// `DELETE endpoint`.
///
/// # Errors
///
/// See [`get`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client, opts), err, level = "debug"))]
pub async fn delete(client: &SvClient, endpoint: &str, opts: &RequestOptions) -> Result<Value, SvError> {
    request(client, Method::DELETE, endpoint, None, opts).await
}

pub(crate) async fn get_as<T: DeserializeOwned>(
    client: &SvClient,
    endpoint: &str,
    opts: &RequestOptions,
) -> Result<T, SvError> {
    let v = get(client, endpoint, opts).await?;
    Ok(serde_json::from_value(v)?)
}

pub(crate) async fn post_as<T: DeserializeOwned, B: Serialize + ?Sized>(
    client: &SvClient,
    endpoint: &str,
    data: &B,
    opts: &RequestOptions,
) -> Result<T, SvError> {
    let v = post(client, endpoint, data, opts).await?;
    Ok(serde_json::from_value(v)?)
}

/// Cache key for an endpoint: always a single leading slash.
fn cache_key(endpoint: &str) -> String {
    format!("/{}", endpoint.trim_start_matches('/'))
}

async fn request(
    client: &SvClient,
    method: Method,
    endpoint: &str,
    body: Option<Value>,
    opts: &RequestOptions,
) -> Result<Value, SvError> {
    let known = Endpoint::lookup(&method, endpoint);

    let cached = method == Method::GET && client.cache_enabled() && opts.cache_mode != CacheMode::Bypass;
    let result = if cached {
        let ttl = opts
            .cache_ttl
            .or_else(|| known.and_then(Endpoint::default_ttl))
            .unwrap_or(DEFAULT_CACHE_TTL);
        let key = cache_key(endpoint);
        let c = client.clone();
        let ep = endpoint.to_string();
        let o = opts.clone();
        let fetch = move || async move {
            network(&c, Method::GET, &ep, None, &o).await.map_err(Arc::new)
        };
        let out = match opts.cache_mode {
            CacheMode::Refresh => client.cache().refresh(&key, ttl, fetch).await,
            _ => client.cache().get(&key, ttl, fetch).await,
        };
        out.map_err(SvError::from_shared)
    } else {
        network(client, method.clone(), endpoint, body.as_ref(), opts).await
    };

    match result {
        Ok(value) => {
            if let Some(ep) = known {
                after_success(client, ep, &value).await?;
            }
            Ok(value)
        }
        Err(err) => recover(client, &method, endpoint, body.as_ref(), opts, err).await,
    }
}

/// One real round-trip: bearer token, queue, retries, status mapping.
pub(crate) async fn network(
    client: &SvClient,
    method: Method,
    endpoint: &str,
    body: Option<&Value>,
    opts: &RequestOptions,
) -> Result<Value, SvError> {
    let url = client.endpoint_url(endpoint)?;
    let write = method != Method::GET;
    let auth_route = Endpoint::lookup(&method, endpoint).is_some_and(Endpoint::is_auth);

    let mut req = client.http().request(method, url);
    if let Some(token) = client.session().token()? {
        req = req.bearer_auth(token);
    }
    if let Some(b) = body {
        req = req.json(b);
    }

    let retry = opts.retry.as_ref().unwrap_or_else(|| client.retry_for(write));
    let resp = client.send_with_retry(req, retry, opts.queued).await?;

    if resp.status() == StatusCode::UNAUTHORIZED {
        #[cfg(feature = "tracing")]
        tracing::info!(url = %resp.url(), "401: clearing stored session");
        client.session().clear()?;
        client.clear_cache().await;
    }

    net::read_json(resp, auth_route).await
}

/// Keeps local state in step with a real backend answer.
async fn after_success(client: &SvClient, endpoint: Endpoint, value: &Value) -> Result<(), SvError> {
    match endpoint {
        Endpoint::SignIn | Endpoint::SignUp => {
            let token = value.get("token").and_then(Value::as_str);
            let user = value
                .get("user")
                .and_then(|u| serde_json::from_value::<User>(u.clone()).ok());
            if let (Some(token), Some(user)) = (token, user) {
                client.session().save(token, &user)?;
                client.clear_cache().await;
            }
        }
        Endpoint::Profile => {
            if client.session().is_signed_in()
                && let Some(user) = value
                    .get("user")
                    .and_then(|u| serde_json::from_value::<User>(u.clone()).ok())
            {
                client.session().update_user(&user)?;
            }
        }
        Endpoint::CompleteAdventure | Endpoint::MarkNotificationsRead => {
            invalidate_after_write(client, endpoint).await;
        }
        _ => {}
    }
    Ok(())
}

pub(crate) async fn invalidate_after_write(client: &SvClient, endpoint: Endpoint) {
    match endpoint {
        Endpoint::CompleteAdventure => {
            client.invalidate_route(Endpoint::Profile.path()).await;
            client.invalidate_route(Endpoint::Leaderboard.path()).await;
        }
        Endpoint::MarkNotificationsRead => {
            client.invalidate_route(Endpoint::Notifications.path()).await;
        }
        _ => {}
    }
}

async fn recover(
    client: &SvClient,
    method: &Method,
    endpoint: &str,
    body: Option<&Value>,
    opts: &RequestOptions,
    err: SvError,
) -> Result<Value, SvError> {
    if err.is_application() || !opts.fallback || !client.fallback_enabled() {
        return Err(err);
    }

    let op = match Operation::resolve(method, endpoint, body) {
        Ok(op) => op,
        Err(e @ SvError::NoFallback { .. }) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %err, "no fallback for {method} {endpoint}");
            return Err(e);
        }
        // A payload the synthesizer cannot read: the network error is the better answer.
        Err(_) => return Err(err),
    };
    let ep = op.endpoint();
    if ep.is_auth() && !client.demo_mode() {
        return Err(err);
    }

    #[cfg(feature = "tracing")]
    tracing::warn!(error = %err, endpoint = ep.path(), "serving synthesized response");
    if std::env::var("SV_DEBUG").ok().as_deref() == Some("1") {
        eprintln!("SV_DEBUG: fallback for {method} {endpoint}: {err}");
    }

    let synthesized = client.synthesizer().synthesize(&op, client.session())?;
    if ep.replays_offline() {
        offline::record(client, method, endpoint, body).await?;
        invalidate_after_write(client, ep).await;
    }
    synthesized.into_json()
}
