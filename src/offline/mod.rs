//! Writes answered offline, kept in the local store until they can be replayed.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{RequestOptions, invalidate_after_write, network};
use crate::core::client::constants::{STORE_KEY_LAST_SYNC, STORE_KEY_PENDING};
use crate::core::storage::{read_json, write_json};
use crate::core::{SvClient, SvError};
use crate::fallback::Endpoint;

/// A write that was answered by the synthesizer and still has to reach the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingWrite {
    pub id: String,
    pub method: String,
    pub endpoint: String,
    #[serde(default)]
    pub body: Option<Value>,
    pub queued_at: DateTime<Utc>,
}

/// Outcome of [`sync_pending`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Accepted by the backend.
    pub replayed: usize,
    /// Refused by the backend and dropped.
    pub rejected: usize,
    /// Still pending because the backend could not be reached.
    pub remaining: usize,
}

/// Writes waiting for replay, oldest first.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn pending(client: &SvClient) -> Result<Vec<PendingWrite>, SvError> {
    match read_json::<Vec<PendingWrite>>(client.store().as_ref(), STORE_KEY_PENDING) {
        Ok(v) => Ok(v.unwrap_or_default()),
        // A corrupt log cannot be replayed; start over rather than wedge every write.
        Err(SvError::Json(_)) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// When [`sync_pending`] last emptied the log.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn last_sync(client: &SvClient) -> Result<Option<DateTime<Utc>>, SvError> {
    match read_json(client.store().as_ref(), STORE_KEY_LAST_SYNC) {
        Ok(v) => Ok(v),
        Err(SvError::Json(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

fn save(client: &SvClient, log: &[PendingWrite]) -> Result<(), SvError> {
    if log.is_empty() {
        client.store().remove(STORE_KEY_PENDING)
    } else {
        write_json(client.store().as_ref(), STORE_KEY_PENDING, &log)
    }
}

/// Drops one write by id, leaving anything recorded meanwhile in place.
async fn remove(client: &SvClient, id: &str) -> Result<(), SvError> {
    let _log = client.offline_log().lock().await;
    let mut log = pending(client)?;
    if let Some(i) = log.iter().position(|w| w.id == id) {
        log.remove(i);
        save(client, &log)?;
    }
    Ok(())
}

/// Whether the backend answered and will never accept this write as sent.
fn refused(err: &SvError) -> bool {
    err.is_application()
        || err
            .status()
            .is_some_and(|s| (400..500).contains(&s) && !matches!(s, 401 | 408 | 429))
}

pub(crate) async fn record(
    client: &SvClient,
    method: &Method,
    endpoint: &str,
    body: Option<&Value>,
) -> Result<(), SvError> {
    let _log = client.offline_log().lock().await;
    let mut log = pending(client)?;
    let now = Utc::now();
    log.push(PendingWrite {
        id: format!("{}-{:08x}", now.timestamp_millis(), rand::random::<u32>()),
        method: method.as_str().to_string(),
        endpoint: endpoint.to_string(),
        body: body.cloned(),
        queued_at: now,
    });
    #[cfg(feature = "tracing")]
    tracing::debug!(endpoint, pending = log.len(), "recorded offline write");
    save(client, &log)
}

/// Replays pending writes in order, including any recorded while the replay runs.
///
/// Replay stops at the first failure that may clear up later (transport, 401, 408, 429,
/// 5xx), leaving that write and everything after it in the log. Writes the backend refuses
/// with any other client error are dropped. Each accepted write invalidates the cached
/// routes it affects.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn sync_pending(client: &SvClient) -> Result<SyncReport, SvError> {
    let _sync = client.offline_sync().lock().await;
    let mut report = SyncReport::default();
    let opts = RequestOptions::default().fallback(false);

    loop {
        let next = {
            let _log = client.offline_log().lock().await;
            pending(client)?.into_iter().next()
        };
        let Some(write) = next else { break };

        let method = Method::from_bytes(write.method.as_bytes()).unwrap_or(Method::POST);
        let endpoint = Endpoint::lookup(&method, &write.endpoint);
        match network(client, method, &write.endpoint, write.body.as_ref(), &opts).await {
            Ok(_) => {
                report.replayed += 1;
                if let Some(ep) = endpoint {
                    invalidate_after_write(client, ep).await;
                }
            }
            Err(e) if refused(&e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %e, endpoint = %write.endpoint, "dropping rejected offline write");
                report.rejected += 1;
            }
            Err(_) => break,
        }
        remove(client, &write.id).await?;
    }

    let _log = client.offline_log().lock().await;
    report.remaining = pending(client)?.len();
    if report.remaining == 0 {
        write_json(client.store().as_ref(), STORE_KEY_LAST_SYNC, &Utc::now())?;
    }
    Ok(report)
}
