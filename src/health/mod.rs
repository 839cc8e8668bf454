//! Backend health probe.

mod model;

pub use model::HealthStatus;

use crate::api::{self, RequestOptions};
use crate::core::{CacheMode, SvClient, SvError};
use crate::fallback::Endpoint;

/// Asks the backend for its status, bypassing the cache.
///
/// An unreachable backend reads as `status == "demo"` with `fallback == true`.
///
/// # Errors
///
/// Returns an error only when fallback is disabled on the client.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn check(client: &SvClient) -> Result<HealthStatus, SvError> {
    let opts = RequestOptions::default().cache_mode(CacheMode::Refresh);
    api::get_as(client, Endpoint::Health.path(), &opts).await
}
