//! Profile and notifications of the signed-in user.

mod model;

pub use model::{Acknowledgement, MarkReadRequest, Notification, NotificationFeed, UserProfile};

use crate::api::{self, RequestOptions};
use crate::core::{SvClient, SvError};
use crate::fallback::Endpoint;

/// The signed-in user's profile. A fresh answer also updates the stored user.
///
/// # Errors
///
/// Returns an error only when fallback is disabled on the client.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn profile(client: &SvClient) -> Result<UserProfile, SvError> {
    api::get_as(client, Endpoint::Profile.path(), &RequestOptions::default()).await
}

/// # Errors
///
/// Returns an error only when fallback is disabled on the client.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn notifications(client: &SvClient) -> Result<NotificationFeed, SvError> {
    api::get_as(client, Endpoint::Notifications.path(), &RequestOptions::default()).await
}

/// Marks `ids` read, or every notification when `ids` is empty.
///
/// Offline, the request is kept for [`sync_pending`](crate::offline::sync_pending).
///
/// # Errors
///
/// Returns an error only for application failures reported by the backend.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn mark_notifications_read(
    client: &SvClient,
    ids: &[String],
) -> Result<Acknowledgement, SvError> {
    let req = MarkReadRequest { ids: ids.to_vec() };
    api::post_as(
        client,
        Endpoint::MarkNotificationsRead.path(),
        &req,
        &RequestOptions::default(),
    )
    .await
}
