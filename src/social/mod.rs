//! Leaderboard and trending adventures.

mod model;

pub use model::{Leaderboard, LeaderboardEntry, TrendingAdventure, TrendingFeed};

use crate::api::{self, RequestOptions};
use crate::core::{SvClient, SvError};
use crate::fallback::Endpoint;

/// The top of the leaderboard, optionally capped at `limit` rows.
///
/// # Errors
///
/// Returns an error only when fallback is disabled on the client.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn leaderboard(client: &SvClient, limit: Option<u32>) -> Result<Leaderboard, SvError> {
    let endpoint = match limit {
        Some(n) => format!("{}?limit={n}", Endpoint::Leaderboard.path()),
        None => Endpoint::Leaderboard.path().to_string(),
    };
    api::get_as(client, &endpoint, &RequestOptions::default()).await
}

/// # Errors
///
/// Returns an error only when fallback is disabled on the client.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn trending_adventures(client: &SvClient) -> Result<TrendingFeed, SvError> {
    api::get_as(client, Endpoint::Trending.path(), &RequestOptions::default()).await
}
