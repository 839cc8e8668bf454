use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: u32,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub points: u32,
    #[serde(default)]
    pub streak: u32,
}

/// Answer of `GET /leaderboard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub fallback: bool,
}

/// An adventure other users are doing right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingAdventure {
    pub id: String,
    pub title: String,
    pub category: String,
    pub mood: String,
    pub participants: u32,
    #[serde(default)]
    pub likes: u32,
}

/// Answer of `GET /trending-adventures`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingFeed {
    pub adventures: Vec<TrendingAdventure>,
    #[serde(default)]
    pub fallback: bool,
}
