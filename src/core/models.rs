use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A SparkVibe account as returned by the auth and profile endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier (`demo-...` for synthesized accounts).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Lifetime points.
    #[serde(default)]
    pub total_points: u32,
    /// Consecutive days with a completed adventure.
    #[serde(default)]
    pub current_streak: u32,
    /// Best streak ever reached.
    #[serde(default)]
    pub longest_streak: u32,
    /// Level derived from points.
    #[serde(default = "first_level")]
    pub level: u32,
    /// Unlocked achievement ids.
    #[serde(default)]
    pub achievements: Vec<String>,
    /// Day of the last completed adventure.
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

const fn first_level() -> u32 {
    1
}

impl User {
    /// A fresh account with no progress.
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            avatar: None,
            total_points: 0,
            current_streak: 0,
            longest_streak: 0,
            level: first_level(),
            achievements: Vec::new(),
            last_activity: None,
        }
    }
}

/// Mood categories understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Angry,
    Tired,
    Calm,
    Neutral,
}

impl Mood {
    /// Every category, in keyword-matching priority order.
    pub const ALL: [Mood; 7] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Anxious,
        Mood::Angry,
        Mood::Tired,
        Mood::Calm,
        Mood::Neutral,
    ];

    /// The wire name of the mood.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Angry => "angry",
            Mood::Tired => "tired",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = crate::core::SvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::core::SvError::Data(format!("unknown mood `{s}`")))
    }
}
