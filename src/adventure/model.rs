use serde::{Deserialize, Serialize};

/// Body of `POST /generate-capsule`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapsuleRequest {
    pub mood: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// A generated adventure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdventureCapsule {
    pub id: String,
    pub mood: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
    pub category: String,
    /// `easy`, `medium` or `hard`.
    pub difficulty: String,
    pub estimated_minutes: u32,
    /// Points granted on completion.
    pub points: u32,
    #[serde(default)]
    pub fallback: bool,
}

/// Body of `POST /generate-vibe-card`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VibeCardRequest {
    pub mood: String,
    pub title: String,
    #[serde(default)]
    pub capsule_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub points: u32,
    /// Preferred visual template; chosen at random when absent.
    #[serde(default)]
    pub template: Option<String>,
}

/// A shareable card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VibeCard {
    pub id: String,
    pub mood: String,
    pub title: String,
    pub template: String,
    /// Inline SVG document.
    pub svg: String,
    /// Hosted image, when the backend uploaded one.
    #[serde(default)]
    pub image_url: Option<String>,
    /// 0 - 100 estimate of how shareable the card is.
    pub viral_score: u32,
    pub share_text: String,
    #[serde(default)]
    pub fallback: bool,
}

/// Body of `POST /complete-adventure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub capsule_id: String,
    /// Points the capsule is worth; the default applies when zero.
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub reflection: Option<String>,
}

/// Progress after completing an adventure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResult {
    pub success: bool,
    pub points_earned: u32,
    pub total_points: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub level: u32,
    #[serde(default)]
    pub new_achievements: Vec<String>,
    #[serde(default)]
    pub fallback: bool,
}
