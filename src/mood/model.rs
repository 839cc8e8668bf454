use serde::{Deserialize, Serialize};

use crate::core::Mood;

/// Body of `POST /analyze-mood`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodRequest {
    /// Free text describing how the user feels.
    pub text_input: String,
}

/// Result of a mood analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodAnalysis {
    /// Mood category, e.g. `happy`.
    pub mood: String,
    /// 0.0 - 1.0.
    pub confidence: f32,
    /// `low`, `medium` or `high`.
    pub energy_level: String,
    /// Emotion words detected in the text.
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Adventure category that suits the mood.
    pub suggested_category: String,
    /// One-line reflection shown under the result.
    #[serde(default)]
    pub insight: String,
    #[serde(default)]
    pub fallback: bool,
}

impl MoodAnalysis {
    /// The mood as a known category, if the backend used one.
    pub fn mood_kind(&self) -> Option<Mood> {
        self.mood.parse().ok()
    }
}
