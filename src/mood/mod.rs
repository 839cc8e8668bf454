//! Mood analysis of free text.

mod model;

pub use model::{MoodAnalysis, MoodRequest};

use crate::api::{self, RequestOptions};
use crate::core::{SvClient, SvError};
use crate::fallback::Endpoint;

/// Classifies how the user feels from `text`.
///
/// Offline, a keyword match stands in for the AI analysis and the result has
/// `fallback == true`.
///
/// # Errors
///
/// Returns an error only for application failures reported by the backend.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client, text), err))]
pub async fn analyze_mood(client: &SvClient, text: &str) -> Result<MoodAnalysis, SvError> {
    let req = MoodRequest {
        text_input: text.to_string(),
    };
    api::post_as(client, Endpoint::AnalyzeMood.path(), &req, &RequestOptions::default()).await
}
