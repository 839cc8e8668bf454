//! Adventure capsules, vibe cards and completions.

mod model;

pub use model::{
    AdventureCapsule, CapsuleRequest, CompletionRequest, CompletionResult, VibeCard,
    VibeCardRequest,
};

use crate::api::{self, RequestOptions};
use crate::core::{Mood, SvClient, SvError};
use crate::fallback::Endpoint;

/// A builder for generating an adventure capsule.
pub struct CapsuleBuilder {
    client: SvClient,
    mood: Mood,
    interests: Vec<String>,
    opts: RequestOptions,
}

impl CapsuleBuilder {
    /// Creates a builder for a capsule suited to `mood`.
    pub fn new(client: &SvClient, mood: Mood) -> Self {
        Self {
            client: client.clone(),
            mood,
            interests: Vec::new(),
            opts: RequestOptions::default(),
        }
    }

    /// Adds an interest (`outdoors`, `social`, ...) the capsule should lean towards.
    #[must_use]
    pub fn interest(mut self, interest: impl Into<String>) -> Self {
        self.interests.push(interest.into());
        self
    }

    /// Replaces the interest list.
    #[must_use]
    pub fn interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Per-call request options.
    #[must_use]
    pub fn options(mut self, opts: RequestOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Executes the request.
    ///
    /// # Errors
    ///
    /// Returns an error only for application failures reported by the backend.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(mood = %self.mood)))]
    pub async fn fetch(self) -> Result<AdventureCapsule, SvError> {
        let req = CapsuleRequest {
            mood: self.mood.as_str().to_string(),
            interests: self.interests,
        };
        api::post_as(&self.client, Endpoint::GenerateCapsule.path(), &req, &self.opts).await
    }
}

/// Shorthand for `CapsuleBuilder::new(client, mood).fetch()`.
///
/// # Errors
///
/// See [`CapsuleBuilder::fetch`].
pub async fn generate_capsule(client: &SvClient, mood: Mood) -> Result<AdventureCapsule, SvError> {
    CapsuleBuilder::new(client, mood).fetch().await
}

/// Renders a shareable card for a finished adventure.
///
/// # Errors
///
/// Returns an error only for application failures reported by the backend.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client, req), err))]
pub async fn generate_vibe_card(client: &SvClient, req: &VibeCardRequest) -> Result<VibeCard, SvError> {
    api::post_as(client, Endpoint::GenerateVibeCard.path(), req, &RequestOptions::default()).await
}

/// Records a finished adventure and returns the updated progress.
///
/// Offline, progress is computed locally, the stored user is updated, and the completion is
/// kept for [`sync_pending`](crate::offline::sync_pending).
///
/// # Errors
///
/// Returns an error only for application failures reported by the backend.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client, req), err, fields(capsule = %req.capsule_id)))]
pub async fn complete_adventure(
    client: &SvClient,
    req: &CompletionRequest,
) -> Result<CompletionResult, SvError> {
    api::post_as(client, Endpoint::CompleteAdventure.path(), req, &RequestOptions::default()).await
}
