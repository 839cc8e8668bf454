//! sparkvibe-rs: resilient client for the SparkVibe API.
//!
//! Every call goes through the same pipeline: GETs are de-duplicated and cached, network
//! attempts are paced through one FIFO queue, and when the backend cannot answer, known
//! routes are served by a local synthesizer (marked `fallback: true`) so the app keeps
//! working offline. A 401 always clears the stored session first.
//!
//! ```no_run
//! # async fn run() -> Result<(), sparkvibe_rs::SvError> {
//! let client = sparkvibe_rs::SvClient::builder().build()?;
//! let board = sparkvibe_rs::social::leaderboard(&client, Some(10)).await?;
//! if board.fallback {
//!     println!("offline: showing demo data");
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;

pub mod adventure;
pub mod api;
pub mod auth;
pub mod fallback;
pub mod health;
pub mod mood;
pub mod offline;
pub mod social;
pub mod user;

pub use crate::core::{
    CacheMode, ConnectionHealth, FileStore, LocalStore, MemoryStore, Mood, QueueConfig,
    RequestCache, RequestQueue, RetryConfig, Session, SvClient, SvClientBuilder, SvError, User,
};
pub use crate::core::client::Backoff;

pub use adventure::{
    AdventureCapsule, CapsuleBuilder, CompletionRequest, CompletionResult, VibeCard,
    VibeCardRequest,
};
pub use api::RequestOptions;
pub use auth::AuthResponse;
pub use fallback::{Endpoint, Operation, Synthesized, Synthesizer};
pub use health::HealthStatus;
pub use mood::MoodAnalysis;
pub use offline::{PendingWrite, SyncReport};
pub use social::{Leaderboard, LeaderboardEntry, TrendingAdventure, TrendingFeed};
pub use user::{Acknowledgement, Notification, NotificationFeed, UserProfile};

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `sparkvibe_rs=debug`).
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sparkvibe_rs=debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
