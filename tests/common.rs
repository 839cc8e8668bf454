#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use httpmock::MockServer;
use serde_json::{Value, json};
use sparkvibe_rs::{Backoff, LocalStore, MemoryStore, QueueConfig, RetryConfig, SvClient, SvClientBuilder};
use url::Url;

pub fn setup_server() -> MockServer {
    MockServer::start()
}

/// Nothing listens here; connections are refused immediately.
pub const UNREACHABLE: &str = "http://127.0.0.1:9/api/";

pub fn api_base(server: &MockServer) -> Url {
    Url::parse(&format!("{}/api/", server.base_url())).unwrap()
}

/// Short, deterministic retries so tests stay fast.
pub fn quick_retry(max_retries: u32) -> RetryConfig {
    RetryConfig {
        max_retries,
        backoff: Backoff::Fixed(Duration::from_millis(5)),
        ..RetryConfig::default()
    }
}

pub fn builder(base: Url) -> SvClientBuilder {
    SvClient::builder()
        .base_url(base)
        .timeout(Duration::from_secs(2))
        .queue_config(QueueConfig::unpaced())
        .retry_config(quick_retry(2))
        .fallback_seed(7)
}

pub fn client_for(server: &MockServer) -> SvClient {
    builder(api_base(server)).build().unwrap()
}

pub fn offline_client(demo_mode: bool) -> SvClient {
    builder(Url::parse(UNREACHABLE).unwrap())
        .retry_enabled(false)
        .demo_mode(demo_mode)
        .build()
        .unwrap()
}

pub fn offline_client_with_store(store: Arc<dyn LocalStore>) -> SvClient {
    builder(Url::parse(UNREACHABLE).unwrap())
        .retry_enabled(false)
        .demo_mode(true)
        .store(store)
        .build()
        .unwrap()
}

pub fn memory_store() -> Arc<dyn LocalStore> {
    Arc::new(MemoryStore::new())
}

pub fn user_json(id: &str, name: &str, email: &str, points: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "totalPoints": points,
        "currentStreak": 2,
        "longestStreak": 5,
        "level": points / 100 + 1,
        "achievements": ["first-spark"]
    })
}

pub fn leaderboard_json() -> Value {
    json!({
        "entries": [
            { "rank": 1, "userId": "u1", "name": "Ada", "points": 900, "streak": 4 },
            { "rank": 2, "userId": "u2", "name": "Linus", "points": 850, "streak": 1 }
        ],
        "updatedAt": "2026-10-01T12:00:00Z"
    })
}
