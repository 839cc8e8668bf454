use httpmock::Method::{GET, POST};
use serde_json::json;
use sparkvibe_rs::{SvError, api, health, mood};

use crate::common;

#[tokio::test]
async fn get_is_retried_then_falls_back() {
    let server = common::setup_server();
    let max_retries = 2;
    let board = server.mock(|when, then| {
        when.method(GET).path("/api/leaderboard");
        then.status(503).body("unavailable");
    });

    let client = common::builder(common::api_base(&server))
        .retry_config(common::quick_retry(max_retries))
        .build()
        .unwrap();
    let res = sparkvibe_rs::social::leaderboard(&client, None).await.unwrap();

    board.assert_calls((1 + max_retries) as usize);
    assert!(res.fallback);
    assert_eq!(res.entries.len(), 6);

    let h = client.health().await;
    assert_eq!(h.consecutive_failures, 3);
    assert!(!h.is_healthy);
    // The server answered, so the client is not offline.
    assert!(h.is_online);
}

#[tokio::test]
async fn post_is_sent_once_then_falls_back() {
    let server = common::setup_server();
    let analyze = server.mock(|when, then| {
        when.method(POST).path("/api/analyze-mood");
        then.status(500).body("ai provider down");
    });

    let client = common::client_for(&server);
    let res = mood::analyze_mood(&client, "I feel calm and relaxed").await.unwrap();

    analyze.assert_calls(1);
    assert!(res.fallback);
    assert_eq!(res.mood, "calm");
}

#[tokio::test]
async fn recovery_resets_health() {
    let server = common::setup_server();
    let mut failing = server.mock(|when, then| {
        when.method(GET).path("/api/health");
        then.status(502);
    });

    let client = common::builder(common::api_base(&server))
        .retry_enabled(false)
        .build()
        .unwrap();

    let down = health::check(&client).await.unwrap();
    assert!(down.fallback);
    assert_eq!(down.status, "demo");
    let h = client.health().await;
    assert_eq!(h.consecutive_failures, 1);
    assert!((h.backoff_multiplier - 1.5).abs() < f64::EPSILON);

    failing.delete();
    let ok = server.mock(|when, then| {
        when.method(GET).path("/api/health");
        then.status(200)
            .json_body(json!({"status": "ok", "timestamp": "2026-10-01T12:00:00Z"}));
    });

    // Health always refreshes, so the cached fallback-free path is exercised.
    let up = health::check(&client).await.unwrap();
    ok.assert_calls(1);
    assert!(up.is_ok());
    let h = client.health().await;
    assert_eq!(h.consecutive_failures, 0);
    assert!((h.backoff_multiplier - 1.0).abs() < f64::EPSILON);
    assert!(h.last_success.is_some());
}

#[tokio::test]
async fn fallback_can_be_turned_off_per_call() {
    let server = common::setup_server();
    let board = server.mock(|when, then| {
        when.method(GET).path("/api/leaderboard");
        then.status(503);
    });

    let client = common::builder(common::api_base(&server))
        .retry_enabled(false)
        .build()
        .unwrap();
    let err = api::get(
        &client,
        "/leaderboard",
        &api::RequestOptions::default().fallback(false),
    )
    .await
    .unwrap_err();

    board.assert_calls(1);
    assert_eq!(err.status(), Some(503));
    assert!(matches!(err.root(), SvError::Status { status: 503, .. }));
}
