use httpmock::Method::{GET, POST};
use serde_json::json;
use sparkvibe_rs::{CacheMode, api, social, user};

use crate::common;

#[tokio::test]
async fn second_get_within_ttl_is_served_from_cache() {
    let server = common::setup_server();
    let board = server.mock(|when, then| {
        when.method(GET).path("/api/leaderboard");
        then.status(200).json_body(common::leaderboard_json());
    });

    let client = common::client_for(&server);
    let opts = api::RequestOptions::default();
    let first = api::get(&client, "/leaderboard", &opts).await.unwrap();
    let second = api::get(&client, "/leaderboard", &opts).await.unwrap();

    board.assert_calls(1);
    assert_eq!(first, second);
    assert_eq!(first["entries"][0]["name"], "Ada");
}

#[tokio::test]
async fn concurrent_gets_make_one_round_trip() {
    let server = common::setup_server();
    let trending = server.mock(|when, then| {
        when.method(GET).path("/api/trending-adventures");
        then.status(200)
            .delay(std::time::Duration::from_millis(100))
            .json_body(json!({"adventures": []}));
    });

    let client = common::client_for(&server);
    let (a, b, c) = tokio::join!(
        social::trending_adventures(&client),
        social::trending_adventures(&client),
        social::trending_adventures(&client),
    );

    trending.assert_calls(1);
    for feed in [a, b, c] {
        let feed = feed.unwrap();
        assert!(!feed.fallback);
        assert!(feed.adventures.is_empty());
    }
}

#[tokio::test]
async fn refresh_and_bypass_hit_the_network() {
    let server = common::setup_server();
    let board = server.mock(|when, then| {
        when.method(GET).path("/api/leaderboard");
        then.status(200).json_body(common::leaderboard_json());
    });

    let client = common::client_for(&server);
    api::get(&client, "/leaderboard", &api::RequestOptions::default()).await.unwrap();
    api::get(
        &client,
        "/leaderboard",
        &api::RequestOptions::default().cache_mode(CacheMode::Refresh),
    )
    .await
    .unwrap();
    api::get(
        &client,
        "/leaderboard",
        &api::RequestOptions::default().cache_mode(CacheMode::Bypass),
    )
    .await
    .unwrap();
    // Refresh stored its answer, so a plain read is still cached.
    api::get(&client, "/leaderboard", &api::RequestOptions::default()).await.unwrap();

    board.assert_calls(3);
}

#[tokio::test]
async fn marking_read_invalidates_notifications() {
    let server = common::setup_server();
    let feed = server.mock(|when, then| {
        when.method(GET).path("/api/notifications");
        then.status(200).json_body(json!({"notifications": [], "unreadCount": 0}));
    });
    let mark = server.mock(|when, then| {
        when.method(POST)
            .path("/api/notifications/mark-read")
            .json_body(json!({"ids": ["n1"]}));
        then.status(200).json_body(json!({"success": true}));
    });

    let client = common::client_for(&server);
    user::notifications(&client).await.unwrap();
    user::notifications(&client).await.unwrap();
    feed.assert_calls(1);

    let ack = user::mark_notifications_read(&client, &["n1".to_string()]).await.unwrap();
    assert!(ack.success && !ack.fallback);
    mark.assert_calls(1);

    user::notifications(&client).await.unwrap();
    feed.assert_calls(2);
}

#[tokio::test]
async fn fallback_answers_are_not_cached() {
    let client = common::offline_client(false);

    let first = social::leaderboard(&client, None).await.unwrap();
    assert!(first.fallback);
    assert!(client.cache().is_empty().await);

    let health = client.health().await;
    assert!(!health.is_online);
}

#[tokio::test]
async fn disabled_cache_always_fetches() {
    let server = common::setup_server();
    let board = server.mock(|when, then| {
        when.method(GET).path("/api/leaderboard");
        then.status(200).json_body(common::leaderboard_json());
    });

    let client = common::builder(common::api_base(&server)).cache(false).build().unwrap();
    social::leaderboard(&client, None).await.unwrap();
    social::leaderboard(&client, None).await.unwrap();
    board.assert_calls(2);
}
