use httpmock::Method::{GET, POST};
use serde_json::json;
use sparkvibe_rs::{SvError, User, api, auth};

use crate::common;

#[tokio::test]
async fn sign_in_online_persists_the_session() {
    let server = common::setup_server();
    let signin = server.mock(|when, then| {
        when.method(POST)
            .path("/api/auth/signin")
            .json_body(json!({"email": "a@b.com", "password": "secret1"}));
        then.status(200).json_body(json!({
            "success": true,
            "token": "jwt-abc",
            "user": common::user_json("u-1", "Ada", "a@b.com", 120)
        }));
    });

    let client = common::client_for(&server);
    let res = api::post(
        &client,
        "/auth/signin",
        &json!({"email": "a@b.com", "password": "secret1"}),
        &api::RequestOptions::default(),
    )
    .await
    .unwrap();

    signin.assert();
    assert_eq!(res["success"], true);
    assert_eq!(res["token"], "jwt-abc");
    assert!(res.get("fallback").is_none());
    assert_eq!(client.session().token().unwrap().as_deref(), Some("jwt-abc"));
    assert_eq!(client.session().user().unwrap().map(|u| u.id), Some("u-1".to_string()));
}

#[tokio::test]
async fn sign_in_offline_in_demo_mode_creates_a_demo_session() {
    let client = common::offline_client(true);

    let res = auth::sign_in(&client, "a@b.com", "secret1").await.unwrap();

    assert!(res.success);
    assert!(res.fallback);
    assert!(res.token.starts_with("demo-token-"));
    assert_eq!(res.user.email, "a@b.com");
    assert_eq!(client.session().token().unwrap(), Some(res.token.clone()));
    assert_eq!(client.session().user().unwrap(), Some(res.user));
}

#[tokio::test]
async fn sign_in_offline_without_demo_mode_fails() {
    let client = common::offline_client(false);

    let err = auth::sign_in(&client, "a@b.com", "secret1").await.unwrap_err();

    assert!(err.is_transport(), "got {err:?}");
    assert!(!client.session().is_signed_in());
}

#[tokio::test]
async fn wrong_password_is_reported_not_faked() {
    let server = common::setup_server();
    let signin = server.mock(|when, then| {
        when.method(POST).path("/api/auth/signin");
        then.status(401)
            .json_body(json!({"success": false, "message": "Invalid email or password"}));
    });

    // Demo mode must not mask a real rejection.
    let client = common::builder(common::api_base(&server)).demo_mode(true).build().unwrap();
    client.session().save("old-token", &User::new("u-0", "Old", "old@b.com")).unwrap();

    let err = auth::sign_in(&client, "a@b.com", "nope").await.unwrap_err();

    signin.assert_calls(1);
    match err {
        SvError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid email or password");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(!client.session().is_signed_in());
    assert_eq!(client.session().user().unwrap(), None);
}

#[tokio::test]
async fn unauthorized_read_clears_credentials_then_falls_back() {
    let server = common::setup_server();
    let profile = server.mock(|when, then| {
        when.method(GET)
            .path("/api/user/profile")
            .header("authorization", "Bearer expired");
        then.status(401).json_body(json!({"message": "token expired"}));
    });

    let client = common::client_for(&server);
    client.session().save("expired", &User::new("u-9", "Zed", "z@b.com")).unwrap();

    let res = sparkvibe_rs::user::profile(&client).await.unwrap();

    profile.assert_calls(1);
    assert!(res.fallback);
    assert_eq!(res.user.id, "guest");
    assert_eq!(client.session().token().unwrap(), None);
    assert_eq!(client.session().user().unwrap(), None);
}

#[tokio::test]
async fn sign_out_clears_session_and_cache() {
    let server = common::setup_server();
    let board = server.mock(|when, then| {
        when.method(GET).path("/api/leaderboard");
        then.status(200).json_body(common::leaderboard_json());
    });

    let client = common::client_for(&server);
    client.session().save("tok", &User::new("u", "U", "u@b.com")).unwrap();
    sparkvibe_rs::social::leaderboard(&client, None).await.unwrap();

    auth::sign_out(&client).await.unwrap();
    assert!(auth::current_user(&client).unwrap().is_none());

    sparkvibe_rs::social::leaderboard(&client, None).await.unwrap();
    board.assert_calls(2);
}
