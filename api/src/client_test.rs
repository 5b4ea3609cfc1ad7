use serde_json::json;

use super::*;
use crate::test_helpers::{FakeIdentity, ScriptedTransport, config, user, user_json};

// =============================================================
// Paths
// =============================================================

#[test]
fn resource_paths_match_api_routes() {
    assert_eq!(exam_path("pcd"), "/exams/pcd");
    assert_eq!(exam_sets_path("pcd"), "/exams/pcd/sets");
    assert_eq!(exam_set_stats_path("pcd"), "/exams/pcd/sets/stats");
}

#[test]
fn resource_paths_escape_ids() {
    assert_eq!(exam_path("a/b"), "/exams/a%2Fb");
}

// =============================================================
// Token attachment through the client
// =============================================================

#[tokio::test]
async fn requests_carry_token_only_while_signed_in() {
    let transport = ScriptedTransport::default();
    transport.json(Method::Get, EXAMS_PATH, 200, &json!([]));
    transport.json(Method::Get, EXAMS_PATH, 200, &json!([]));
    let identity = FakeIdentity::signed_in("tok-a");
    let api = ApiClient::new(config(), &transport, &identity);

    api.exams().await.unwrap();
    *identity.token.borrow_mut() = None;
    api.exams().await.unwrap();

    let sent = transport.sent.borrow();
    assert_eq!(sent[0].bearer(), Some("tok-a"));
    assert_eq!(sent[1].bearer(), None);
}

// =============================================================
// Status handling and decoding
// =============================================================

#[tokio::test]
async fn current_user_decodes_record() {
    let transport = ScriptedTransport::default();
    transport.json(Method::Get, CURRENT_USER_PATH, 200, &user_json("u1", "a@x.io"));
    let identity = FakeIdentity::signed_in("t");
    let api = ApiClient::new(config(), &transport, &identity);

    assert_eq!(api.current_user().await, Ok(user("u1", "a@x.io")));
}

#[tokio::test]
async fn missing_user_maps_to_not_found() {
    let transport = ScriptedTransport::default();
    transport.status(Method::Get, CURRENT_USER_PATH, 404);
    let identity = FakeIdentity::signed_in("t");
    let api = ApiClient::new(config(), &transport, &identity);

    assert_eq!(api.current_user().await, Err(ApiError::NotFound));
}

#[tokio::test]
async fn create_user_posts_email_and_provider() {
    let transport = ScriptedTransport::default();
    transport.json(Method::Post, USERS_PATH, 201, &user_json("u1", "a@x.io"));
    let identity = FakeIdentity::signed_in("t");
    let api = ApiClient::new(config(), &transport, &identity);

    let body = NewUser { email: "a@x.io".to_owned(), provider: "google.com".to_owned() };
    api.create_user(&body).await.unwrap();

    let sent = transport.sent.borrow();
    let posted: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(posted, json!({ "email": "a@x.io", "provider": "google.com" }));
    assert_eq!(sent[0].header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn success_with_garbage_body_is_decode_error() {
    let transport = ScriptedTransport::default();
    transport.reply(
        Method::Get,
        "/exams/pcd",
        crate::test_helpers::Reply::Respond(Ok(crate::ApiResponse::new(200, "<html>"))),
    );
    let identity = FakeIdentity::signed_out();
    let api = ApiClient::new(config(), &transport, &identity);

    assert!(matches!(api.exam("pcd").await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let transport = ScriptedTransport::default();
    transport.reply(
        Method::Get,
        "/exams/pcd/sets",
        crate::test_helpers::Reply::Respond(Ok(crate::ApiResponse::new(500, "boom"))),
    );
    let identity = FakeIdentity::signed_out();
    let api = ApiClient::new(config(), &transport, &identity);

    assert_eq!(
        api.exam_sets("pcd").await,
        Err(ApiError::Status { status: 500, body: "boom".to_owned() })
    );
}

#[tokio::test]
async fn transport_failure_propagates() {
    let transport = ScriptedTransport::default();
    let identity = FakeIdentity::signed_out();
    let api = ApiClient::new(config(), &transport, &identity);

    assert!(matches!(api.exam_set_stats("pcd").await, Err(ApiError::Transport(_))));
    assert_eq!(transport.calls(Method::Get, "/exams/pcd/sets/stats"), 1);
}

#[tokio::test]
async fn get_value_returns_body_verbatim() {
    let body = json!([{ "examSetId": "set-1", "totalAttempts": 2, "extra": true }]);
    let transport = ScriptedTransport::default();
    transport.json(Method::Get, "/exams/pcd/sets/stats", 200, &body);
    let identity = FakeIdentity::signed_out();
    let api = ApiClient::new(config(), &transport, &identity);

    assert_eq!(api.get_value(&exam_set_stats_path("pcd")).await, Ok(body));
}
