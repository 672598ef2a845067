//! Favorites flow integration tests
//!
//! Tests the favorites endpoints end to end:
//! - Listing, adding, and removing country codes
//! - Set semantics (no duplicates, exact membership errors)
//! - Authorization on every operation

mod common;

use axum::http::{header, StatusCode};
use axum_test::TestServer;
use common::*;

async fn server_with_user() -> (TestServer, String) {
    let server = create_test_server().await;
    let token = register_user(&server, "favuser", "fav@example.com").await;
    (server, token)
}

async fn add_code(server: &TestServer, token: &str, code: &str) -> axum_test::TestResponse {
    server
        .post("/api/favorites")
        .add_header(header::AUTHORIZATION, bearer(token))
        .json(&serde_json::json!({ "countryCode": code }))
        .await
}

async fn list_codes(server: &TestServer, token: &str) -> serde_json::Value {
    server
        .get("/api/favorites")
        .add_header(header::AUTHORIZATION, bearer(token))
        .await
        .json()
}

/// Test 1: adding a country to an empty list returns it
#[tokio::test]
async fn test_add_favorite() {
    let (server, token) = server_with_user().await;

    let response = add_code(&server, &token, "USA").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], serde_json::json!(["USA"]));
}

/// Test 2: adding the same code twice fails the second time, and the code is
/// stored exactly once
#[tokio::test]
async fn test_add_duplicate_favorite() {
    let (server, token) = server_with_user().await;

    add_code(&server, &token, "CAN").await.assert_status_ok();

    let response = add_code(&server, &token, "CAN").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Country already in favorites");

    let list = list_codes(&server, &token).await;
    assert_eq!(list["data"], serde_json::json!(["CAN"]));
}

/// Test 3: adding with an empty country code is a 400
#[tokio::test]
async fn test_add_favorite_missing_code() {
    let (server, token) = server_with_user().await;

    let response = server
        .post("/api/favorites")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&serde_json::json!({}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Please provide a country code");
}

/// Test 4: listing returns the stored codes in insertion order
#[tokio::test]
async fn test_list_favorites() {
    let (server, token) = server_with_user().await;

    for code in ["GBR", "JPN"] {
        add_code(&server, &token, code).await.assert_status_ok();
    }

    let response = server
        .get("/api/favorites")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], serde_json::json!(["GBR", "JPN"]));
}

/// Test 5: a fresh identity has an empty favorites list
#[tokio::test]
async fn test_list_favorites_empty() {
    let (server, token) = server_with_user().await;

    let list = list_codes(&server, &token).await;
    assert_eq!(list["success"], true);
    assert_eq!(list["data"], serde_json::json!([]));
}

/// Test 6: removing a present code returns the remaining sequence in order
#[tokio::test]
async fn test_remove_favorite() {
    let (server, token) = server_with_user().await;

    for code in ["DEU", "ITA"] {
        add_code(&server, &token, code).await.assert_status_ok();
    }

    let response = server
        .delete("/api/favorites/DEU")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], serde_json::json!(["ITA"]));
}

/// Test 7: removing an absent code fails and leaves the list unchanged
#[tokio::test]
async fn test_remove_absent_favorite() {
    let (server, token) = server_with_user().await;

    add_code(&server, &token, "BRA").await.assert_status_ok();

    let response = server
        .delete("/api/favorites/XXX")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Country not in favorites");

    let list = list_codes(&server, &token).await;
    assert_eq!(list["data"], serde_json::json!(["BRA"]));
}

/// Test 8: every favorites endpoint rejects unauthenticated requests
#[tokio::test]
async fn test_favorites_require_authentication() {
    let server = create_test_server().await;

    let responses = [
        server.get("/api/favorites").await,
        server
            .post("/api/favorites")
            .json(&serde_json::json!({"countryCode": "FRA"}))
            .await,
        server.delete("/api/favorites/AUS").await,
    ];

    for response in responses {
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }
}

/// Test 9: favorites are scoped to the authenticated identity
#[tokio::test]
async fn test_favorites_are_per_user() {
    let server = create_test_server().await;
    let alice = register_user(&server, "alice", "alice@example.com").await;
    let bob = register_user(&server, "bob", "bob@example.com").await;

    add_code(&server, &alice, "USA").await.assert_status_ok();

    let bob_list = list_codes(&server, &bob).await;
    assert_eq!(bob_list["data"], serde_json::json!([]));
}

/// Test 10: no sequence of adds and removes ever produces a duplicate
#[tokio::test]
async fn test_set_invariant_over_operation_sequence() {
    let (server, token) = server_with_user().await;

    let operations = [
        ("add", "USA"),
        ("add", "CAN"),
        ("add", "USA"), // rejected duplicate
        ("remove", "CAN"),
        ("add", "CAN"),
        ("add", "CAN"), // rejected duplicate
        ("remove", "USA"),
        ("add", "USA"),
    ];

    for (op, code) in operations {
        if op == "add" {
            let _ = add_code(&server, &token, code).await;
        } else {
            let _ = server
                .delete(&format!("/api/favorites/{}", code))
                .add_header(header::AUTHORIZATION, bearer(&token))
                .await;
        }

        // The invariant must hold after every operation
        let list = list_codes(&server, &token).await;
        let codes: Vec<String> = list["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        let mut deduped = codes.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(
            codes.len(),
            deduped.len(),
            "favorites must stay duplicate-free"
        );
    }

    let list = list_codes(&server, &token).await;
    assert_eq!(list["data"], serde_json::json!(["CAN", "USA"]));
}
