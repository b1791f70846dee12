//! HTTP contract tests for the guestbook endpoints.
//!
//! Every test boots its own server over an in-memory store.

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use guestbook_core::{EntryId, GuestbookEntry};
use guestbook_integration_tests::{MODERATOR_SECRET, TestServer};
use guestbook_server::db::{EntryStore, MemoryEntryStore};

fn fixture(n: u128, name: &str, timestamp: i64) -> GuestbookEntry {
    GuestbookEntry {
        id: EntryId::new(Uuid::from_u128(n)),
        name: name.to_string(),
        message: format!("{name}의 축하 메시지"),
        created_at: DateTime::<Utc>::from_timestamp(timestamp, 0).expect("valid timestamp"),
    }
}

async fn list(client: &Client, server: &TestServer) -> Vec<Value> {
    let resp = client
        .get(server.url("/guestbook"))
        .send()
        .await
        .expect("Failed to list entries");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse list body");
    body["entries"]
        .as_array()
        .cloned()
        .expect("entries should be an array")
}

async fn create(client: &Client, server: &TestServer, body: &Value) -> reqwest::Response {
    client
        .post(server.url("/guestbook"))
        .json(body)
        .send()
        .await
        .expect("Failed to create entry")
}

async fn delete(client: &Client, server: &TestServer, id: &str, password: &str) -> reqwest::Response {
    client
        .delete(server.url(&format!("/guestbook/{id}")))
        .json(&json!({ "password": password }))
        .send()
        .await
        .expect("Failed to delete entry")
}

async fn error_text(resp: reqwest::Response) -> String {
    let body: Value = resp.json().await.expect("Failed to parse error body");
    body["error"]
        .as_str()
        .map(str::to_string)
        .expect("error body should carry an error string")
}

// ============================================================================
// List & Create
// ============================================================================

#[tokio::test]
async fn test_empty_guestbook_lists_nothing() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    assert!(list(&client, &server).await.is_empty());
}

#[tokio::test]
async fn test_create_then_list_shows_entry_first() {
    let server = TestServer::spawn_with(MemoryEntryStore::with_entries([fixture(
        1,
        "이미라",
        1_745_250_300,
    )]))
    .await;
    let client = Client::new();

    let resp = create(
        &client,
        &server,
        &json!({ "name": "김영수", "message": "축하합니다" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Failed to parse create body");
    assert_eq!(body["entry"]["name"], "김영수");
    assert_eq!(body["entry"]["message"], "축하합니다");
    assert!(body["entry"]["id"].as_str().is_some());
    assert!(body["entry"]["createdAt"].as_str().is_some());
    assert_eq!(body["deleteToken"].as_str().map(str::len), Some(43));

    let entries = list(&client, &server).await;
    assert_eq!(entries.len(), 2);
    let first = entries.first().expect("at least one entry");
    assert_eq!(first["name"], "김영수");
    assert_eq!(first["message"], "축하합니다");
    assert!(first.get("deleteToken").is_none());
}

#[tokio::test]
async fn test_entries_are_stored_verbatim() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = create(
        &client,
        &server,
        &json!({ "name": "  Guest ", "message": "line one\nline two " }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let entries = list(&client, &server).await;
    let first = entries.first().expect("entry was created");
    assert_eq!(first["name"], "  Guest ");
    assert_eq!(first["message"], "line one\nline two ");
}

#[tokio::test]
async fn test_blank_fields_are_rejected_without_storing() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    for body in [
        json!({ "name": "", "message": "message" }),
        json!({ "name": "guest", "message": "   " }),
        json!({ "message": "no name" }),
        json!({}),
    ] {
        let resp = create(&client, &server, &body).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(error_text(resp).await, "Name and message are required.");
    }

    assert!(server.store().is_empty().await);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = client
        .post(server.url("/guestbook"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to send malformed body");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_text(resp).await, "Name and message are required.");
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_with_own_token() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let body: Value = create(&client, &server, &json!({ "name": "a", "message": "b" }))
        .await
        .json()
        .await
        .expect("Failed to parse create body");
    let id = body["entry"]["id"].as_str().expect("id").to_string();
    let token = body["deleteToken"].as_str().expect("token").to_string();

    let resp = delete(&client, &server, &id, &token).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse delete body");
    assert_eq!(body["message"], "Guestbook message deleted.");

    assert!(list(&client, &server).await.is_empty());
}

#[tokio::test]
async fn test_token_only_deletes_its_own_entry() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let first: Value = create(&client, &server, &json!({ "name": "a", "message": "1" }))
        .await
        .json()
        .await
        .expect("Failed to parse create body");
    let second: Value = create(&client, &server, &json!({ "name": "b", "message": "2" }))
        .await
        .json()
        .await
        .expect("Failed to parse create body");

    let resp = delete(
        &client,
        &server,
        second["entry"]["id"].as_str().expect("id"),
        first["deleteToken"].as_str().expect("token"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(list(&client, &server).await.len(), 2);
}

#[tokio::test]
async fn test_moderator_deletes_seeded_entry() {
    let older = fixture(1, "김영수", 1_745_152_200);
    let newer = fixture(2, "이미라", 1_745_250_300);
    let server =
        TestServer::spawn_with(MemoryEntryStore::with_entries([older.clone(), newer.clone()]))
            .await;
    let client = Client::new();

    let entries = list(&client, &server).await;
    let ids: Vec<&str> = entries.iter().filter_map(|e| e["id"].as_str()).collect();
    assert_eq!(ids, vec![newer.id.to_string(), older.id.to_string()]);

    let resp = delete(&client, &server, &older.id.to_string(), MODERATOR_SECRET).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let entries = list(&client, &server).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries.first().expect("one entry")["id"], newer.id.to_string());
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized_and_keeps_entry() {
    let entry = fixture(1, "김영수", 1_745_152_200);
    let server = TestServer::spawn_with(MemoryEntryStore::with_entries([entry.clone()])).await;
    let client = Client::new();

    let resp = delete(&client, &server, &entry.id.to_string(), "wrong").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_text(resp).await, "The password does not match.");

    // Missing body is an empty password
    let resp = client
        .delete(server.url(&format!("/guestbook/{}", entry.id)))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(list(&client, &server).await.len(), 1);
}

#[tokio::test]
async fn test_missing_entry_is_not_found() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = delete(&client, &server, &Uuid::new_v4().to_string(), MODERATOR_SECRET).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_text(resp).await, "This message no longer exists.");

    let resp = delete(&client, &server, "not-a-uuid", MODERATOR_SECRET).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_password_on_unknown_entry_is_unauthorized() {
    let entry = fixture(1, "김영수", 1_745_152_200);
    let server = TestServer::spawn_with(MemoryEntryStore::with_entries([entry])).await;
    let client = Client::new();

    for id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let resp = delete(&client, &server, &id, "wrong").await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "id: {id}");
        assert_eq!(error_text(resp).await, "The password does not match.");
    }

    assert_eq!(list(&client, &server).await.len(), 1);
}

#[tokio::test]
async fn test_second_delete_is_not_found() {
    let entry = fixture(1, "김영수", 1_745_152_200);
    let server = TestServer::spawn_with(MemoryEntryStore::with_entries([entry.clone()])).await;
    let client = Client::new();
    let id = entry.id.to_string();

    let first = delete(&client, &server, &id, MODERATOR_SECRET).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = delete(&client, &server, &id, MODERATOR_SECRET).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    assert!(list(&client, &server).await.is_empty());
}

// ============================================================================
// Store failures & health
// ============================================================================

#[tokio::test]
async fn test_closed_store_reports_operation_specific_errors() {
    let server = TestServer::spawn().await;
    let client = Client::new();
    server.store().close().await;

    let resp = client
        .get(server.url("/guestbook"))
        .send()
        .await
        .expect("Failed to list entries");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_text(resp).await, "Failed to load guestbook messages.");

    let resp = create(&client, &server, &json!({ "name": "a", "message": "b" })).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_text(resp).await, "Failed to save your message.");

    let resp = delete(&client, &server, &Uuid::new_v4().to_string(), MODERATOR_SECRET).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_text(resp).await, "Failed to delete the message.");
}

#[tokio::test]
async fn test_health_endpoints() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = client
        .get(server.url("/health"))
        .send()
        .await
        .expect("Failed to call health");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");

    let ready = |c: &Client| c.get(server.url("/health/ready")).send();
    assert_eq!(
        ready(&client).await.expect("Failed to call ready").status(),
        StatusCode::OK
    );

    server.store().close().await;
    assert_eq!(
        ready(&client).await.expect("Failed to call ready").status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_request_id_is_echoed_or_generated() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = client
        .get(server.url("/guestbook"))
        .header("x-request-id", "invite-42")
        .send()
        .await
        .expect("Failed to list entries");
    assert_eq!(
        resp.headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("invite-42")
    );

    let resp = client
        .get(server.url("/guestbook"))
        .send()
        .await
        .expect("Failed to list entries");
    let generated = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("request id header");
    assert!(Uuid::parse_str(generated).is_ok());
}
