//! Integration tests for the meeting room inventory.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_room_lifecycle() {
    let app = TestApp::new().await;
    let id = app.create_room("Everest").await;

    let found = app
        .request("GET", &format!("/meeting-room/{id}"), None, None)
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["name"], "Everest");
    assert_eq!(found.body["location"], "Floor 3");

    let updated = app
        .request(
            "PUT",
            "/meeting-room/update",
            Some(json!({
                "id": id,
                "name": "Everest",
                "capacity": 20,
                "location": "Floor 4",
                "equipment": "whiteboard",
            })),
            None,
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.body);
    assert_eq!(updated.message(), "success");

    let found = app
        .request("GET", &format!("/meeting-room/{id}"), None, None)
        .await;
    assert_eq!(found.body["capacity"], 20);
    assert_eq!(found.body["location"], "Floor 4");

    let deleted = app
        .request("DELETE", &format!("/meeting-room/{id}"), None, None)
        .await;
    assert_eq!(deleted.message(), "success");

    let gone = app
        .request("GET", &format!("/meeting-room/{id}"), None, None)
        .await;
    assert_eq!(gone.status, StatusCode::BAD_REQUEST);
    assert_eq!(gone.message(), "meeting room does not exist");
}

#[tokio::test]
async fn test_duplicate_room_name() {
    let app = TestApp::new().await;
    app.create_room("Everest").await;

    let duplicate = app
        .request(
            "POST",
            "/meeting-room/create",
            Some(json!({ "name": "Everest", "capacity": 4, "location": "Annex" })),
            None,
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.message(), "meeting room name already exists");
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/meeting-room/create",
            Some(json!({ "name": "", "capacity": 0, "location": "Annex" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_missing_room() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "PUT",
            "/meeting-room/update",
            Some(json!({ "id": 42, "name": "Ghost", "capacity": 2, "location": "Nowhere" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "meeting room does not exist");
}

#[tokio::test]
async fn test_list_pages_and_filters() {
    let app = TestApp::new().await;
    for name in ["Alpha", "Beta", "Gamma"] {
        app.create_room(name).await;
    }

    let page = app
        .request("GET", "/meeting-room/list?pageNo=2&pageSize=2", None, None)
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["totalCount"], 3);
    assert_eq!(page.body["items"].as_array().map(Vec::len), Some(1));

    let named = app
        .request("GET", "/meeting-room/list?name=amm", None, None)
        .await;
    assert_eq!(named.body["totalCount"], 1);
    assert_eq!(named.body["items"][0]["name"], "Gamma");

    let oversized = app
        .request("GET", "/meeting-room/list?pageSize=1000", None, None)
        .await;
    assert_eq!(oversized.status, StatusCode::BAD_REQUEST);
}
