//! Integration tests for booking creation, lifecycle, search and urging.

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::TestApp;

/// 2030-01-01T09:00:00Z in epoch milliseconds.
const NINE_AM: i64 = 1_893_488_400_000;
const HOUR: i64 = 60 * 60 * 1000;

fn booking(room_id: i64, start: i64, end: i64) -> Value {
    json!({
        "meetingRoomId": room_id,
        "startTime": start,
        "endTime": end,
        "note": "weekly sync",
    })
}

async fn setup() -> (TestApp, String, i64) {
    let app = TestApp::new().await;
    app.create_user("alice", "secret1", false).await;
    let token = app.access_token("alice", "secret1").await;
    let room = app.create_room("Everest").await;
    (app, token, room)
}

#[tokio::test]
async fn test_add_requires_login() {
    let (app, _, room) = setup().await;
    let response = app
        .request("POST", "/booking/add", Some(booking(room, NINE_AM, NINE_AM + HOUR)), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "please log in first");
}

#[tokio::test]
async fn test_add_and_conflict() {
    let (app, token, room) = setup().await;

    let created = app
        .request(
            "POST",
            "/booking/add",
            Some(booking(room, NINE_AM, NINE_AM + 2 * HOUR)),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{}", created.body);
    assert_eq!(created.body["status"], "pending");
    assert_eq!(created.body["roomId"], room);

    // Nested inside the first booking.
    let nested = app
        .request(
            "POST",
            "/booking/add",
            Some(booking(room, NINE_AM + HOUR / 2, NINE_AM + HOUR)),
            Some(&token),
        )
        .await;
    assert_eq!(nested.status, StatusCode::BAD_REQUEST);
    assert_eq!(nested.message(), "slot already booked");

    // Back-to-back is free.
    let adjacent = app
        .request(
            "POST",
            "/booking/add",
            Some(booking(room, NINE_AM + 2 * HOUR, NINE_AM + 3 * HOUR)),
            Some(&token),
        )
        .await;
    assert_eq!(adjacent.status, StatusCode::OK, "{}", adjacent.body);
}

#[tokio::test]
async fn test_add_validation() {
    let (app, token, room) = setup().await;

    let inverted = app
        .request(
            "POST",
            "/booking/add",
            Some(booking(room, NINE_AM + HOUR, NINE_AM)),
            Some(&token),
        )
        .await;
    assert_eq!(inverted.status, StatusCode::BAD_REQUEST);
    assert_eq!(inverted.message(), "start time must be before end time");

    let missing_room = app
        .request(
            "POST",
            "/booking/add",
            Some(booking(room + 100, NINE_AM, NINE_AM + HOUR)),
            Some(&token),
        )
        .await;
    assert_eq!(missing_room.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_room.message(), "meeting room does not exist");
}

#[tokio::test]
async fn test_unbind_frees_the_slot() {
    let (app, token, room) = setup().await;
    let first = app
        .request(
            "POST",
            "/booking/add",
            Some(booking(room, NINE_AM, NINE_AM + HOUR)),
            Some(&token),
        )
        .await;
    let id = first.body["id"].as_i64().expect("booking id");

    let applied = app
        .request("GET", &format!("/booking/apply/{id}"), None, None)
        .await;
    assert_eq!(applied.message(), "success");

    let blocked = app
        .request(
            "POST",
            "/booking/add",
            Some(booking(room, NINE_AM, NINE_AM + HOUR)),
            Some(&token),
        )
        .await;
    assert_eq!(blocked.status, StatusCode::BAD_REQUEST);

    let unbound = app
        .request("GET", &format!("/booking/unbind/{id}"), None, None)
        .await;
    assert_eq!(unbound.message(), "success");

    let rebooked = app
        .request(
            "POST",
            "/booking/add",
            Some(booking(room, NINE_AM, NINE_AM + HOUR)),
            Some(&token),
        )
        .await;
    assert_eq!(rebooked.status, StatusCode::OK, "{}", rebooked.body);
}

#[tokio::test]
async fn test_status_change_on_unknown_booking_succeeds() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/booking/reject/9999", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "success");
}

#[tokio::test]
async fn test_list_filters() {
    let (app, token, room) = setup().await;
    let other_room = app.create_room("Kilimanjaro").await;

    app.request(
        "POST",
        "/booking/add",
        Some(booking(room, NINE_AM, NINE_AM + HOUR)),
        Some(&token),
    )
    .await;
    app.request(
        "POST",
        "/booking/add",
        Some(booking(other_room, NINE_AM + 4 * HOUR, NINE_AM + 5 * HOUR)),
        Some(&token),
    )
    .await;

    let all = app.request("GET", "/booking/list", None, None).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["totalCount"], 2);

    let by_room = app
        .request("GET", "/booking/list?meetingRoomName=kili", None, None)
        .await;
    assert_eq!(by_room.body["totalCount"], 1);
    assert_eq!(by_room.body["items"][0]["room"]["name"], "Kilimanjaro");
    assert_eq!(by_room.body["items"][0]["user"]["username"], "alice");

    // Only a start: the default window covers the first booking only.
    let windowed = app
        .request(
            "GET",
            &format!("/booking/list?bookingTimeRangeStart={NINE_AM}"),
            None,
            None,
        )
        .await;
    assert_eq!(windowed.body["totalCount"], 1);
    assert_eq!(windowed.body["items"][0]["room"]["name"], "Everest");

    let inverted = app
        .request(
            "GET",
            &format!(
                "/booking/list?bookingTimeRangeStart={}&bookingTimeRangeEnd={NINE_AM}",
                NINE_AM + HOUR
            ),
            None,
            None,
        )
        .await;
    assert_eq!(inverted.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_zero_range_start_means_no_filter() {
    let (app, token, room) = setup().await;
    app.request(
        "POST",
        "/booking/add",
        Some(booking(room, NINE_AM, NINE_AM + HOUR)),
        Some(&token),
    )
    .await;

    let response = app
        .request(
            "GET",
            "/booking/list?bookingTimeRangeStart=0&bookingTimeRangeEnd=0",
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalCount"], 1);
}

#[tokio::test]
async fn test_list_rejects_out_of_range_page() {
    let app = TestApp::new().await;

    for path in [
        "/booking/list?pageNo=9223372036854775807&pageSize=10",
        "/meeting-room/list?pageNo=9223372036854775807&pageSize=10",
    ] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(response.message(), "pageNo is too large");
    }
}

#[tokio::test]
async fn test_urge_notifies_admin_once_per_interval() {
    let (app, token, room) = setup().await;
    app.create_user("root", "secret1", true).await;

    let created = app
        .request(
            "POST",
            "/booking/add",
            Some(booking(room, NINE_AM, NINE_AM + HOUR)),
            Some(&token),
        )
        .await;
    let id = created.body["id"].as_i64().expect("booking id");

    let first = app
        .request("GET", &format!("/booking/urge/{id}"), None, None)
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.message(), "urge sent");

    let mail = app
        .mailer
        .last_to("root@example.com")
        .await
        .expect("urge mail");
    assert_eq!(mail.subject, "booking urge reminder");

    let second = app
        .request("GET", &format!("/booking/urge/{id}"), None, None)
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(
        second.message(),
        format!(
            "you can only urge once every {} minutes",
            app.config.booking.urge_interval_minutes
        )
    );
    assert_eq!(app.mailer.sent().await.len(), 1);
}

#[tokio::test]
async fn test_urge_without_admin() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/booking/urge/1", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "no admin account to notify");
}
