//! Integration tests for the usage statistics.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

/// 2030-01-01T09:00:00Z in epoch milliseconds.
const NINE_AM: i64 = 1_893_488_400_000;
const HOUR: i64 = 60 * 60 * 1000;

#[tokio::test]
async fn test_counts_within_window() {
    let app = TestApp::new().await;
    app.create_user("alice", "secret1", false).await;
    let token = app.access_token("alice", "secret1").await;
    let room = app.create_room("Everest").await;

    for offset in [0, 2] {
        let response = app
            .request(
                "POST",
                "/booking/add",
                Some(json!({
                    "meetingRoomId": room,
                    "startTime": NINE_AM + offset * HOUR,
                    "endTime": NINE_AM + (offset + 1) * HOUR,
                })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    }

    let users = app
        .request(
            "GET",
            "/statistic/userBookingCount?startTime=2030-01-01&endTime=2030-01-02",
            None,
            None,
        )
        .await;
    assert_eq!(users.status, StatusCode::OK);
    assert_eq!(users.body[0]["username"], "alice");
    assert_eq!(users.body[0]["bookingCount"], 2);

    let rooms = app
        .request(
            "GET",
            &format!(
                "/statistic/meetingRoomUsedCounts?startTime={NINE_AM}&endTime={}",
                NINE_AM + HOUR
            ),
            None,
            None,
        )
        .await;
    assert_eq!(rooms.status, StatusCode::OK);
    assert_eq!(rooms.body[0]["meetingRoomName"], "Everest");
    assert_eq!(rooms.body[0]["usedCount"], 1);
}

#[tokio::test]
async fn test_invalid_window() {
    let app = TestApp::new().await;

    let unparsable = app
        .request(
            "GET",
            "/statistic/userBookingCount?startTime=yesterday&endTime=2030-01-02",
            None,
            None,
        )
        .await;
    assert_eq!(unparsable.status, StatusCode::BAD_REQUEST);

    let inverted = app
        .request(
            "GET",
            "/statistic/meetingRoomUsedCounts?startTime=2030-01-02&endTime=2030-01-01",
            None,
            None,
        )
        .await;
    assert_eq!(inverted.status, StatusCode::BAD_REQUEST);
}
