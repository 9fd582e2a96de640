//! Statistic handlers.

use axum::Json;
use axum::extract::{Query, State};

use roomhub_entity::statistic::{RoomUsageCount, UserBookingCount};

use crate::dto::request::StatisticQuery;
use crate::error::ApiResult;
use crate::extractors::time::parse_instant;
use crate::state::AppState;

/// GET /statistic/userBookingCount
pub async fn user_booking_count(
    State(state): State<AppState>,
    Query(query): Query<StatisticQuery>,
) -> ApiResult<Json<Vec<UserBookingCount>>> {
    let rows = state
        .statistic_service
        .user_booking_count(parse_instant(&query.start_time)?, parse_instant(&query.end_time)?)
        .await?;
    Ok(Json(rows))
}

/// GET /statistic/meetingRoomUsedCounts
pub async fn meeting_room_used_counts(
    State(state): State<AppState>,
    Query(query): Query<StatisticQuery>,
) -> ApiResult<Json<Vec<RoomUsageCount>>> {
    let rows = state
        .statistic_service
        .meeting_room_used_counts(parse_instant(&query.start_time)?, parse_instant(&query.end_time)?)
        .await?;
    Ok(Json(rows))
}
