//! Booking handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use roomhub_core::error::AppError;
use roomhub_core::types::{PageRequest, PageResponse};
use roomhub_entity::booking::{Booking, BookingDetail};
use roomhub_service::booking::BookingFilter;

use crate::dto::request::{AddBookingRequest, BookingListQuery};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::time::from_millis;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// Parse an epoch-millisecond filter. `0` counts as absent.
fn millis_param(name: &str, value: Option<i64>) -> Result<Option<chrono::DateTime<chrono::Utc>>, AppError> {
    value
        .filter(|ms| *ms != 0)
        .map(|ms| from_millis(ms).ok_or_else(|| AppError::validation(format!("{name} is invalid"))))
        .transpose()
}

/// GET /booking/list
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> ApiResult<Json<PageResponse<BookingDetail>>> {
    let page = PageRequest::from_params(
        query.page_no,
        query.page_size,
        state.config.booking.max_page_size,
    )?;

    let filter = BookingFilter {
        username: query.username,
        room_name: query.meeting_room_name,
        room_location: query.meeting_room_position,
        range_start: millis_param("bookingTimeRangeStart", query.booking_time_range_start)?,
        range_end: millis_param("bookingTimeRangeEnd", query.booking_time_range_end)?,
    };

    Ok(Json(state.booking_service.find(filter, page).await?))
}

/// POST /booking/add
pub async fn add(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<AddBookingRequest>,
) -> ApiResult<Json<Booking>> {
    Ok(Json(state.booking_service.add(&auth, req.into()).await?))
}

/// GET /booking/apply/{id}
pub async fn apply(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let message = state.booking_service.apply(id).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// GET /booking/reject/{id}
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let message = state.booking_service.reject(id).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// GET /booking/unbind/{id}
pub async fn unbind(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let message = state.booking_service.unbind(id).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// GET /booking/urge/{id}
pub async fn urge(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let message = state.booking_service.urge(id).await?;
    Ok(Json(MessageResponse::new(message)))
}
