//! Meeting room handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use roomhub_core::types::{PageRequest, PageResponse};
use roomhub_entity::meeting_room::{MeetingRoom, MeetingRoomQuery};

use crate::dto::request::{CreateMeetingRoomRequest, MeetingRoomListQuery, UpdateMeetingRoomRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /meeting-room/list
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<MeetingRoomListQuery>,
) -> ApiResult<Json<PageResponse<MeetingRoom>>> {
    let page = PageRequest::from_params(
        query.page_no,
        query.page_size,
        state.config.booking.max_page_size,
    )?;
    let rooms = state
        .meeting_room_service
        .list(&MeetingRoomQuery {
            name: query.name,
            capacity: query.capacity,
            equipment: query.equipment,
            page,
        })
        .await?;
    Ok(Json(rooms))
}

/// POST /meeting-room/create
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateMeetingRoomRequest>,
) -> ApiResult<Json<MeetingRoom>> {
    Ok(Json(state.meeting_room_service.create(&req.into()).await?))
}

/// PUT /meeting-room/update
pub async fn update(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<UpdateMeetingRoomRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let message = state.meeting_room_service.update(&req.into()).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// GET /meeting-room/{id}
pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MeetingRoom>> {
    Ok(Json(state.meeting_room_service.find_by_id(id).await?))
}

/// DELETE /meeting-room/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let message = state.meeting_room_service.delete(id).await?;
    Ok(Json(MessageResponse::new(message)))
}
