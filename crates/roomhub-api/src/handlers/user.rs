//! User handlers: registration, captchas, login, refresh, profile and
//! account management.

use axum::Json;
use axum::extract::{Query, State};

use roomhub_auth::{LoginResult, TokenPair};
use roomhub_core::types::{PageRequest, PageResponse};
use roomhub_entity::user::{UserDetail, UserQuery};
use roomhub_service::CaptchaKind;

use crate::dto::request::{
    AddressQuery, FreezeQuery, LoginRequest, RefreshQuery, RegisterRequest, UpdatePasswordRequest,
    UpdateUserRequest, UserListQuery,
};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::validated::check;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /user/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let message = state.user_service.register(&req.into()).await?;
    Ok(Json(MessageResponse::new(message)))
}

async fn send_captcha(
    state: &AppState,
    kind: CaptchaKind,
    query: &AddressQuery,
) -> ApiResult<Json<MessageResponse>> {
    check(query)?;
    let message = state.captcha_service.send(kind, &query.address).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// GET /user/register-captcha?address=
pub async fn register_captcha(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> ApiResult<Json<MessageResponse>> {
    send_captcha(&state, CaptchaKind::Register, &query).await
}

/// GET /user/update_password/captcha?address=
pub async fn update_password_captcha(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> ApiResult<Json<MessageResponse>> {
    send_captcha(&state, CaptchaKind::UpdatePassword, &query).await
}

/// GET /user/update_user/captcha?address=
pub async fn update_user_captcha(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> ApiResult<Json<MessageResponse>> {
    send_captcha(&state, CaptchaKind::UpdateUser, &query).await
}

/// POST /user/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResult>> {
    let result = state
        .user_service
        .login(&req.username, &req.password, false)
        .await?;
    Ok(Json(result))
}

/// POST /user/admin/login
pub async fn admin_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResult>> {
    let result = state
        .user_service
        .login(&req.username, &req.password, true)
        .await?;
    Ok(Json(result))
}

/// GET /user/refresh?refreshToken=
pub async fn refresh(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> ApiResult<Json<TokenPair>> {
    let tokens = state
        .user_service
        .refresh(&query.refresh_token, false)
        .await?;
    Ok(Json(tokens))
}

/// GET /user/admin/refresh?refreshToken=
pub async fn admin_refresh(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> ApiResult<Json<TokenPair>> {
    let tokens = state
        .user_service
        .refresh(&query.refresh_token, true)
        .await?;
    Ok(Json(tokens))
}

/// GET /user/info
pub async fn info(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserDetail>> {
    Ok(Json(state.user_service.info(&auth).await?))
}

/// POST /user/update_password and /user/admin/update_password
pub async fn update_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdatePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let message = state
        .user_service
        .update_password(&auth, &req.into())
        .await?;
    Ok(Json(MessageResponse::new(message)))
}

/// POST /user/update and /user/admin/update
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let message = state.user_service.update(&auth, &req.into()).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// GET /user/freeze?id=
pub async fn freeze(
    State(state): State<AppState>,
    Query(query): Query<FreezeQuery>,
) -> ApiResult<Json<MessageResponse>> {
    let message = state.user_service.freeze(query.id).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// GET /user/list
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> ApiResult<Json<PageResponse<UserDetail>>> {
    let page = PageRequest::from_params(
        query.page_no,
        query.page_size,
        state.config.booking.max_page_size,
    )?;
    let users = state
        .user_service
        .list(&UserQuery {
            username: query.username,
            nick_name: query.nick_name,
            email: query.email,
            page,
        })
        .await?;
    Ok(Json(users))
}
