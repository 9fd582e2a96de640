//! Route definitions for the RoomHub HTTP API.
//!
//! Routes are grouped by domain. Each group that needs protection is
//! wrapped in the guard middleware together with its [`RoutePolicy`];
//! everything else is public.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};

use roomhub_auth::RoutePolicy;

use crate::handlers;
use crate::middleware::auth::{GuardLayerState, authorize};
use crate::state::AppState;

/// Build the complete Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(booking_routes(&state))
        .merge(user_routes(&state))
        .merge(meeting_room_routes())
        .merge(statistic_routes())
        .route("/health", get(handlers::health::health))
        .with_state(state)
}

/// Attach the guard enforcing `policy` to every route in `routes`.
fn guarded(state: &AppState, policy: RoutePolicy, routes: Router<AppState>) -> Router<AppState> {
    routes.route_layer(axum_middleware::from_fn_with_state(
        GuardLayerState::new(state.clone(), policy),
        authorize,
    ))
}

/// Booking search, creation and lifecycle
fn booking_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/booking/list", get(handlers::booking::list))
        .route("/booking/apply/{id}", get(handlers::booking::apply))
        .route("/booking/reject/{id}", get(handlers::booking::reject))
        .route("/booking/unbind/{id}", get(handlers::booking::unbind))
        .route("/booking/urge/{id}", get(handlers::booking::urge));

    let login = Router::new().route("/booking/add", post(handlers::booking::add));

    public.merge(guarded(state, RoutePolicy::login(), login))
}

/// Accounts, captchas and tokens
fn user_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/user/register", post(handlers::user::register))
        .route(
            "/user/register-captcha",
            get(handlers::user::register_captcha),
        )
        .route("/user/login", post(handlers::user::login))
        .route("/user/admin/login", post(handlers::user::admin_login))
        .route("/user/refresh", get(handlers::user::refresh))
        .route("/user/admin/refresh", get(handlers::user::admin_refresh))
        .route(
            "/user/update_password/captcha",
            get(handlers::user::update_password_captcha),
        )
        .route(
            "/user/update_user/captcha",
            get(handlers::user::update_user_captcha),
        )
        .route("/user/freeze", get(handlers::user::freeze))
        .route("/user/list", get(handlers::user::list));

    let login = Router::new()
        .route("/user/info", get(handlers::user::info))
        .route(
            "/user/update_password",
            post(handlers::user::update_password),
        )
        .route(
            "/user/admin/update_password",
            post(handlers::user::update_password),
        )
        .route("/user/update", post(handlers::user::update))
        .route("/user/admin/update", post(handlers::user::update));

    public.merge(guarded(state, RoutePolicy::login(), login))
}

/// Meeting room inventory
fn meeting_room_routes() -> Router<AppState> {
    Router::new()
        .route("/meeting-room/list", get(handlers::meeting_room::list))
        .route("/meeting-room/create", post(handlers::meeting_room::create))
        .route("/meeting-room/update", put(handlers::meeting_room::update))
        .route(
            "/meeting-room/{id}",
            get(handlers::meeting_room::find).delete(handlers::meeting_room::delete),
        )
}

/// Usage statistics
fn statistic_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/statistic/userBookingCount",
            get(handlers::statistic::user_booking_count),
        )
        .route(
            "/statistic/meetingRoomUsedCounts",
            get(handlers::statistic::meeting_room_used_counts),
        )
}
