//! Integration tests for registration, login, refresh and the route guard.

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router, middleware};
use chrono::Duration;
use serde_json::json;

use roomhub_api::AppState;
use roomhub_api::middleware::auth::{GuardLayerState, authorize};
use roomhub_auth::{JwtEncoder, PasswordHasher, RoutePolicy};
use roomhub_database::UserStore;
use roomhub_entity::user::UserInfo;

use crate::helpers::{JWT_SECRET, TestApp};

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new().await;

    let sent = app
        .request("GET", "/user/register-captcha?address=alice@example.com", None, None)
        .await;
    assert_eq!(sent.status, StatusCode::OK);
    assert_eq!(sent.message(), "sent");

    let captcha = app.captcha_for("alice@example.com").await;
    assert_eq!(captcha.len(), 6);

    let registered = app
        .request(
            "POST",
            "/user/register",
            Some(json!({
                "username": "alice",
                "nickName": "Alice",
                "password": "secret1",
                "email": "alice@example.com",
                "captcha": captcha,
            })),
            None,
        )
        .await;
    assert_eq!(registered.status, StatusCode::OK, "{}", registered.body);
    assert_eq!(registered.message(), "registered");

    let body = app.login("alice", "secret1").await;
    assert_eq!(body["userInfo"]["username"], "alice");
    assert!(body["accessToken"].as_str().is_some());
    assert!(body["refreshToken"].as_str().is_some());

    // The captcha survives, so a replay hits the username check.
    let again = app
        .request(
            "POST",
            "/user/register",
            Some(json!({
                "username": "alice",
                "nickName": "Alice",
                "password": "secret1",
                "email": "alice@example.com",
                "captcha": captcha,
            })),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.message(), "username already exists");
}

#[tokio::test]
async fn test_register_captcha_checks() {
    let app = TestApp::new().await;
    let form = |captcha: &str| {
        json!({
            "username": "bob",
            "nickName": "Bob",
            "password": "secret1",
            "email": "bob@example.com",
            "captcha": captcha,
        })
    };

    let expired = app
        .request("POST", "/user/register", Some(form("123456")), None)
        .await;
    assert_eq!(expired.status, StatusCode::BAD_REQUEST);
    assert_eq!(expired.message(), "captcha expired");

    app.request("GET", "/user/register-captcha?address=bob@example.com", None, None)
        .await;
    let code = app.captcha_for("bob@example.com").await;
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let incorrect = app
        .request("POST", "/user/register", Some(form(wrong)), None)
        .await;
    assert_eq!(incorrect.status, StatusCode::BAD_REQUEST);
    assert_eq!(incorrect.message(), "captcha incorrect");
}

#[tokio::test]
async fn test_captcha_rejects_bad_address() {
    let app = TestApp::new().await;
    let response = app
        .request("GET", "/user/register-captcha?address=not-an-email", None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.mailer.sent().await.is_empty());
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::new().await;
    app.create_user("carol", "secret1", false).await;

    let wrong = app
        .request(
            "POST",
            "/user/login",
            Some(json!({ "username": "carol", "password": "nope" })),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.message(), "incorrect password");

    // Regular accounts do not exist in the admin partition.
    let admin = app
        .request(
            "POST",
            "/user/admin/login",
            Some(json!({ "username": "carol", "password": "secret1" })),
            None,
        )
        .await;
    assert_eq!(admin.status, StatusCode::UNAUTHORIZED);
    assert_eq!(admin.message(), "user does not exist");
}

#[tokio::test]
async fn test_admin_login_carries_permissions() {
    let app = TestApp::new().await;
    let admin = app.create_user("root", "secret1", true).await;
    app.grant(&admin, "admin", &["ccc", "ddd"]).await;

    let response = app
        .request(
            "POST",
            "/user/admin/login",
            Some(json!({ "username": "root", "password": "secret1" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["userInfo"]["isAdmin"], true);
    assert_eq!(response.body["userInfo"]["roles"], json!(["admin"]));
}

#[tokio::test]
async fn test_frozen_account_cannot_login() {
    let app = TestApp::new().await;
    let user = app.create_user("dave", "secret1", false).await;

    let frozen = app
        .request("GET", &format!("/user/freeze?id={}", user.id), None, None)
        .await;
    assert_eq!(frozen.status, StatusCode::OK);
    assert_eq!(frozen.message(), "success");

    let login = app
        .request(
            "POST",
            "/user/login",
            Some(json!({ "username": "dave", "password": "secret1" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
    assert_eq!(login.message(), "account is frozen");
}

#[tokio::test]
async fn test_guarded_route_requires_login() {
    let app = TestApp::new().await;
    app.create_user("erin", "secret1", false).await;

    let anonymous = app.request("GET", "/user/info", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.message(), "please log in first");

    let forged = app.request("GET", "/user/info", None, Some("garbage")).await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
    assert_eq!(forged.message(), "token invalid, please log in again");

    let token = app.access_token("erin", "secret1").await;
    let info = app.request("GET", "/user/info", None, Some(&token)).await;
    assert_eq!(info.status, StatusCode::OK);
    assert_eq!(info.body["username"], "erin");
    assert_eq!(info.body["email"], "erin@example.com");
}

#[tokio::test]
async fn test_permission_guarded_route() {
    let mut app = TestApp::new().await;
    let routes: Router<AppState> = Router::new()
        .route("/bbb", get(|| async { Json(json!({ "message": "bbb" })) }))
        .route_layer(middleware::from_fn_with_state(
            GuardLayerState::new(app.state.clone(), RoutePolicy::permissions(["ccc"])),
            authorize,
        ));
    app.mount(routes);

    let granted = app.create_user("frank", "secret1", false).await;
    app.grant(&granted, "auditor", &["ccc"]).await;
    app.create_user("gina", "secret1", false).await;

    let anonymous = app.request("GET", "/bbb", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let token = app.access_token("gina", "secret1").await;
    let denied = app.request("GET", "/bbb", None, Some(&token)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.message(), "insufficient permissions");

    let token = app.access_token("frank", "secret1").await;
    let allowed = app.request("GET", "/bbb", None, Some(&token)).await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(allowed.message(), "bbb");
}

#[tokio::test]
async fn test_refresh_endpoint() {
    let app = TestApp::new().await;
    app.create_user("frank", "secret1", false).await;
    let body = app.login("frank", "secret1").await;
    let refresh_token = body["refreshToken"].as_str().expect("refresh token");

    let refreshed = app
        .request(
            "GET",
            &format!("/user/refresh?refreshToken={refresh_token}"),
            None,
            None,
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);
    let access = refreshed.body["accessToken"].as_str().expect("new access");

    let info = app.request("GET", "/user/info", None, Some(access)).await;
    assert_eq!(info.status, StatusCode::OK);

    let wrong_partition = app
        .request(
            "GET",
            &format!("/user/admin/refresh?refreshToken={refresh_token}"),
            None,
            None,
        )
        .await;
    assert_eq!(wrong_partition.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_partition.message(), "token invalid, please log in again");
}

#[tokio::test]
async fn test_expired_access_token_is_renewed_in_headers() {
    let app = TestApp::new().await;
    let user = app.create_user("gina", "secret1", false).await;
    let stored = app
        .store
        .find_by_id(user.id)
        .await
        .expect("lookup")
        .expect("user");

    let stale = JwtEncoder::with_ttls(JWT_SECRET, Duration::minutes(-5), Duration::days(7));
    let claims = stale.access_claims(&UserInfo::new(&stored, vec![], vec![]));
    let tokens = stale.generate_token_pair(&claims).expect("tokens");

    let without_refresh = app
        .request("GET", "/user/info", None, Some(&tokens.access_token))
        .await;
    assert_eq!(without_refresh.status, StatusCode::UNAUTHORIZED);

    let renewed = app
        .request_with_headers(
            "GET",
            "/user/info",
            None,
            Some(&tokens.access_token),
            &[("x-refresh-token", &tokens.refresh_token)],
        )
        .await;
    assert_eq!(renewed.status, StatusCode::OK, "{}", renewed.body);
    assert_eq!(renewed.body["username"], "gina");
    assert!(renewed.headers.contains_key("x-access-token"));
    assert!(renewed.headers.contains_key("x-refresh-token"));
}

#[tokio::test]
async fn test_update_password_with_captcha() {
    let app = TestApp::new().await;
    app.create_user("hank", "secret1", false).await;
    let token = app.access_token("hank", "secret1").await;

    app.request(
        "GET",
        "/user/update_password/captcha?address=hank@example.com",
        None,
        None,
    )
    .await;
    let captcha = app.captcha_for("hank@example.com").await;

    let updated = app
        .request(
            "POST",
            "/user/update_password",
            Some(json!({
                "email": "hank@example.com",
                "captcha": captcha,
                "password": "changed1",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.body);
    assert_eq!(updated.message(), "password updated");

    let stored = app
        .store
        .find_by_username("hank")
        .await
        .expect("lookup")
        .expect("user");
    assert!(
        PasswordHasher::new()
            .verify_password("changed1", &stored.password_hash)
            .expect("verify")
    );
    app.login("hank", "changed1").await;
}

#[tokio::test]
async fn test_user_list_pages() {
    let app = TestApp::new().await;
    for i in 0..3 {
        app.create_user(&format!("user{i}"), "secret1", false).await;
    }

    let page = app
        .request("GET", "/user/list?pageNo=1&pageSize=2", None, None)
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["totalCount"], 3);
    assert_eq!(page.body["items"].as_array().map(Vec::len), Some(2));

    let bad = app
        .request("GET", "/user/list?pageNo=0&pageSize=2", None, None)
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}
