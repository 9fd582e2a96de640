//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use roomhub_api::{AppState, build_app};
use roomhub_auth::PasswordHasher;
use roomhub_cache::CacheManager;
use roomhub_cache::memory::MemoryCacheProvider;
use roomhub_core::config::AppConfig;
use roomhub_core::config::cache::MemoryCacheConfig;
use roomhub_database::{DatabaseManager, MemoryStore, RoleStore, UserStore};
use roomhub_entity::user::{CreateUser, User};
use roomhub_mail::{MailManager, MemoryMailer};

pub const JWT_SECRET: &str = "integration-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Tables behind every store, for direct seeding
    pub store: Arc<MemoryStore>,
    /// Captures every outgoing mail
    pub mailer: Arc<MemoryMailer>,
    /// Application config
    pub config: AppConfig,
    /// Shared state behind the router, for mounting extra routes
    pub state: AppState,
}

/// Status, headers and JSON body of one response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `message` field of the body.
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    /// Create a new test application on in-memory adapters.
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = JWT_SECRET.to_string();

        let store = Arc::new(MemoryStore::new());
        let mailer = Arc::new(MemoryMailer::new());

        let database = DatabaseManager::memory(Arc::clone(&store));
        let cache = CacheManager::from_provider(Arc::new(MemoryCacheProvider::new(
            &MemoryCacheConfig::default(),
        )));
        let mail = MailManager::from_provider(mailer.clone());

        let state = AppState::new(config.clone(), database, cache, mail);

        Self {
            router: build_app(state.clone()),
            store,
            mailer,
            config,
            state,
        }
    }

    /// Mount additional routes next to the application's own.
    pub fn mount(&mut self, routes: Router<AppState>) {
        self.router = self
            .router
            .clone()
            .merge(routes.with_state(self.state.clone()));
    }

    /// Make an HTTP request against the router.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_with_headers(method, uri, body, token, &[]).await
    }

    /// Make an HTTP request with extra headers.
    pub async fn request_with_headers(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = match body {
            Some(json) => Body::from(serde_json::to_vec(&json).expect("serialize body")),
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("build request"))
            .await
            .expect("request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Insert an account directly into the store.
    pub async fn create_user(&self, username: &str, password: &str, is_admin: bool) -> User {
        let password_hash = PasswordHasher::new()
            .hash_password(password)
            .expect("hash password");
        UserStore::create(
            &*self.store,
            &CreateUser {
                username: username.to_string(),
                password_hash,
                nick_name: username.to_string(),
                email: format!("{username}@example.com"),
                is_admin,
            },
        )
        .await
        .expect("create user")
    }

    /// Grant `user` a role carrying `permissions`.
    pub async fn grant(&self, user: &User, role: &str, permissions: &[&str]) {
        let codes: Vec<String> = permissions.iter().map(|p| p.to_string()).collect();
        let role = self
            .store
            .ensure_role(role, &codes)
            .await
            .expect("ensure role");
        self.store
            .assign_role(user.id, role.id)
            .await
            .expect("assign role");
    }

    /// Log in through the API and return the full response body.
    pub async fn login(&self, username: &str, password: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/user/login",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body
    }

    /// Log in through the API and return the access token.
    pub async fn access_token(&self, username: &str, password: &str) -> String {
        self.login(username, password).await["accessToken"]
            .as_str()
            .expect("access token")
            .to_string()
    }

    /// Create a meeting room through the API and return its id.
    pub async fn create_room(&self, name: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/meeting-room/create",
                Some(serde_json::json!({
                    "name": name,
                    "capacity": 10,
                    "location": "Floor 3",
                    "equipment": "projector",
                    "description": "",
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "create room failed: {}", response.body);
        response.body["id"].as_i64().expect("room id")
    }

    /// The six-digit code in the last mail sent to `address`.
    pub async fn captcha_for(&self, address: &str) -> String {
        let mail = self.mailer.last_to(address).await.expect("captcha mail");
        mail.html.chars().filter(char::is_ascii_digit).collect()
    }
}
