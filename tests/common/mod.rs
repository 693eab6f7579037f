#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use tutorlink::App;
use tutorlink_config::ApiConfig;
use tutorlink_core::storage::MemoryStorage;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SESSION_KEY: &str = "auth-store";

/// Id the mounted login hands back, shaped like the API's UUID keys.
pub const USER_ID: &str = "3f2a9c4e-6b1d-4e8f-a7c2-9d0e1f2a3b4c";

pub struct TestApp {
    pub app: App,
    pub storage: MemoryStorage,
    pub server: MockServer,
}

/// App wired to a fresh mock API and in-memory storage.
pub async fn spawn_app() -> TestApp {
    let server = MockServer::start().await;
    let storage = MemoryStorage::new();
    let app = app_for(&server, &storage).await;
    TestApp {
        app,
        storage,
        server,
    }
}

/// Build an app over existing storage, as a restarted process would.
pub async fn app_for(server: &MockServer, storage: &MemoryStorage) -> App {
    App::with_storage(
        &ApiConfig::with_base_url(server.uri()),
        Arc::new(storage.clone()),
        SESSION_KEY,
    )
    .await
    .unwrap()
}

pub fn user_json(id: &str, email: &str, role: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "role": role,
        "is_active": true,
        "created_at": "2024-09-01T10:00:00"
    })
}

pub fn login_body(token: &str, user: Value) -> Value {
    json!({
        "access_token": token,
        "refresh_token": "refresh-not-used",
        "user": user
    })
}

/// Mount a successful login for exactly this email/password pair.
pub async fn mount_login(
    server: &MockServer,
    email: &str,
    password: &str,
    token: &str,
    role: &str,
) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": email, "password": password })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(login_body(token, user_json(USER_ID, email, role))),
        )
        .mount(server)
        .await;
}

/// Mount a 401 for any other login attempt. Mount after the successful ones;
/// wiremock picks the first matching mock in mount order.
pub async fn mount_login_rejection(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials." })),
        )
        .mount(server)
        .await;
}

/// Sign the app in as `email` with the given role and token.
pub async fn sign_in(test: &TestApp, email: &str, token: &str, role: &str) {
    mount_login(&test.server, email, "pw", token, role).await;
    test.app.login(email, "pw").await.unwrap();
}
