//! Shared harness for HTTP-level integration tests.
//!
//! Builds the full application router (same middleware stack as
//! production) on top of the `#[sqlx::test]`-provided pool, and offers
//! request/JSON helpers plus tenant seeding.

// Each test binary compiles this module separately and uses a subset of it.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use ghx_api::auth::jwt::{generate_access_token, JwtConfig};
use ghx_api::auth::password::hash_password;
use ghx_api::config::ServerConfig;
use ghx_api::router::build_app_router;
use ghx_api::state::AppState;
use ghx_api::ws::WsManager;
use ghx_db::models::organization::CreateOrganization;
use ghx_db::repositories::{OrganizationRepo, UserRepo};

/// Password used for every seeded test user.
pub const TEST_PASSWORD: &str = "correct horse battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus: Arc::new(ghx_events::EventBus::default()),
    };
    build_app_router(state, &config)
}

/// A seeded tenant: organization, one user, and a valid access token.
pub struct TestTenant {
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

/// Create an organization plus one producer user and mint a token for them.
pub async fn seed_tenant(pool: &PgPool, slug: &str) -> TestTenant {
    let org = OrganizationRepo::create(
        pool,
        &CreateOrganization {
            name: format!("Org {slug}"),
            slug: slug.to_string(),
        },
    )
    .await
    .expect("seed organization");

    let email = format!("producer@{slug}.example");
    let password_hash = hash_password(TEST_PASSWORD).expect("hash test password");
    let user = UserRepo::create(pool, org.id, &email, "Test Producer", "producer", &password_hash)
        .await
        .expect("seed user");

    let token = generate_access_token(user.id, org.id, "producer", &test_config().jwt)
        .expect("mint test token");

    TestTenant {
        organization_id: org.id,
        user_id: user.id,
        email,
        token,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, path: &str, token: &str) -> Response<Body> {
    send(app, "GET", path, Some(token), None).await
}

pub async fn get_unauthenticated(app: Router, path: &str) -> Response<Body> {
    send(app, "GET", path, None, None).await
}

pub async fn post_json(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "POST", path, Some(token), Some(body)).await
}

pub async fn post_json_unauthenticated(
    app: Router,
    path: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "POST", path, None, Some(body)).await
}

pub async fn patch_json(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "PATCH", path, Some(token), Some(body)).await
}

pub async fn delete(app: Router, path: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", path, Some(token), None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a response status and return its JSON body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
