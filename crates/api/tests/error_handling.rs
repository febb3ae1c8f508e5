//! Error envelope and auth behaviour across the API surface.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_token_answers_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get_unauthenticated(app, "/api/v1/call-sheets").await;

    let json = common::expect_json(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn garbage_token_answers_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/call-sheets", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_id_answers_404_with_envelope(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "alpha").await;
    let app = common::build_test_app(pool);

    let response = common::get(
        app,
        "/api/v1/call-sheets/00000000-0000-0000-0000-000000000000",
        &tenant.token,
    )
    .await;

    let json = common::expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].as_str().unwrap().contains("CallSheet"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_status_filter_answers_400(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "alpha").await;
    let app = common::build_test_app(pool);

    let response = common::get(app, "/api/v1/lineups?status=headlining", &tenant.token).await;

    let json = common::expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_round_trip_issues_usable_tokens(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "alpha").await;

    let app = common::build_test_app(pool.clone());
    let response = common::post_json_unauthenticated(
        app,
        "/api/v1/auth/login",
        serde_json::json!({"email": tenant.email, "password": common::TEST_PASSWORD}),
    )
    .await;
    let json = common::expect_json(response, StatusCode::OK).await;
    let access_token = json["access_token"].as_str().unwrap().to_string();
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();
    assert_eq!(json["user"]["email"], tenant.email);

    // The issued access token authenticates API calls.
    let app = common::build_test_app(pool.clone());
    let response = common::get(app, "/api/v1/call-sheets", &access_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The refresh token rotates: it works once, then is revoked.
    let app = common::build_test_app(pool.clone());
    let response = common::post_json_unauthenticated(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({"refresh_token": refresh_token}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = common::post_json_unauthenticated(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({"refresh_token": refresh_token}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_answers_401(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "alpha").await;
    let app = common::build_test_app(pool);

    let response = common::post_json_unauthenticated(
        app,
        "/api/v1/auth/login",
        serde_json::json!({"email": tenant.email, "password": "wrong"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
