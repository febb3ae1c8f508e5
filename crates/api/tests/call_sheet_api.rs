//! HTTP-level integration tests for the call sheets module.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

fn sheet_payload(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "call_date": "2025-06-01",
        "call_time": "07:00",
        "location": "Main Stage",
        "crew_calls": [{
            "id": "5e0c3c0a-74b2-4c9e-9a57-4c1f34f1d8b0",
            "department": "Rigging",
            "position": "Head rigger",
            "name": "Sam Doe",
            "call_time": "06:00"
        }]
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_returns_201_with_defaults(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "alpha").await;
    let app = common::build_test_app(pool);

    let response = common::post_json(
        app,
        "/api/v1/call-sheets",
        &tenant.token,
        sheet_payload("Day 1"),
    )
    .await;

    let json = common::expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["data"]["name"], "Day 1");
    assert_eq!(json["data"]["status"], "draft");
    assert_eq!(json["data"]["version"], 1);
    assert_eq!(json["data"]["crew_calls"][0]["department"], "Rigging");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_returns_filtered_page_and_total(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "alpha").await;

    for name in ["Main Stage Day 1", "Main Stage Day 2", "Warehouse Load-in"] {
        let app = common::build_test_app(pool.clone());
        common::post_json(app, "/api/v1/call-sheets", &tenant.token, sheet_payload(name)).await;
    }

    let app = common::build_test_app(pool);
    let response = common::get(
        app,
        "/api/v1/call-sheets?status=draft&q=stage",
        &tenant.token,
    )
    .await;

    let json = common::expect_json(response, StatusCode::OK).await;
    assert_eq!(json["total"], 2);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn records_are_invisible_across_tenants(pool: PgPool) {
    let alpha = common::seed_tenant(&pool, "alpha").await;
    let bravo = common::seed_tenant(&pool, "bravo").await;

    let app = common::build_test_app(pool.clone());
    let created = common::post_json(
        app,
        "/api/v1/call-sheets",
        &alpha.token,
        sheet_payload("Day 1"),
    )
    .await;
    let created = common::body_json(created).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // Visible to its own tenant.
    let app = common::build_test_app(pool.clone());
    let response = common::get(app, &format!("/api/v1/call-sheets/{id}"), &alpha.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Invisible to another tenant.
    let app = common::build_test_app(pool);
    let response = common::get(app, &format!("/api/v1/call-sheets/{id}"), &bravo.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn patch_with_matching_version_succeeds(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "alpha").await;

    let app = common::build_test_app(pool.clone());
    let created = common::post_json(
        app,
        "/api/v1/call-sheets",
        &tenant.token,
        sheet_payload("Day 1"),
    )
    .await;
    let created = common::body_json(created).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool);
    let response = common::patch_json(
        app,
        &format!("/api/v1/call-sheets/{id}"),
        &tenant.token,
        serde_json::json!({"status": "published", "version": 1}),
    )
    .await;

    let json = common::expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "published");
    assert_eq!(json["data"]["version"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn patch_with_stale_version_answers_409_with_versions(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "alpha").await;

    let app = common::build_test_app(pool.clone());
    let created = common::post_json(
        app,
        "/api/v1/call-sheets",
        &tenant.token,
        sheet_payload("Day 1"),
    )
    .await;
    let created = common::body_json(created).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // First writer wins.
    let app = common::build_test_app(pool.clone());
    common::patch_json(
        app,
        &format!("/api/v1/call-sheets/{id}"),
        &tenant.token,
        serde_json::json!({"status": "published", "version": 1}),
    )
    .await;

    // Second writer still holds version 1.
    let app = common::build_test_app(pool);
    let response = common::patch_json(
        app,
        &format!("/api/v1/call-sheets/{id}"),
        &tenant.token,
        serde_json::json!({"name": "Conflicting edit", "version": 1}),
    )
    .await;

    let json = common::expect_json(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["provided"], 1);
    assert_eq!(json["current"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_then_get_is_404(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "alpha").await;

    let app = common::build_test_app(pool.clone());
    let created = common::post_json(
        app,
        "/api/v1/call-sheets",
        &tenant.token,
        sheet_payload("Day 1"),
    )
    .await;
    let created = common::body_json(created).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = common::delete(app, &format!("/api/v1/call-sheets/{id}"), &tenant.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = common::get(app, &format!("/api/v1/call-sheets/{id}"), &tenant.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_name_is_rejected_before_the_database(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "alpha").await;
    let app = common::build_test_app(pool);

    let response = common::post_json(
        app,
        "/api/v1/call-sheets",
        &tenant.token,
        serde_json::json!({"name": "  ", "call_date": "2025-06-01"}),
    )
    .await;

    let json = common::expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_call_time_is_rejected(pool: PgPool) {
    let tenant = common::seed_tenant(&pool, "alpha").await;
    let app = common::build_test_app(pool);

    let response = common::post_json(
        app,
        "/api/v1/call-sheets",
        &tenant.token,
        serde_json::json!({"name": "Day 1", "call_date": "2025-06-01", "call_time": "7am"}),
    )
    .await;

    let json = common::expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
