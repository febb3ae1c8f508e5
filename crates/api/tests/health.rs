//! Health endpoint integration test.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_ok_with_a_live_database(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get_unauthenticated(app, "/health").await;

    let json = common::expect_json(response, StatusCode::OK).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}
