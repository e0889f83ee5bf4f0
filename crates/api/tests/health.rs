//! Health endpoint and middleware stack smoke tests.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_anon};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_reports_ok(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_anon(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_anon(app, "/api/v1/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
