//! Bearer-token authentication and admin RBAC.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, get, get_anon, post, put_json};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_anon(app, "/api/v1/habits").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_garbage_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/habits", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_bearer_scheme_is_401(pool: PgPool) {
    let (user_id, _) = common::create_user(&pool).await;
    let token = common::token_for(user_id, "user");
    let app = common::build_test_app(pool);

    for header in [format!("Basic {token}"), "Bearer ".to_string()] {
        let request = Request::get("/api/v1/me")
            .header("authorization", header)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_returns_user_without_character(pool: PgPool) {
    let (user_id, token) = common::create_user(&pool).await;
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["id"], user_id);
    assert!(json["data"]["character"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_me_keeps_omitted_fields(pool: PgPool) {
    let (_, token) = common::create_user(&pool).await;
    let app = common::build_test_app(pool);

    let response = put_json(
        app.clone(),
        "/api/v1/me",
        &token,
        json!({ "email": "neo@example.com", "first_name": "Thomas" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json(app, "/api/v1/me", &token, json!({ "last_name": "Anderson" })).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "neo@example.com");
    assert_eq!(json["data"]["first_name"], "Thomas");
    assert_eq!(json["data"]["last_name"], "Anderson");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_provisions_unknown_subject(pool: PgPool) {
    let token = common::token_for(4242, "user");
    let app = common::build_test_app(pool.clone());

    let response = get(app.clone(), "/api/v1/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["id"], 4242);
    assert!(json["data"]["user"]["username"].is_null());
    assert!(json["data"]["character"].is_null());

    // A second call reuses the row.
    let response = get(app, "/api/v1/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fresh_identity_onboards_end_to_end(pool: PgPool) {
    let token = common::token_for(4242, "user");
    let app = common::build_test_app(pool);

    let response = put_json(
        app.clone(),
        "/api/v1/me",
        &token,
        json!({ "email": "newbie@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], 4242);

    let response = common::post_json(
        app.clone(),
        "/api/v1/character",
        &token,
        json!({ "username": "newbie" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let id = common::create_resource(
        app.clone(),
        "/api/v1/habits",
        &token,
        json!({ "title": "Hydrate", "difficulty": "easy" }),
    )
    .await;
    let response = post(app, &format!("/api/v1/habits/{id}/complete"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["progress"]["character"]["xp"], 25);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_setup_without_prior_profile_call(pool: PgPool) {
    let token = common::token_for(777, "user");
    let app = common::build_test_app(pool);

    let response = common::post_json(
        app,
        "/api/v1/character",
        &token,
        json!({ "username": "direct" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["id"], 777);
    assert_eq!(json["data"]["user"]["username"], "direct");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_reset_requires_admin_role(pool: PgPool) {
    let (_, user_token) = common::create_user(&pool).await;
    let (_, admin_token) = common::create_admin(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post(app, "/api/v1/admin/dailies/reset", &user_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = post(app, "/api/v1/admin/dailies/reset", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["reset"], 0);
}
