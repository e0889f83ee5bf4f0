#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use questline_api::auth::jwt::{generate_access_token, JwtConfig};
use questline_api::config::ServerConfig;
use questline_api::engine::onboarding::setup_character;
use questline_api::router::build_app_router;
use questline_api::state::AppState;
use questline_core::character::Specialization;
use questline_core::clock::FixedClock;
use questline_core::progression::LevelUpPolicy;
use questline_core::roles::{ROLE_ADMIN, ROLE_USER};
use questline_db::models::character::{Appearance, SetupCharacter};
use questline_db::models::user::UpsertUser;
use questline_db::repositories::UserRepo;

const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(policy: LevelUpPolicy) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        level_up_policy: policy,
    }
}

/// First test day. Noon UTC so small clock nudges stay on the same date.
pub fn day_one() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()
}

pub fn test_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at_noon(day_one()))
}

/// Full application router with the production middleware stack, a fixed
/// clock at [`day_one`] and the single-step level-up policy.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_clock(), LevelUpPolicy::SingleStep)
}

pub fn build_test_app_with(pool: PgPool, clock: Arc<FixedClock>, policy: LevelUpPolicy) -> Router {
    let config = test_config(policy);
    let state = AppState::new(pool, config.clone(), clock);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn token_for(user_id: i64, role: &str) -> String {
    generate_access_token(user_id, role, &test_config(LevelUpPolicy::default()).jwt).unwrap()
}

static NEXT_USER_ID: AtomicI64 = AtomicI64::new(1);

async fn provision(pool: &PgPool) -> i64 {
    let id = NEXT_USER_ID.fetch_add(1, Ordering::Relaxed);
    UserRepo::upsert(pool, id, &UpsertUser::default()).await.unwrap().id
}

/// A user row with no character yet, plus a bearer token for it.
pub async fn create_user(pool: &PgPool) -> (i64, String) {
    let id = provision(pool).await;
    (id, token_for(id, ROLE_USER))
}

pub async fn create_admin(pool: &PgPool) -> (i64, String) {
    let id = provision(pool).await;
    (id, token_for(id, ROLE_ADMIN))
}

/// A user with a netrunner character (0 credits, level 1).
pub async fn create_player(pool: &PgPool, username: &str) -> (i64, String) {
    let (user_id, token) = create_user(pool).await;
    let input = SetupCharacter {
        username: username.to_string(),
        specialization: Specialization::Netrunner,
        appearance: Appearance::default(),
    };
    setup_character(pool, user_id, &input).await.unwrap();
    (user_id, token)
}

/// Overwrite a character's progression columns directly.
pub async fn set_progress(pool: &PgPool, user_id: i64, xp: i32, credits: i32) {
    sqlx::query("UPDATE characters SET xp = $2, credits = $3 WHERE user_id = $1")
        .bind(user_id)
        .bind(xp)
        .bind(credits)
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn builder(method: &str, uri: &str, token: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
}

/// GET without credentials.
pub async fn get_anon(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, builder("GET", uri, token).body(Body::empty()).unwrap()).await
}

/// POST with an empty body.
pub async fn post(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, builder("POST", uri, token).body(Body::empty()).unwrap()).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = builder("POST", uri, token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = builder("PUT", uri, token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, builder("DELETE", uri, token).body(Body::empty()).unwrap()).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST JSON and return the created resource's `data.id`.
pub async fn create_resource(app: Router, uri: &str, token: &str, body: serde_json::Value) -> i64 {
    let response = post_json(app, uri, token, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
