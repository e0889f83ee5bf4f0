//! Handlers for dailies.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use questline_core::error::CoreError;
use questline_core::rewards::{creation_reward, ActivityKind};
use questline_core::types::DbId;
use questline_db::models::daily::{CreateDaily, UpdateDaily};
use questline_db::repositories::DailyRepo;
use serde_json::json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Daily", id })
}

/// GET /api/v1/dailies
pub async fn list_dailies(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let dailies = DailyRepo::list_active(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: dailies }))
}

/// POST /api/v1/dailies
pub async fn create_daily(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateDaily>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let (difficulty, reward) = creation_reward(ActivityKind::Daily, input.difficulty.as_deref())?;

    let daily = DailyRepo::create(&state.pool, user.user_id, &input, difficulty, reward).await?;

    tracing::info!(
        user_id = user.user_id,
        daily_id = daily.id,
        difficulty,
        xp_reward = daily.xp_reward,
        "Daily created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: daily })))
}

/// PUT /api/v1/dailies/{id}
pub async fn update_daily(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDaily>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let daily = DailyRepo::update(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: daily }))
}

/// DELETE /api/v1/dailies/{id}
pub async fn delete_daily(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !DailyRepo::soft_delete(&state.pool, id, user.user_id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = user.user_id, daily_id = id, "Daily deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/dailies/{id}/complete
///
/// 409 `ALREADY_COMPLETED` on a second completion the same calendar day.
pub async fn complete_daily(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let receipt = state.completions.complete_daily(user.user_id, id).await?;
    Ok(Json(DataResponse { data: receipt }))
}

/// POST /api/v1/dailies/reset
///
/// Clear today's completion flags on the caller's dailies.
pub async fn reset_dailies(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let reset = DailyRepo::reset_for_user(&state.pool, user.user_id).await?;
    tracing::info!(user_id = user.user_id, reset, "Dailies reset");
    Ok(Json(DataResponse {
        data: json!({ "reset": reset }),
    }))
}
