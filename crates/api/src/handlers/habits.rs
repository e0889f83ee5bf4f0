//! Handlers for habits and their completion history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use questline_core::error::CoreError;
use questline_core::rewards::{creation_reward, ActivityKind};
use questline_core::types::DbId;
use questline_db::models::habit::{CreateHabit, UpdateHabit};
use questline_db::repositories::HabitRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::query::DateFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Habit", id })
}

/// GET /api/v1/habits
pub async fn list_habits(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let habits = HabitRepo::list_active(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: habits }))
}

/// POST /api/v1/habits
///
/// XP and credit rewards are fixed here from `difficulty`.
pub async fn create_habit(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateHabit>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let (difficulty, reward) = creation_reward(ActivityKind::Habit, input.difficulty.as_deref())?;

    let habit = HabitRepo::create(&state.pool, user.user_id, &input, difficulty, reward).await?;

    tracing::info!(
        user_id = user.user_id,
        habit_id = habit.id,
        difficulty,
        xp_reward = habit.xp_reward,
        "Habit created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: habit })))
}

/// PUT /api/v1/habits/{id}
pub async fn update_habit(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHabit>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let habit = HabitRepo::update(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: habit }))
}

/// DELETE /api/v1/habits/{id}
///
/// Soft delete: the habit stops appearing and can no longer be completed,
/// its completion history is kept.
pub async fn delete_habit(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !HabitRepo::soft_delete(&state.pool, id, user.user_id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = user.user_id, habit_id = id, "Habit deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/habits/{id}/complete
pub async fn complete_habit(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let receipt = state.completions.complete_habit(user.user_id, id).await?;
    Ok(Json(DataResponse { data: receipt }))
}

/// GET /api/v1/habits/completions?date=YYYY-MM-DD
pub async fn list_completions(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<DateFilterParams>,
) -> AppResult<impl IntoResponse> {
    let completions = HabitRepo::list_completions(&state.pool, user.user_id, params.date).await?;
    Ok(Json(DataResponse { data: completions }))
}
