//! Handlers for todos (one-shot missions).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use questline_core::error::CoreError;
use questline_core::rewards::{creation_reward, ActivityKind};
use questline_core::types::DbId;
use questline_db::models::todo::{CreateTodo, UpdateTodo};
use questline_db::repositories::TodoRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Todo", id })
}

/// GET /api/v1/todos
pub async fn list_todos(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let todos = TodoRepo::list(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: todos }))
}

/// POST /api/v1/todos
pub async fn create_todo(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateTodo>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let (priority, reward) = creation_reward(ActivityKind::Mission, input.priority.as_deref())?;

    let todo = TodoRepo::create(&state.pool, user.user_id, &input, priority, reward).await?;

    tracing::info!(
        user_id = user.user_id,
        todo_id = todo.id,
        priority,
        xp_reward = todo.xp_reward,
        "Todo created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: todo })))
}

/// PUT /api/v1/todos/{id}
///
/// Completed todos are read-only (409 `ALREADY_COMPLETED`).
pub async fn update_todo(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTodo>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(todo) = TodoRepo::update(&state.pool, id, user.user_id, &input).await? {
        return Ok(Json(DataResponse { data: todo }));
    }

    match TodoRepo::find_by_id(&state.pool, id, user.user_id).await? {
        Some(_) => Err(AppError::Core(CoreError::AlreadyCompleted {
            entity: "Todo",
            id,
        })),
        None => Err(not_found(id)),
    }
}

/// DELETE /api/v1/todos/{id}
pub async fn delete_todo(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !TodoRepo::delete(&state.pool, id, user.user_id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = user.user_id, todo_id = id, "Todo deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/todos/{id}/complete
pub async fn complete_todo(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let receipt = state.completions.complete_todo(user.user_id, id).await?;
    Ok(Json(DataResponse { data: receipt }))
}
