//! Handlers for the user's character.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use questline_core::error::CoreError;
use questline_db::models::character::SetupCharacter;
use questline_db::repositories::CharacterRepo;

use crate::engine::onboarding;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/character
pub async fn get_character(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let character = CharacterRepo::find_by_user(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id: user.user_id,
        }))?;

    Ok(Json(DataResponse { data: character }))
}

/// POST /api/v1/character
///
/// One-time setup: username, specialization, appearance, starter armor.
pub async fn setup_character(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<SetupCharacter>,
) -> AppResult<impl IntoResponse> {
    let setup = onboarding::setup_character(&state.pool, user.user_id, &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: setup })))
}
