//! Admin-only operational endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use questline_core::types::DbId;
use questline_db::models::achievement::UnlockAchievement;
use questline_db::repositories::DailyRepo;
use serde_json::json;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/dailies/reset
///
/// Day-rollover hook for an external scheduler: clears today's completion
/// flag on every active daily.
pub async fn reset_all_dailies(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let reset = DailyRepo::reset_all(&state.pool).await?;
    tracing::info!(admin_id = admin.user_id, reset, "All dailies reset");
    Ok(Json(DataResponse {
        data: json!({ "reset": reset }),
    }))
}

/// POST /api/v1/admin/users/{user_id}/achievements
///
/// Unlock an achievement for a user and grant its XP and credits.
pub async fn unlock_achievement(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<UnlockAchievement>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let receipt = state
        .completions
        .unlock_achievement(user_id, &input)
        .await?;

    tracing::debug!(admin_id = admin.user_id, user_id, "Achievement granted by admin");

    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}
