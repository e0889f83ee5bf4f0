//! Handlers for achievements.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use questline_db::repositories::AchievementRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/achievements
pub async fn list_achievements(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let achievements = AchievementRepo::list(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: achievements }))
}
