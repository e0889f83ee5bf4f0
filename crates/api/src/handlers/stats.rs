//! Handler for the dashboard summary.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use questline_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stats
pub async fn get_stats(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = StatsRepo::for_user(&state.pool, user.user_id, state.clock.today()).await?;
    Ok(Json(DataResponse { data: stats }))
}
