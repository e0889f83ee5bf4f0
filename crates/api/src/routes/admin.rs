//! Admin routes. Handlers enforce the role via `RequireAdmin`.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /dailies/reset                  -> reset_all_dailies
/// POST   /users/{user_id}/achievements   -> unlock_achievement
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dailies/reset", post(admin::reset_all_dailies))
        .route("/users/{user_id}/achievements", post(admin::unlock_achievement))
}
