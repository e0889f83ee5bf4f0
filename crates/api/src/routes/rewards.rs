use axum::routing::{get, post};
use axum::Router;

use crate::handlers::rewards;
use crate::state::AppState;

/// Routes mounted at `/rewards`.
///
/// ```text
/// GET    /                -> list_rewards
/// POST   /                -> create_reward
/// POST   /{id}/purchase   -> purchase_reward
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rewards::list_rewards).post(rewards::create_reward))
        .route("/{id}/purchase", post(rewards::purchase_reward))
}
