use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::habits;
use crate::state::AppState;

/// Routes mounted at `/habits`.
///
/// ```text
/// GET    /                -> list_habits
/// POST   /                -> create_habit
/// GET    /completions     -> list_completions
/// PUT    /{id}            -> update_habit
/// DELETE /{id}            -> delete_habit
/// POST   /{id}/complete   -> complete_habit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(habits::list_habits).post(habits::create_habit))
        .route("/completions", get(habits::list_completions))
        .route("/{id}", put(habits::update_habit).delete(habits::delete_habit))
        .route("/{id}/complete", post(habits::complete_habit))
}
