use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::todos;
use crate::state::AppState;

/// Routes mounted at `/todos`.
///
/// ```text
/// GET    /                -> list_todos
/// POST   /                -> create_todo
/// PUT    /{id}            -> update_todo
/// DELETE /{id}            -> delete_todo
/// POST   /{id}/complete   -> complete_todo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(todos::list_todos).post(todos::create_todo))
        .route("/{id}", put(todos::update_todo).delete(todos::delete_todo))
        .route("/{id}/complete", post(todos::complete_todo))
}
