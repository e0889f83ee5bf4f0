use axum::routing::get;
use axum::Router;

use crate::handlers::character;
use crate::state::AppState;

/// Routes mounted at `/character`.
///
/// ```text
/// GET    /    -> get_character
/// POST   /    -> setup_character
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(character::get_character).post(character::setup_character),
    )
}
