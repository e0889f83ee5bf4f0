use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::dailies;
use crate::state::AppState;

/// Routes mounted at `/dailies`.
///
/// ```text
/// GET    /                -> list_dailies
/// POST   /                -> create_daily
/// POST   /reset           -> reset_dailies
/// PUT    /{id}            -> update_daily
/// DELETE /{id}            -> delete_daily
/// POST   /{id}/complete   -> complete_daily
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dailies::list_dailies).post(dailies::create_daily))
        .route("/reset", post(dailies::reset_dailies))
        .route("/{id}", put(dailies::update_daily).delete(dailies::delete_daily))
        .route("/{id}/complete", post(dailies::complete_daily))
}
