pub mod achievements;
pub mod admin;
pub mod character;
pub mod dailies;
pub mod equipment;
pub mod habits;
pub mod health;
pub mod rewards;
pub mod todos;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree. Every route requires a Bearer token.
///
/// Route hierarchy:
///
/// ```text
/// /me                                  current user + character, profile refresh (GET, PUT)
/// /stats                               dashboard counters (GET)
///
/// /character                           get, one-time setup (GET, POST)
///
/// /habits                              list, create
/// /habits/{id}                         update, soft delete (PUT, DELETE)
/// /habits/{id}/complete                complete (POST)
/// /habits/completions                  completion history, ?date= (GET)
///
/// /dailies                             list, create
/// /dailies/{id}                        update, soft delete (PUT, DELETE)
/// /dailies/{id}/complete               complete once per day (POST)
/// /dailies/reset                       clear today's flags (POST)
///
/// /todos                               list, create
/// /todos/{id}                          update, delete (PUT, DELETE)
/// /todos/{id}/complete                 complete (POST)
///
/// /rewards                             list available, create
/// /rewards/{id}/purchase               spend credits (POST)
///
/// /equipment                           list, create
/// /equipment/{id}/equip                equip, unequipping the slot (POST)
///
/// /achievements                        unlocked achievements (GET)
///
/// /admin/dailies/reset                 clear flags for all users (admin)
/// /admin/users/{user_id}/achievements  unlock + grant (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(handlers::profile::get_me).put(handlers::profile::update_me),
        )
        .route("/stats", get(handlers::stats::get_stats))
        .nest("/character", character::router())
        .nest("/habits", habits::router())
        .nest("/dailies", dailies::router())
        .nest("/todos", todos::router())
        .nest("/rewards", rewards::router())
        .nest("/equipment", equipment::router())
        .nest("/achievements", achievements::router())
        .nest("/admin", admin::router())
}
