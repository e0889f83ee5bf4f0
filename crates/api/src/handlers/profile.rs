//! Handler for the current user's profile.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use questline_db::models::character::Character;
use questline_db::models::user::{UpsertUser, User};
use questline_db::repositories::{CharacterRepo, UserRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Profile {
    pub user: User,
    /// `None` until character setup has run.
    pub character: Option<Character>,
}

/// GET /api/v1/me
///
/// The first call for a new token subject provisions an empty user row.
pub async fn get_me(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let row = UserRepo::ensure(&state.pool, user.user_id).await?;
    let character = CharacterRepo::find_by_user(&state.pool, user.user_id).await?;

    Ok(Json(DataResponse {
        data: Profile {
            user: row,
            character,
        },
    }))
}

/// PUT /api/v1/me
///
/// Refresh profile fields from the identity provider. Omitted fields keep
/// their stored values.
pub async fn update_me(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<UpsertUser>,
) -> AppResult<impl IntoResponse> {
    let row = UserRepo::upsert(&state.pool, user.user_id, &input).await?;

    Ok(Json(DataResponse { data: row }))
}
