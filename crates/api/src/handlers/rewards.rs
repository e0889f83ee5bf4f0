//! Handlers for the credit shop.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use questline_core::equipment::validate_cost;
use questline_core::types::DbId;
use questline_db::models::reward::{CreateShopReward, PurchaseOutcome};
use questline_db::repositories::RewardRepo;
use serde::Serialize;
use validator::Validate;

use crate::engine::shop;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Purchase response body: `{ success, reason, ... }`.
#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: PurchaseOutcome,
}

/// GET /api/v1/rewards
pub async fn list_rewards(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rewards = RewardRepo::list_available(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: rewards }))
}

/// POST /api/v1/rewards
pub async fn create_reward(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateShopReward>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_cost(input.cost)?;

    let reward = RewardRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(
        user_id = user.user_id,
        reward_id = reward.id,
        cost = reward.cost,
        "Reward created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: reward })))
}

/// POST /api/v1/rewards/{id}/purchase
///
/// Always 200 for a refused purchase; inspect `success` and `reason`.
pub async fn purchase_reward(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let outcome = shop::purchase(&state.pool, user.user_id, id).await?;

    Ok(Json(DataResponse {
        data: PurchaseResponse {
            success: outcome.is_success(),
            outcome,
        },
    }))
}
