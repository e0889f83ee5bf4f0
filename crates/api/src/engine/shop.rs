//! Credit shop purchases.

use questline_core::error::CoreError;
use questline_core::progression::spend_credits;
use questline_core::types::DbId;
use questline_db::models::reward::PurchaseOutcome;
use questline_db::repositories::{CharacterRepo, RewardRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Buy `reward_id` for `user_id`.
///
/// Refusals (unavailable reward, insufficient credits) are returned as a
/// [`PurchaseOutcome`] and leave the character untouched. Only a missing
/// character or a database failure is an error.
pub async fn purchase(pool: &PgPool, user_id: DbId, reward_id: DbId) -> AppResult<PurchaseOutcome> {
    let mut tx = pool.begin().await?;

    let Some(reward) = RewardRepo::find_available_for_purchase(&mut tx, reward_id, user_id).await?
    else {
        tracing::debug!(user_id, reward_id, "Reward unavailable for purchase");
        return Ok(PurchaseOutcome::RewardUnavailable);
    };

    let character = CharacterRepo::lock_by_user(&mut tx, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id: user_id,
        }))?;

    let Some(next) = spend_credits(character.progress(), reward.cost) else {
        tracing::debug!(
            user_id,
            reward_id,
            credits = character.credits,
            cost = reward.cost,
            "Insufficient credits",
        );
        return Ok(PurchaseOutcome::InsufficientFunds {
            credits: character.credits,
            cost: reward.cost,
        });
    };

    let character = CharacterRepo::update_progress(&mut tx, character.id, &next).await?;
    tx.commit().await?;

    tracing::info!(
        user_id,
        reward_id,
        cost = reward.cost,
        remaining_credits = character.credits,
        "Reward purchased",
    );

    Ok(PurchaseOutcome::Purchased {
        remaining_credits: character.credits,
    })
}
