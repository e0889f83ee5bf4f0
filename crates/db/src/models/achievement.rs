//! Achievements: named milestones that grant XP and credits once per user.

use questline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Achievement {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub xp_reward: i32,
    pub credits_reward: i32,
    pub unlocked_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Unlock request. Omitted rewards fall back to the default achievement grant.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UnlockAchievement {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    #[validate(length(min = 1, max = 32))]
    pub icon: Option<String>,
    #[validate(range(min = 0))]
    pub xp_reward: Option<i32>,
    #[validate(range(min = 0))]
    pub credits_reward: Option<i32>,
}
