//! Shop reward model, DTOs and purchase outcome.

use questline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `rewards` table: a user-defined item bought with credits.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShopReward {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub cost: i32,
    pub icon: String,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateShopReward {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub cost: i32,
    pub icon: Option<String>,
}

/// Result of a purchase attempt. Refusals are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum PurchaseOutcome {
    Purchased { remaining_credits: i32 },
    /// Missing, not owned by the buyer, or no longer available.
    RewardUnavailable,
    InsufficientFunds { credits: i32, cost: i32 },
}

impl PurchaseOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PurchaseOutcome::Purchased { .. })
    }
}
