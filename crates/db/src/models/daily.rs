//! Daily entity model and DTOs.

use questline_core::types::{CalendarDate, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `dailies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Daily {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub difficulty: String,
    pub xp_reward: i32,
    pub credits_reward: i32,
    pub streak: i32,
    pub is_completed_today: bool,
    pub last_completed_date: Option<CalendarDate>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a daily. Rewards are derived from `difficulty`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDaily {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `medium`.
    pub difficulty: Option<String>,
}

/// DTO for editing a daily.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDaily {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
}
