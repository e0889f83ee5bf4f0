//! Habit and habit-completion models and DTOs.

use questline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `habits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Habit {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub difficulty: String,
    pub xp_reward: i32,
    pub credits_reward: i32,
    pub streak: i32,
    pub color: String,
    pub is_active: bool,
    pub last_completed: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An append-only audit row written on every habit completion.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HabitCompletion {
    pub id: DbId,
    pub habit_id: DbId,
    pub user_id: DbId,
    pub completed_at: Timestamp,
    pub xp_gained: i32,
    pub credits_gained: i32,
}

/// DTO for creating a habit. Rewards are derived from `difficulty`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHabit {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `medium`.
    pub difficulty: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub color: Option<String>,
}

/// DTO for editing a habit. Difficulty and rewards are fixed at creation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateHabit {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub color: Option<String>,
}
