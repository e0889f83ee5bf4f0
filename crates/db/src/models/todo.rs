//! Todo (mission) entity model and DTOs.

use questline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `todos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Todo {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub xp_reward: i32,
    pub credits_reward: i32,
    pub is_completed: bool,
    pub completed_at: Option<Timestamp>,
    pub due_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a todo. Rewards are derived from `priority`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTodo {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `medium`.
    pub priority: Option<String>,
    pub due_date: Option<Timestamp>,
}

/// DTO for editing a todo. Completed todos are read-only.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTodo {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Timestamp>,
}
