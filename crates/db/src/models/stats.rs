//! Per-user dashboard aggregates.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserStats {
    /// Active habits.
    pub total_habits: i64,
    /// Incomplete todos.
    pub active_todos: i64,
    /// Habit completions recorded today (UTC).
    pub completed_today: i64,
    /// The character's stored streak, 0 without a character.
    pub streak: i32,
}
