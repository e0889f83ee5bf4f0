//! Repository for the `habits` and `habit_completions` tables.

use questline_core::clock::day_bounds;
use questline_core::rewards::RewardAmount;
use questline_core::streak::HabitStreak;
use questline_core::types::{CalendarDate, DbId, Timestamp};
use sqlx::PgPool;

use crate::models::habit::{CreateHabit, Habit, HabitCompletion, UpdateHabit};

const COLUMNS: &str = "id, user_id, title, description, difficulty, xp_reward, credits_reward, \
     streak, color, is_active, last_completed, created_at, updated_at";

const COMPLETION_COLUMNS: &str =
    "id, habit_id, user_id, completed_at, xp_gained, credits_gained";

pub struct HabitRepo;

impl HabitRepo {
    /// Active habits for a user, newest first.
    pub async fn list_active(pool: &PgPool, user_id: DbId) -> Result<Vec<Habit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM habits
             WHERE user_id = $1 AND is_active
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Habit>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_active(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Habit>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM habits WHERE id = $1 AND user_id = $2 AND is_active");
        sqlx::query_as::<_, Habit>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a habit with a normalized `difficulty` and its precomputed reward.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateHabit,
        difficulty: &str,
        reward: RewardAmount,
    ) -> Result<Habit, sqlx::Error> {
        let query = format!(
            "INSERT INTO habits (user_id, title, description, difficulty, xp_reward, credits_reward, color)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'primary'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Habit>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(difficulty)
            .bind(reward.xp)
            .bind(reward.credits)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// Update presentation fields of an active, owned habit.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateHabit,
    ) -> Result<Option<Habit>, sqlx::Error> {
        let query = format!(
            "UPDATE habits SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                color = COALESCE($5, color)
             WHERE id = $1 AND user_id = $2 AND is_active
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Habit>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete by clearing `is_active`. Returns `true` if a row changed.
    pub async fn soft_delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE habits SET is_active = FALSE WHERE id = $1 AND user_id = $2 AND is_active",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Completion (caller-owned transaction)
    // -----------------------------------------------------------------------

    /// Load and lock an active habit owned by `user_id`.
    pub async fn lock_active(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Habit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM habits
             WHERE id = $1 AND user_id = $2 AND is_active
             FOR UPDATE"
        );
        sqlx::query_as::<_, Habit>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub async fn record_completion(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        next: &HabitStreak,
    ) -> Result<Habit, sqlx::Error> {
        let query = format!(
            "UPDATE habits SET streak = $2, last_completed = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Habit>(&query)
            .bind(id)
            .bind(next.streak)
            .bind(next.last_completed)
            .fetch_one(&mut **tx)
            .await
    }

    /// Append an audit row for a completion.
    pub async fn insert_completion(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        habit_id: DbId,
        user_id: DbId,
        completed_at: Timestamp,
        granted: RewardAmount,
    ) -> Result<HabitCompletion, sqlx::Error> {
        let query = format!(
            "INSERT INTO habit_completions (habit_id, user_id, completed_at, xp_gained, credits_gained)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COMPLETION_COLUMNS}"
        );
        sqlx::query_as::<_, HabitCompletion>(&query)
            .bind(habit_id)
            .bind(user_id)
            .bind(completed_at)
            .bind(granted.xp)
            .bind(granted.credits)
            .fetch_one(&mut **tx)
            .await
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// A user's completions, newest first, optionally limited to one UTC day.
    pub async fn list_completions(
        pool: &PgPool,
        user_id: DbId,
        date: Option<CalendarDate>,
    ) -> Result<Vec<HabitCompletion>, sqlx::Error> {
        match date {
            Some(date) => {
                let (start, end) = day_bounds(date);
                let query = format!(
                    "SELECT {COMPLETION_COLUMNS} FROM habit_completions
                     WHERE user_id = $1 AND completed_at >= $2 AND completed_at < $3
                     ORDER BY completed_at DESC, id DESC"
                );
                sqlx::query_as::<_, HabitCompletion>(&query)
                    .bind(user_id)
                    .bind(start)
                    .bind(end)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COMPLETION_COLUMNS} FROM habit_completions
                     WHERE user_id = $1
                     ORDER BY completed_at DESC, id DESC"
                );
                sqlx::query_as::<_, HabitCompletion>(&query)
                    .bind(user_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }
}
