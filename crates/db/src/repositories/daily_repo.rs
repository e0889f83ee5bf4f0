//! Repository for the `dailies` table.

use questline_core::rewards::RewardAmount;
use questline_core::streak::DailyStreak;
use questline_core::types::DbId;
use sqlx::PgPool;

use crate::models::daily::{CreateDaily, Daily, UpdateDaily};

const COLUMNS: &str = "id, user_id, title, description, difficulty, xp_reward, credits_reward, \
     streak, is_completed_today, last_completed_date, is_active, created_at, updated_at";

pub struct DailyRepo;

impl DailyRepo {
    /// Active dailies for a user, newest first.
    pub async fn list_active(pool: &PgPool, user_id: DbId) -> Result<Vec<Daily>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dailies
             WHERE user_id = $1 AND is_active
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Daily>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_active(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Daily>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM dailies WHERE id = $1 AND user_id = $2 AND is_active");
        sqlx::query_as::<_, Daily>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateDaily,
        difficulty: &str,
        reward: RewardAmount,
    ) -> Result<Daily, sqlx::Error> {
        let query = format!(
            "INSERT INTO dailies (user_id, title, description, difficulty, xp_reward, credits_reward)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Daily>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(difficulty)
            .bind(reward.xp)
            .bind(reward.credits)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateDaily,
    ) -> Result<Option<Daily>, sqlx::Error> {
        let query = format!(
            "UPDATE dailies SET
                title = COALESCE($3, title),
                description = COALESCE($4, description)
             WHERE id = $1 AND user_id = $2 AND is_active
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Daily>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn soft_delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE dailies SET is_active = FALSE WHERE id = $1 AND user_id = $2 AND is_active",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load and lock an active daily owned by `user_id`.
    pub async fn lock_active(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Daily>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dailies
             WHERE id = $1 AND user_id = $2 AND is_active
             FOR UPDATE"
        );
        sqlx::query_as::<_, Daily>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub async fn record_completion(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        next: &DailyStreak,
    ) -> Result<Daily, sqlx::Error> {
        let query = format!(
            "UPDATE dailies SET streak = $2, last_completed_date = $3, is_completed_today = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Daily>(&query)
            .bind(id)
            .bind(next.streak)
            .bind(next.last_completed_date)
            .bind(next.is_completed_today)
            .fetch_one(&mut **tx)
            .await
    }

    // -----------------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------------

    /// Clear `is_completed_today` on a user's active dailies.
    ///
    /// Streaks and `last_completed_date` are untouched; the same-day guard
    /// keys on the date, not this flag.
    pub async fn reset_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE dailies SET is_completed_today = FALSE
             WHERE user_id = $1 AND is_active AND is_completed_today",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Clear `is_completed_today` on every active daily.
    pub async fn reset_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE dailies SET is_completed_today = FALSE WHERE is_active AND is_completed_today",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
