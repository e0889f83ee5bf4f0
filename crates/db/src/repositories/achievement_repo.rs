//! Repository for the `achievements` table.

use questline_core::rewards::RewardAmount;
use questline_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::achievement::{Achievement, UnlockAchievement};

const COLUMNS: &str = "id, user_id, name, description, icon, xp_reward, credits_reward, \
     unlocked_at, created_at, updated_at";

pub struct AchievementRepo;

impl AchievementRepo {
    /// A user's achievements, most recently unlocked first.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<Achievement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM achievements
             WHERE user_id = $1
             ORDER BY unlocked_at DESC, id DESC"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Record an unlock inside the caller's transaction.
    ///
    /// A second unlock of the same name fails with `uq_achievements_user_name`.
    pub async fn insert(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
        input: &UnlockAchievement,
        reward: RewardAmount,
        unlocked_at: Timestamp,
    ) -> Result<Achievement, sqlx::Error> {
        let query = format!(
            "INSERT INTO achievements
                (user_id, name, description, icon, xp_reward, credits_reward, unlocked_at)
             VALUES ($1, $2, $3, COALESCE($4, 'award'), $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.icon)
            .bind(reward.xp)
            .bind(reward.credits)
            .bind(unlocked_at)
            .fetch_one(&mut **tx)
            .await
    }
}
