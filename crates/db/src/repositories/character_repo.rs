//! Repository for the `characters` table.
//!
//! Progression columns (`level`, `xp`, `xp_to_next`, `credits`) are only
//! written through [`CharacterRepo::update_progress`], inside the caller's
//! transaction and after the row has been locked.

use questline_core::character::StartingStats;
use questline_core::progression::CharacterProgress;
use questline_core::types::DbId;
use sqlx::PgPool;

use crate::models::character::Character;

const COLUMNS: &str = "id, user_id, name, specialization, level, xp, xp_to_next, hp, max_hp, \
     credits, streak, avatar_data, created_at, updated_at";

pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a level-1 character for `user_id`.
    ///
    /// Fails with `uq_characters_user_id` if the user already has one.
    pub async fn create(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
        name: &str,
        specialization: &str,
        stats: StartingStats,
        avatar_data: &serde_json::Value,
    ) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters (user_id, name, specialization, hp, max_hp, credits, avatar_data)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(user_id)
            .bind(name)
            .bind(specialization)
            .bind(stats.hp)
            .bind(stats.max_hp)
            .bind(stats.credits)
            .bind(avatar_data)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE user_id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Load and lock the user's character for the rest of the transaction.
    pub async fn lock_by_user(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE user_id = $1 FOR UPDATE");
        sqlx::query_as::<_, Character>(&query)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Persist a ledger result.
    pub async fn update_progress(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        progress: &CharacterProgress,
    ) -> Result<Character, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET level = $2, xp = $3, xp_to_next = $4, credits = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(progress.level)
            .bind(progress.xp)
            .bind(progress.xp_to_next)
            .bind(progress.credits)
            .fetch_one(&mut **tx)
            .await
    }
}
