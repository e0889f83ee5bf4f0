//! Repository for the `todos` table.
//!
//! Todos are terminal: once `is_completed` is set nothing clears it.

use questline_core::rewards::RewardAmount;
use questline_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::todo::{CreateTodo, Todo, UpdateTodo};

const COLUMNS: &str = "id, user_id, title, description, priority, xp_reward, credits_reward, \
     is_completed, completed_at, due_date, created_at, updated_at";

pub struct TodoRepo;

impl TodoRepo {
    /// All of a user's todos, newest first.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<Todo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM todos
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTodo,
        priority: &str,
        reward: RewardAmount,
    ) -> Result<Todo, sqlx::Error> {
        let query = format!(
            "INSERT INTO todos (user_id, title, description, priority, xp_reward, credits_reward, due_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(priority)
            .bind(reward.xp)
            .bind(reward.credits)
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    /// Update an incomplete todo. Returns `None` if it is missing, not
    /// owned, or already completed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                due_date = COALESCE($5, due_date)
             WHERE id = $1 AND user_id = $2 AND NOT is_completed
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_date)
            .fetch_optional(pool)
            .await
    }

    /// Hard delete. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load and lock a todo owned by `user_id`.
    pub async fn lock(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM todos WHERE id = $1 AND user_id = $2 FOR UPDATE");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub async fn mark_completed(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        completed_at: Timestamp,
    ) -> Result<Todo, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET is_completed = TRUE, completed_at = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(completed_at)
            .fetch_one(&mut **tx)
            .await
    }
}
