//! Repository for the `users` table.

use questline_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{UpsertUser, User};

const COLUMNS: &str =
    "id, username, email, first_name, last_name, profile_image_url, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert or refresh the user identified by the token subject `id`.
    ///
    /// Profile fields left as `None` keep their stored value.
    pub async fn upsert(pool: &PgPool, id: DbId, input: &UpsertUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, email, first_name, last_name, profile_image_url)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET
                email = COALESCE(EXCLUDED.email, users.email),
                first_name = COALESCE(EXCLUDED.first_name, users.first_name),
                last_name = COALESCE(EXCLUDED.last_name, users.last_name),
                profile_image_url = COALESCE(EXCLUDED.profile_image_url, users.profile_image_url)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.profile_image_url)
            .fetch_one(pool)
            .await
    }

    /// The user row for `id`, created empty on first sight.
    pub async fn ensure(pool: &PgPool, id: DbId) -> Result<User, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                INSERT INTO users (id) VALUES ($1)
                ON CONFLICT (id) DO NOTHING
                RETURNING {COLUMNS}
             )
             SELECT {COLUMNS} FROM inserted
             UNION ALL
             SELECT {COLUMNS} FROM users WHERE id = $1
             LIMIT 1"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Create the row for `id` if missing, then lock it for the rest of the
    /// transaction.
    pub async fn provision_and_lock(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<User, sqlx::Error> {
        sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .execute(&mut **tx)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Set the in-game username. Fails with `uq_users_username` on a clash.
    pub async fn set_username(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        username: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!("UPDATE users SET username = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(username)
            .fetch_one(&mut **tx)
            .await
    }
}
