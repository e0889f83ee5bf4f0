//! Repository for the `equipment` table, including the slot resolver.

use questline_core::character::StarterItem;
use questline_core::types::DbId;
use sqlx::PgPool;

use crate::models::equipment::{CreateEquipment, Equipment};

const COLUMNS: &str = "id, user_id, name, type, description, stats, icon, is_equipped, cost, \
     created_at, updated_at";

pub struct EquipmentRepo;

impl EquipmentRepo {
    /// A user's items, equipped first, then newest first.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM equipment
             WHERE user_id = $1
             ORDER BY is_equipped DESC, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Insert an unequipped item. `slot_type` must already be validated.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateEquipment,
    ) -> Result<Equipment, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment (user_id, name, type, description, stats, icon, cost)
             VALUES ($1, $2, $3, $4, COALESCE($5, '{{}}'::jsonb), COALESCE($6, 'shield'), COALESCE($7, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.slot_type)
            .bind(&input.description)
            .bind(&input.stats)
            .bind(&input.icon)
            .bind(input.cost)
            .fetch_one(pool)
            .await
    }

    /// Insert a specialization's starter item, already equipped.
    pub async fn create_starter(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
        item: &StarterItem,
    ) -> Result<Equipment, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment (user_id, name, type, description, stats, icon, is_equipped, cost)
             VALUES ($1, $2, $3, $4, $5, $6, TRUE, 0)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(user_id)
            .bind(item.name)
            .bind(item.slot)
            .bind(item.description)
            .bind(&item.stats)
            .bind(item.icon)
            .fetch_one(&mut **tx)
            .await
    }

    /// Equip `id` and unequip every other item of the same slot type.
    ///
    /// Runs in its own transaction. All of the user's items in the slot are
    /// locked in id order before any write, so concurrent equips for the
    /// same (user, type) serialize. Returns `None` if the item does not
    /// exist or is not owned by `user_id`.
    pub async fn equip(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let slot: Option<String> =
            sqlx::query_scalar("SELECT type FROM equipment WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(slot) = slot else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("SELECT id FROM equipment WHERE user_id = $1 AND type = $2 ORDER BY id FOR UPDATE")
            .bind(user_id)
            .bind(&slot)
            .execute(&mut *tx)
            .await?;

        // Unequip first so the partial unique index never sees two rows.
        sqlx::query(
            "UPDATE equipment SET is_equipped = FALSE
             WHERE user_id = $1 AND type = $2 AND id <> $3 AND is_equipped",
        )
        .bind(user_id)
        .bind(&slot)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let query =
            format!("UPDATE equipment SET is_equipped = TRUE WHERE id = $1 RETURNING {COLUMNS}");
        let equipped = sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(equipped))
    }

    /// Equipped items of one slot type. Used to check the slot invariant.
    pub async fn list_equipped_in_slot(
        pool: &PgPool,
        user_id: DbId,
        slot: &str,
    ) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM equipment
             WHERE user_id = $1 AND type = $2 AND is_equipped
             ORDER BY id"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(user_id)
            .bind(slot)
            .fetch_all(pool)
            .await
    }
}
