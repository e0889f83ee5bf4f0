//! Repository for the `rewards` table (the credit shop).

use questline_core::types::DbId;
use sqlx::PgPool;

use crate::models::reward::{CreateShopReward, ShopReward};

const COLUMNS: &str =
    "id, user_id, title, description, cost, icon, is_available, created_at, updated_at";

pub struct RewardRepo;

impl RewardRepo {
    /// Available rewards for a user, cheapest first.
    pub async fn list_available(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ShopReward>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rewards
             WHERE user_id = $1 AND is_available
             ORDER BY cost ASC, id ASC"
        );
        sqlx::query_as::<_, ShopReward>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateShopReward,
    ) -> Result<ShopReward, sqlx::Error> {
        let query = format!(
            "INSERT INTO rewards (user_id, title, description, cost, icon)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'gift'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShopReward>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.cost)
            .bind(&input.icon)
            .fetch_one(pool)
            .await
    }

    /// An available reward owned by `user_id`, share-locked so it cannot be
    /// withdrawn mid-purchase.
    pub async fn find_available_for_purchase(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<ShopReward>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rewards
             WHERE id = $1 AND user_id = $2 AND is_available
             FOR SHARE"
        );
        sqlx::query_as::<_, ShopReward>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await
    }
}
