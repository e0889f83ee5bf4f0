//! Equipment entity model and DTOs.

use questline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `equipment` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    /// Slot type: `armor`, `weapon` or `accessory`.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub slot_type: String,
    pub description: Option<String>,
    pub stats: serde_json::Value,
    pub icon: String,
    pub is_equipped: bool,
    pub cost: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(rename = "type")]
    pub slot_type: String,
    pub description: Option<String>,
    pub stats: Option<serde_json::Value>,
    pub icon: Option<String>,
    #[validate(range(min = 0))]
    pub cost: Option<i32>,
}
