//! Character entity model and DTOs.

use questline_core::character::Specialization;
use questline_core::progression::CharacterProgress;
use questline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `characters` table. One per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub specialization: String,
    pub level: i32,
    pub xp: i32,
    pub xp_to_next: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub credits: i32,
    /// Stored but never advanced by completions.
    pub streak: i32,
    /// `{ "avatar": ..., "primaryColor": ... }`
    pub avatar_data: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Character {
    pub fn progress(&self) -> CharacterProgress {
        CharacterProgress {
            level: self.level,
            xp: self.xp,
            xp_to_next: self.xp_to_next,
            credits: self.credits,
        }
    }
}

/// Appearance choices made during setup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    pub avatar: Option<String>,
    pub primary_color: Option<String>,
}

/// DTO for the one-time character setup.
#[derive(Debug, Clone, Deserialize)]
pub struct SetupCharacter {
    pub username: String,
    #[serde(default)]
    pub specialization: Specialization,
    #[serde(default)]
    pub appearance: Appearance,
}
