//! User entity model and DTOs.
//!
//! Users are provisioned by the external identity provider. The row mirrors
//! the profile claims it supplies plus the in-game username chosen during
//! character setup.

use questline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Profile fields supplied by the identity provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpsertUser {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}
