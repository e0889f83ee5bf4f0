//! One-time character setup.

use questline_core::character::{
    character_name, validate_avatar, validate_primary_color, validate_username, DEFAULT_AVATAR,
    DEFAULT_PRIMARY_COLOR,
};
use questline_core::error::CoreError;
use questline_core::types::DbId;
use questline_db::models::character::{Character, SetupCharacter};
use questline_db::models::equipment::Equipment;
use questline_db::models::user::User;
use questline_db::repositories::{CharacterRepo, EquipmentRepo, UserRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize)]
pub struct CharacterSetup {
    pub user: User,
    pub character: Character,
    pub starter_item: Equipment,
}

/// Claim a username and create the user's character with its equipped
/// starter armor, all in one transaction.
///
/// A user that already has a character gets [`CoreError::Conflict`]; a
/// taken username surfaces as a `uq_users_username` violation (409).
pub async fn setup_character(
    pool: &PgPool,
    user_id: DbId,
    input: &SetupCharacter,
) -> AppResult<CharacterSetup> {
    let username = input.username.trim();
    validate_username(username)?;

    let avatar = input
        .appearance
        .avatar
        .as_deref()
        .unwrap_or(DEFAULT_AVATAR);
    validate_avatar(avatar)?;
    let primary_color = input
        .appearance
        .primary_color
        .as_deref()
        .unwrap_or(DEFAULT_PRIMARY_COLOR);
    validate_primary_color(primary_color)?;

    let mut tx = pool.begin().await?;

    // A first-time identity gets its row here. The lock serializes
    // concurrent setups for the same user.
    UserRepo::provision_and_lock(&mut tx, user_id).await?;

    if CharacterRepo::lock_by_user(&mut tx, user_id).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Character already set up".into(),
        )));
    }

    let user = UserRepo::set_username(&mut tx, user_id, username).await?;

    let specialization = input.specialization;
    let avatar_data = serde_json::json!({
        "avatar": avatar,
        "primaryColor": primary_color,
    });
    let character = CharacterRepo::create(
        &mut tx,
        user_id,
        &character_name(username),
        specialization.as_str(),
        specialization.starting_stats(),
        &avatar_data,
    )
    .await?;
    let starter_item =
        EquipmentRepo::create_starter(&mut tx, user_id, &specialization.starter_item()).await?;

    tx.commit().await?;

    tracing::info!(
        user_id,
        character_id = character.id,
        specialization = specialization.as_str(),
        "Character created",
    );

    Ok(CharacterSetup {
        user,
        character,
        starter_item,
    })
}
