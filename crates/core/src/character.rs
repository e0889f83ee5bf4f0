//! Character creation rules: specializations, starting stats, appearance,
//! and the starter item each specialization receives.

use serde::{Deserialize, Serialize};

use crate::equipment::SLOT_ARMOR;
use crate::error::CoreError;
use crate::progression::CharacterProgress;

/// Username length bounds (inclusive), counted in characters.
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;

/// Prefix of every generated character name.
pub const CHARACTER_NAME_PREFIX: &str = "CYBER-";

pub const VALID_AVATARS: &[&str] = &["cyber_punk", "neon_ghost", "data_warrior", "code_ninja"];
pub const VALID_PRIMARY_COLORS: &[&str] =
    &["neon_blue", "electric_purple", "cyber_yellow", "matrix_green"];

pub const DEFAULT_AVATAR: &str = "cyber_punk";
pub const DEFAULT_PRIMARY_COLOR: &str = "neon_blue";

// ---------------------------------------------------------------------------
// Specialization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialization {
    #[default]
    Netrunner,
    StreetSamurai,
    Techie,
    Solo,
}

/// Starting hit points and credits for a specialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartingStats {
    pub hp: i32,
    pub max_hp: i32,
    pub credits: i32,
}

/// The armor piece a new character starts with, equipped.
#[derive(Debug, Clone, PartialEq)]
pub struct StarterItem {
    pub name: &'static str,
    pub slot: &'static str,
    pub description: &'static str,
    pub stats: serde_json::Value,
    pub icon: &'static str,
}

impl Specialization {
    pub fn as_str(self) -> &'static str {
        match self {
            Specialization::Netrunner => "netrunner",
            Specialization::StreetSamurai => "street_samurai",
            Specialization::Techie => "techie",
            Specialization::Solo => "solo",
        }
    }

    pub fn starting_stats(self) -> StartingStats {
        let (hp, credits) = match self {
            Specialization::Netrunner => (100, 0),
            Specialization::StreetSamurai => (110, 0),
            Specialization::Techie => (100, 25),
            Specialization::Solo => (105, 10),
        };
        StartingStats {
            hp,
            max_hp: hp,
            credits,
        }
    }

    pub fn starting_progress(self) -> CharacterProgress {
        CharacterProgress::starting(self.starting_stats().credits)
    }

    pub fn starter_item(self) -> StarterItem {
        let (name, description, stats, icon) = match self {
            Specialization::Netrunner => (
                "Neural Interface v2.0",
                "+15 XP gain • +5 Focus",
                serde_json::json!({ "xpBonus": 15, "focus": 5 }),
                "cpu",
            ),
            Specialization::StreetSamurai => (
                "Combat Exoskeleton",
                "+20 Defense • +5 Strength",
                serde_json::json!({ "defense": 20, "strength": 5 }),
                "shield",
            ),
            Specialization::Techie => (
                "Multi-Tool Implant",
                "+10 Defense • +30₡ on tasks",
                serde_json::json!({ "defense": 10, "creditsBonus": 30 }),
                "wrench",
            ),
            Specialization::Solo => (
                "Tactical Processor",
                "+12 Defense • 2x Daily Streaks",
                serde_json::json!({ "defense": 12, "streakMultiplier": 2 }),
                "target",
            ),
        };
        StarterItem {
            name,
            slot: SLOT_ARMOR,
            description,
            stats,
            icon,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Usernames are 3-20 characters of ASCII letters, digits, `_` or `-`.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Username must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(CoreError::Validation(
            "Username may only contain letters, digits, '_' and '-'".to_string(),
        ));
    }
    Ok(())
}

fn validate_known(value: &str, valid: &[&str], label: &str) -> Result<(), CoreError> {
    if valid.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {label} '{value}'. Must be one of: {valid:?}"
        )))
    }
}

pub fn validate_avatar(avatar: &str) -> Result<(), CoreError> {
    validate_known(avatar, VALID_AVATARS, "avatar")
}

pub fn validate_primary_color(color: &str) -> Result<(), CoreError> {
    validate_known(color, VALID_PRIMARY_COLORS, "primary color")
}

/// Display name derived from the username, e.g. `CYBER-NEO`.
pub fn character_name(username: &str) -> String {
    format!("{CHARACTER_NAME_PREFIX}{}", username.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specialization_bonuses() {
        assert_eq!(
            Specialization::StreetSamurai.starting_stats(),
            StartingStats { hp: 110, max_hp: 110, credits: 0 }
        );
        assert_eq!(Specialization::Techie.starting_stats().credits, 25);
        assert_eq!(Specialization::Solo.starting_stats().hp, 105);
        assert_eq!(Specialization::Solo.starting_stats().credits, 10);
    }

    #[test]
    fn starting_progress_is_level_one() {
        let p = Specialization::Techie.starting_progress();
        assert_eq!((p.level, p.xp, p.xp_to_next, p.credits), (1, 0, 100, 25));
    }

    #[test]
    fn every_starter_item_is_armor() {
        for specialization in [
            Specialization::Netrunner,
            Specialization::StreetSamurai,
            Specialization::Techie,
            Specialization::Solo,
        ] {
            assert_eq!(specialization.starter_item().slot, SLOT_ARMOR);
        }
    }

    #[test]
    fn specialization_deserializes_snake_case() {
        let specialization: Specialization = serde_json::from_str("\"street_samurai\"").unwrap();
        assert_eq!(specialization, Specialization::StreetSamurai);
        assert_eq!(specialization.as_str(), "street_samurai");
    }

    #[test]
    fn username_length_bounds() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username("abc").is_ok());
        assert!(validate_username(&"a".repeat(20)).is_ok());
        assert!(validate_username(&"a".repeat(21)).is_err());
    }

    #[test]
    fn username_rejects_whitespace() {
        assert!(validate_username("neo one").is_err());
    }

    #[test]
    fn appearance_values() {
        assert!(validate_avatar("neon_ghost").is_ok());
        assert!(validate_avatar("ghost").is_err());
        assert!(validate_primary_color("matrix_green").is_ok());
        assert!(validate_primary_color("green").is_err());
    }

    #[test]
    fn name_is_uppercased_with_prefix() {
        assert_eq!(character_name("neo_1"), "CYBER-NEO_1");
    }
}
