//! Reward table: difficulty/priority tiers and the XP/credit amounts they yield.
//!
//! Reward amounts are computed once, when an activity is created, and stored
//! on the row. Completion reuses the stored values and never re-applies the
//! multiplier.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Tier labels
// ---------------------------------------------------------------------------

pub const DIFFICULTY_EASY: &str = "easy";
pub const DIFFICULTY_MEDIUM: &str = "medium";
pub const DIFFICULTY_HARD: &str = "hard";

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";

/// Valid `difficulty` values for habits and dailies.
pub const VALID_DIFFICULTIES: &[&str] = &[DIFFICULTY_EASY, DIFFICULTY_MEDIUM, DIFFICULTY_HARD];

/// Valid `priority` values for missions.
pub const VALID_PRIORITIES: &[&str] = &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An (XP, credits) pair, either a base value or a granted amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RewardAmount {
    pub xp: i32,
    pub credits: i32,
}

impl RewardAmount {
    pub const fn new(xp: i32, credits: i32) -> Self {
        Self { xp, credits }
    }
}

/// Default grant for an unlocked achievement.
pub const ACHIEVEMENT_REWARD: RewardAmount = RewardAmount::new(100, 50);

/// The three fixed activity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Habit,
    Daily,
    Mission,
}

impl ActivityKind {
    /// Base reward before the tier multiplier.
    pub const fn base_reward(self) -> RewardAmount {
        match self {
            ActivityKind::Habit => RewardAmount::new(25, 10),
            ActivityKind::Daily => RewardAmount::new(20, 8),
            ActivityKind::Mission => RewardAmount::new(50, 25),
        }
    }

    /// Tier labels accepted at creation time for this kind.
    pub const fn valid_tiers(self) -> &'static [&'static str] {
        match self {
            ActivityKind::Habit | ActivityKind::Daily => VALID_DIFFICULTIES,
            ActivityKind::Mission => VALID_PRIORITIES,
        }
    }

    /// Name of the tier field, for error messages.
    pub const fn tier_field(self) -> &'static str {
        match self {
            ActivityKind::Habit | ActivityKind::Daily => "difficulty",
            ActivityKind::Mission => "priority",
        }
    }

    /// Tier used when the caller omits one.
    pub const fn default_tier(self) -> &'static str {
        match self {
            ActivityKind::Habit | ActivityKind::Daily => DIFFICULTY_MEDIUM,
            ActivityKind::Mission => PRIORITY_MEDIUM,
        }
    }
}

/// Reward multiplier class shared by difficulties and priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// `easy` / `low`: x1.0
    Low,
    /// `medium`: x1.5
    Medium,
    /// `hard` / `high`: x2.0
    High,
}

impl Tier {
    /// Map any known difficulty or priority label to its tier.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            DIFFICULTY_EASY | PRIORITY_LOW => Some(Tier::Low),
            DIFFICULTY_MEDIUM => Some(Tier::Medium),
            DIFFICULTY_HARD | PRIORITY_HIGH => Some(Tier::High),
            _ => None,
        }
    }

    /// Multiplier as a fraction in halves, so `floor(base * m)` stays exact.
    const fn halves(self) -> i64 {
        match self {
            Tier::Low => 2,
            Tier::Medium => 3,
            Tier::High => 4,
        }
    }

    /// `floor(base * multiplier)`, saturating at `i32::MAX`.
    pub fn scale(self, base: i32) -> i32 {
        let scaled = (i64::from(base) * self.halves()).div_euclid(2);
        i32::try_from(scaled).unwrap_or(if scaled < 0 { i32::MIN } else { i32::MAX })
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Scale a base reward by the multiplier for `tier`.
///
/// Unknown labels fall back to the medium multiplier; this never fails.
pub fn reward_for(tier: &str, base: RewardAmount) -> RewardAmount {
    let tier = Tier::from_label(tier).unwrap_or(Tier::Medium);
    RewardAmount::new(tier.scale(base.xp), tier.scale(base.credits))
}

/// Validate `tier` for `kind` and return the reward to store on a new row.
///
/// `None` selects the kind's default tier. Returns the normalized tier label
/// alongside the reward.
pub fn creation_reward(
    kind: ActivityKind,
    tier: Option<&str>,
) -> Result<(&'static str, RewardAmount), CoreError> {
    let requested = tier.unwrap_or(kind.default_tier());
    let label = kind
        .valid_tiers()
        .iter()
        .copied()
        .find(|valid| *valid == requested)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid {} '{requested}'. Must be one of: {:?}",
                kind.tier_field(),
                kind.valid_tiers()
            ))
        })?;
    Ok((label, reward_for(label, kind.base_reward())))
}
