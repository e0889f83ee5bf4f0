//! Progression ledger: applies earned XP and credits to a character.
//!
//! Every mutation of a character's level, XP and credits goes through the
//! pure functions in this module. Callers load a [`CharacterProgress`],
//! apply a reward, and persist the returned value.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::rewards::RewardAmount;

/// XP threshold for the first level-up of a new character.
pub const STARTING_XP_TO_NEXT: i32 = 100;

pub const POLICY_SINGLE_STEP: &str = "single_step";
pub const POLICY_CASCADE: &str = "cascade";

/// How many level-ups a single reward may trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelUpPolicy {
    /// At most one level per reward, even if XP clears the next threshold too.
    #[default]
    SingleStep,
    /// Keep levelling while XP is at or above the threshold.
    Cascade,
}

impl LevelUpPolicy {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            POLICY_SINGLE_STEP => Ok(LevelUpPolicy::SingleStep),
            POLICY_CASCADE => Ok(LevelUpPolicy::Cascade),
            other => Err(CoreError::Validation(format!(
                "Invalid level-up policy '{other}'. Must be one of: [\"{POLICY_SINGLE_STEP}\", \"{POLICY_CASCADE}\"]"
            ))),
        }
    }
}

/// The progression-relevant slice of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProgress {
    pub level: i32,
    pub xp: i32,
    pub xp_to_next: i32,
    pub credits: i32,
}

impl CharacterProgress {
    /// Level 1, no XP, default threshold, with the given starting credits.
    pub fn starting(credits: i32) -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_to_next: STARTING_XP_TO_NEXT,
            credits,
        }
    }
}

/// Result of [`apply_reward`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelOutcome {
    pub progress: CharacterProgress,
    pub levels_gained: i32,
}

impl LevelOutcome {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Threshold for the level after one with `xp_to_next`: `floor(x * 1.5)`.
///
/// Always strictly greater than the input (below `i32::MAX`), so tiny
/// thresholds cannot stall a cascade.
pub fn next_threshold(xp_to_next: i32) -> i32 {
    let scaled = i64::from(xp_to_next) * 3 / 2;
    let grown = scaled.max(i64::from(xp_to_next) + 1);
    i32::try_from(grown).unwrap_or(i32::MAX)
}

/// Apply `gain` to `progress`, resolving level-ups under `policy`.
///
/// XP is cumulative and never reset on level-up; the threshold is compared
/// against total XP. Negative gains are treated as zero so XP and credits
/// never decrease here.
pub fn apply_reward(
    progress: CharacterProgress,
    gain: RewardAmount,
    policy: LevelUpPolicy,
) -> LevelOutcome {
    let mut next = CharacterProgress {
        xp: progress.xp.saturating_add(gain.xp.max(0)),
        credits: progress.credits.saturating_add(gain.credits.max(0)),
        ..progress
    };
    let mut levels_gained = 0;

    while next.xp >= next.xp_to_next {
        let threshold = next_threshold(next.xp_to_next);
        if threshold == next.xp_to_next {
            break;
        }
        next.level = next.level.saturating_add(1);
        next.xp_to_next = threshold;
        levels_gained += 1;

        if policy == LevelUpPolicy::SingleStep {
            break;
        }
    }

    LevelOutcome {
        progress: next,
        levels_gained,
    }
}

/// Deduct `cost` credits. `None` when the balance is insufficient; there is
/// no partial deduction.
pub fn spend_credits(progress: CharacterProgress, cost: i32) -> Option<CharacterProgress> {
    if cost < 0 || progress.credits < cost {
        return None;
    }
    Some(CharacterProgress {
        credits: progress.credits - cost,
        ..progress
    })
}
