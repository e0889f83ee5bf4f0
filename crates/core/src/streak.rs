//! Streak accounting for recurring activities.
//!
//! Dailies follow a calendar-day state machine keyed by the date of the last
//! completion. Habits increment on every completion with no same-day guard
//! and no gap reset.

use crate::types::{CalendarDate, Timestamp};

/// Daily fields after a successful completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyStreak {
    pub streak: i32,
    pub last_completed_date: CalendarDate,
    pub is_completed_today: bool,
}

/// Habit fields after a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitStreak {
    pub streak: i32,
    pub last_completed: Timestamp,
}

/// Rejection from the daily state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StreakError {
    #[error("already completed on {0}")]
    AlreadyCompleted(CalendarDate),
}

/// Advance a daily's streak for a completion on `today`.
///
/// - last completion is `today`: rejected.
/// - last completion is the day before `today`: `streak + 1`.
/// - never completed, or any older date: restart at `1`.
///
/// A `last_completed_date` after `today` (clock moved backwards) counts as a
/// gap and restarts the streak.
pub fn complete_daily(
    last_completed_date: Option<CalendarDate>,
    streak: i32,
    today: CalendarDate,
) -> Result<DailyStreak, StreakError> {
    let streak = match last_completed_date {
        Some(last) if last == today => return Err(StreakError::AlreadyCompleted(today)),
        Some(last) if today.pred_opt() == Some(last) => streak.saturating_add(1),
        _ => 1,
    };

    Ok(DailyStreak {
        streak,
        last_completed_date: today,
        is_completed_today: true,
    })
}

/// Advance a habit's streak. Every call increments.
pub fn complete_habit(streak: i32, now: Timestamp) -> HabitStreak {
    HabitStreak {
        streak: streak.saturating_add(1),
        last_completed: now,
    }
}
