//! Completion orchestrator.
//!
//! Each completion runs in one transaction that locks the activity row,
//! then the character row, and writes both (plus the habit audit row)
//! before committing. Returning early drops the transaction, which rolls
//! it back, so a failed completion never leaves partial state.
//!
//! Achievement unlocks grant through the same ledger path.

use std::sync::Arc;

use questline_core::clock::Clock;
use questline_core::error::CoreError;
use questline_core::progression::{apply_reward, LevelUpPolicy};
use questline_core::rewards::{RewardAmount, ACHIEVEMENT_REWARD};
use questline_core::streak::{self, StreakError};
use questline_core::types::DbId;
use questline_db::models::achievement::{Achievement, UnlockAchievement};
use questline_db::models::character::Character;
use questline_db::models::daily::Daily;
use questline_db::models::habit::{Habit, HabitCompletion};
use questline_db::models::todo::Todo;
use questline_db::repositories::{AchievementRepo, CharacterRepo, DailyRepo, HabitRepo, TodoRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// What a completion did to the character.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub character: Character,
    pub granted: RewardAmount,
    pub levels_gained: i32,
    pub leveled_up: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HabitReceipt {
    pub habit: Habit,
    pub completion: HabitCompletion,
    pub progress: ProgressReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyReceipt {
    pub daily: Daily,
    pub progress: ProgressReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct TodoReceipt {
    pub todo: Todo,
    pub progress: ProgressReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct AchievementReceipt {
    pub achievement: Achievement,
    pub progress: ProgressReport,
}

/// Applies completions and their rewards. Held in
/// [`AppState`](crate::state::AppState) as an `Arc<CompletionOrchestrator>`.
pub struct CompletionOrchestrator {
    pool: PgPool,
    clock: Arc<dyn Clock>,
    policy: LevelUpPolicy,
}

impl CompletionOrchestrator {
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>, policy: LevelUpPolicy) -> Self {
        Self {
            pool,
            clock,
            policy,
        }
    }

    /// Complete a habit. Always succeeds for an active, owned habit: the
    /// streak increments and an audit row is appended on every call.
    pub async fn complete_habit(&self, user_id: DbId, habit_id: DbId) -> AppResult<HabitReceipt> {
        let now = self.clock.now();
        let mut tx = self.pool.begin().await?;

        let habit = HabitRepo::lock_active(&mut tx, habit_id, user_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Habit",
                id: habit_id,
            }))?;

        let next = streak::complete_habit(habit.streak, now);
        let granted = RewardAmount::new(habit.xp_reward, habit.credits_reward);

        let habit = HabitRepo::record_completion(&mut tx, habit.id, &next).await?;
        let progress = self.grant(&mut tx, user_id, granted).await?;
        let completion =
            HabitRepo::insert_completion(&mut tx, habit.id, user_id, now, granted).await?;

        tx.commit().await?;

        tracing::info!(
            user_id,
            habit_id,
            streak = habit.streak,
            xp = granted.xp,
            credits = granted.credits,
            "Habit completed",
        );

        Ok(HabitReceipt {
            habit,
            completion,
            progress,
        })
    }

    /// Complete a daily for the clock's current calendar day.
    ///
    /// A second completion on the same day fails with
    /// [`CoreError::AlreadyCompleted`] and changes nothing.
    pub async fn complete_daily(&self, user_id: DbId, daily_id: DbId) -> AppResult<DailyReceipt> {
        let today = self.clock.today();
        let mut tx = self.pool.begin().await?;

        let daily = DailyRepo::lock_active(&mut tx, daily_id, user_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Daily",
                id: daily_id,
            }))?;

        let next = streak::complete_daily(daily.last_completed_date, daily.streak, today)
            .map_err(|StreakError::AlreadyCompleted(_)| {
                tracing::debug!(user_id, daily_id, %today, "Daily already completed today");
                AppError::Core(CoreError::AlreadyCompleted {
                    entity: "Daily",
                    id: daily_id,
                })
            })?;
        let granted = RewardAmount::new(daily.xp_reward, daily.credits_reward);

        let daily = DailyRepo::record_completion(&mut tx, daily.id, &next).await?;
        let progress = self.grant(&mut tx, user_id, granted).await?;

        tx.commit().await?;

        tracing::info!(
            user_id,
            daily_id,
            streak = daily.streak,
            %today,
            xp = granted.xp,
            credits = granted.credits,
            "Daily completed",
        );

        Ok(DailyReceipt { daily, progress })
    }

    /// Complete a todo. Completion is terminal.
    pub async fn complete_todo(&self, user_id: DbId, todo_id: DbId) -> AppResult<TodoReceipt> {
        let now = self.clock.now();
        let mut tx = self.pool.begin().await?;

        let todo = TodoRepo::lock(&mut tx, todo_id, user_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Todo",
                id: todo_id,
            }))?;

        if todo.is_completed {
            return Err(AppError::Core(CoreError::AlreadyCompleted {
                entity: "Todo",
                id: todo_id,
            }));
        }
        let granted = RewardAmount::new(todo.xp_reward, todo.credits_reward);

        let todo = TodoRepo::mark_completed(&mut tx, todo.id, now).await?;
        let progress = self.grant(&mut tx, user_id, granted).await?;

        tx.commit().await?;

        tracing::info!(
            user_id,
            todo_id,
            xp = granted.xp,
            credits = granted.credits,
            "Todo completed",
        );

        Ok(TodoReceipt { todo, progress })
    }

    /// Unlock a named achievement and grant its reward.
    ///
    /// Unlocking the same name twice is a 409 (`uq_achievements_user_name`)
    /// and grants nothing the second time.
    pub async fn unlock_achievement(
        &self,
        user_id: DbId,
        input: &UnlockAchievement,
    ) -> AppResult<AchievementReceipt> {
        let granted = RewardAmount::new(
            input.xp_reward.unwrap_or(ACHIEVEMENT_REWARD.xp),
            input.credits_reward.unwrap_or(ACHIEVEMENT_REWARD.credits),
        );
        let mut tx = self.pool.begin().await?;

        // No activity row here: the character lock comes first.
        if CharacterRepo::lock_by_user(&mut tx, user_id).await?.is_none() {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Character",
                id: user_id,
            }));
        }

        let achievement =
            AchievementRepo::insert(&mut tx, user_id, input, granted, self.clock.now()).await?;
        let progress = self.grant(&mut tx, user_id, granted).await?;

        tx.commit().await?;

        tracing::info!(
            user_id,
            achievement_id = achievement.id,
            name = %achievement.name,
            xp = granted.xp,
            credits = granted.credits,
            "Achievement unlocked",
        );

        Ok(AchievementReceipt {
            achievement,
            progress,
        })
    }

    /// Lock the user's character, apply `granted` and persist the result.
    async fn grant(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
        granted: RewardAmount,
    ) -> AppResult<ProgressReport> {
        let character = CharacterRepo::lock_by_user(tx, user_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Character",
                id: user_id,
            }))?;

        let outcome = apply_reward(character.progress(), granted, self.policy);
        let character = CharacterRepo::update_progress(tx, character.id, &outcome.progress).await?;

        if outcome.leveled_up() {
            tracing::info!(
                user_id,
                character_id = character.id,
                level = character.level,
                levels_gained = outcome.levels_gained,
                xp_to_next = character.xp_to_next,
                "Character leveled up",
            );
        }

        Ok(ProgressReport {
            character,
            granted,
            levels_gained: outcome.levels_gained,
            leveled_up: outcome.leveled_up(),
        })
    }
}
