//! Integration tests for habit, daily and todo repositories.
//!
//! - Create stores the reward computed from the tier
//! - Ownership scoping on find/update/delete
//! - Soft delete hides habits and dailies from listing
//! - Daily reset primitive
//! - Completion history filtered by UTC day

use std::sync::atomic::{AtomicI64, Ordering};

use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use questline_core::rewards::{creation_reward, ActivityKind, RewardAmount};
use questline_core::streak::{complete_daily, complete_habit};
use questline_db::models::daily::{CreateDaily, UpdateDaily};
use questline_db::models::habit::{CreateHabit, UpdateHabit};
use questline_db::models::todo::{CreateTodo, UpdateTodo};
use questline_db::models::user::UpsertUser;
use questline_db::repositories::{DailyRepo, HabitRepo, StatsRepo, TodoRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

static NEXT_USER_ID: AtomicI64 = AtomicI64::new(1);

async fn new_user(pool: &PgPool) -> i64 {
    let id = NEXT_USER_ID.fetch_add(1, Ordering::Relaxed);
    UserRepo::upsert(pool, id, &UpsertUser::default())
        .await
        .unwrap()
        .id
}

fn new_habit(title: &str) -> CreateHabit {
    CreateHabit {
        title: title.to_string(),
        description: None,
        difficulty: None,
        color: None,
    }
}

fn new_daily(title: &str) -> CreateDaily {
    CreateDaily {
        title: title.to_string(),
        description: None,
        difficulty: None,
    }
}

fn new_todo(title: &str) -> CreateTodo {
    CreateTodo {
        title: title.to_string(),
        description: None,
        priority: None,
        due_date: None,
    }
}

async fn create_habit(pool: &PgPool, user_id: i64, title: &str, tier: Option<&str>) -> i64 {
    let (difficulty, reward) = creation_reward(ActivityKind::Habit, tier).unwrap();
    HabitRepo::create(pool, user_id, &new_habit(title), difficulty, reward)
        .await
        .unwrap()
        .id
}

async fn create_daily(pool: &PgPool, user_id: i64, title: &str) -> i64 {
    let (difficulty, reward) = creation_reward(ActivityKind::Daily, None).unwrap();
    DailyRepo::create(pool, user_id, &new_daily(title), difficulty, reward)
        .await
        .unwrap()
        .id
}

// ---------------------------------------------------------------------------
// Habits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_habit_create_stores_tier_reward(pool: PgPool) {
    let user_id = new_user(&pool).await;
    let (difficulty, reward) = creation_reward(ActivityKind::Habit, Some("hard")).unwrap();
    let habit = HabitRepo::create(&pool, user_id, &new_habit("Push-ups"), difficulty, reward)
        .await
        .unwrap();

    assert_eq!(habit.difficulty, "hard");
    assert_eq!((habit.xp_reward, habit.credits_reward), (50, 20));
    assert_eq!(habit.streak, 0);
    assert_eq!(habit.color, "primary");
    assert!(habit.is_active);
    assert!(habit.last_completed.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_habit_update_never_touches_rewards(pool: PgPool) {
    let user_id = new_user(&pool).await;
    let id = create_habit(&pool, user_id, "Read", Some("easy")).await;

    let update = UpdateHabit {
        title: Some("Read 20 pages".to_string()),
        description: None,
        color: Some("accent".to_string()),
    };
    let habit = HabitRepo::update(&pool, id, user_id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(habit.title, "Read 20 pages");
    assert_eq!(habit.color, "accent");
    assert_eq!((habit.xp_reward, habit.credits_reward), (25, 10));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_habit_scoped_to_owner(pool: PgPool) {
    let owner = new_user(&pool).await;
    let other = new_user(&pool).await;
    let id = create_habit(&pool, owner, "Meditate", None).await;

    assert!(HabitRepo::find_active(&pool, id, other).await.unwrap().is_none());
    assert!(!HabitRepo::soft_delete(&pool, id, other).await.unwrap());
    let update = UpdateHabit {
        title: Some("hijacked".to_string()),
        description: None,
        color: None,
    };
    assert!(HabitRepo::update(&pool, id, other, &update).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_habit_soft_delete_hides_and_blocks_lock(pool: PgPool) {
    let user_id = new_user(&pool).await;
    let kept = create_habit(&pool, user_id, "Kept", None).await;
    let gone = create_habit(&pool, user_id, "Gone", None).await;

    assert!(HabitRepo::soft_delete(&pool, gone, user_id).await.unwrap());
    assert!(!HabitRepo::soft_delete(&pool, gone, user_id).await.unwrap());

    let listed: Vec<i64> = HabitRepo::list_active(&pool, user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|h| h.id)
        .collect();
    assert_eq!(listed, vec![kept]);

    let mut tx = pool.begin().await.unwrap();
    assert!(HabitRepo::lock_active(&mut tx, gone, user_id).await.unwrap().is_none());
    assert!(HabitRepo::lock_active(&mut tx, kept, user_id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completion_history_filters_by_utc_day(pool: PgPool) {
    let user_id = new_user(&pool).await;
    let habit_id = create_habit(&pool, user_id, "Stretch", None).await;
    let day_one = Utc.with_ymd_and_hms(2026, 4, 1, 23, 30, 0).unwrap();
    let day_two = day_one + Duration::hours(1);

    let mut tx = pool.begin().await.unwrap();
    for at in [day_one, day_two, day_two + Duration::minutes(5)] {
        HabitRepo::record_completion(&mut tx, habit_id, &complete_habit(0, at))
            .await
            .unwrap();
        HabitRepo::insert_completion(&mut tx, habit_id, user_id, at, RewardAmount::new(37, 15))
            .await
            .unwrap();
    }
    tx.commit().await.unwrap();

    let all = HabitRepo::list_completions(&pool, user_id, None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all[0].completed_at >= all[2].completed_at);

    let april_first = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
    let april_second = NaiveDate::from_ymd_opt(2026, 4, 2).unwrap();
    assert_eq!(
        HabitRepo::list_completions(&pool, user_id, Some(april_first)).await.unwrap().len(),
        1
    );
    assert_eq!(
        HabitRepo::list_completions(&pool, user_id, Some(april_second)).await.unwrap().len(),
        2
    );
}

// ---------------------------------------------------------------------------
// Dailies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_daily_defaults_to_medium_reward(pool: PgPool) {
    let user_id = new_user(&pool).await;
    let id = create_daily(&pool, user_id, "Inbox zero").await;
    let daily = DailyRepo::find_active(&pool, id, user_id).await.unwrap().unwrap();
    assert_eq!(daily.difficulty, "medium");
    assert_eq!((daily.xp_reward, daily.credits_reward), (30, 12));
    assert!(!daily.is_completed_today);
    assert!(daily.last_completed_date.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_daily_record_completion_persists_date(pool: PgPool) {
    let user_id = new_user(&pool).await;
    let id = create_daily(&pool, user_id, "Journal").await;
    let today = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();

    let mut tx = pool.begin().await.unwrap();
    let locked = DailyRepo::lock_active(&mut tx, id, user_id).await.unwrap().unwrap();
    let next = complete_daily(locked.last_completed_date, locked.streak, today).unwrap();
    let daily = DailyRepo::record_completion(&mut tx, id, &next).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(daily.streak, 1);
    assert_eq!(daily.last_completed_date, Some(today));
    assert!(daily.is_completed_today);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_daily_reset_for_user_only_touches_that_user(pool: PgPool) {
    let alice = new_user(&pool).await;
    let bob = new_user(&pool).await;
    let today = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();

    let mut ids = Vec::new();
    for user_id in [alice, bob] {
        let id = create_daily(&pool, user_id, "Water plants").await;
        let mut tx = pool.begin().await.unwrap();
        let next = complete_daily(None, 0, today).unwrap();
        DailyRepo::record_completion(&mut tx, id, &next).await.unwrap();
        tx.commit().await.unwrap();
        ids.push((user_id, id));
    }

    assert_eq!(DailyRepo::reset_for_user(&pool, alice).await.unwrap(), 1);

    let (_, alice_daily) = ids[0];
    let (_, bob_daily) = ids[1];
    let a = DailyRepo::find_active(&pool, alice_daily, alice).await.unwrap().unwrap();
    let b = DailyRepo::find_active(&pool, bob_daily, bob).await.unwrap().unwrap();
    assert!(!a.is_completed_today);
    assert_eq!(a.streak, 1, "reset keeps the streak");
    assert_eq!(a.last_completed_date, Some(today));
    assert!(b.is_completed_today);

    assert_eq!(DailyRepo::reset_all(&pool).await.unwrap(), 1);
    let b = DailyRepo::find_active(&pool, bob_daily, bob).await.unwrap().unwrap();
    assert!(!b.is_completed_today);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_daily_update_and_soft_delete(pool: PgPool) {
    let user_id = new_user(&pool).await;
    let id = create_daily(&pool, user_id, "Walk").await;
    let update = UpdateDaily {
        title: None,
        description: Some("30 minutes".to_string()),
    };
    let daily = DailyRepo::update(&pool, id, user_id, &update).await.unwrap().unwrap();
    assert_eq!(daily.title, "Walk");
    assert_eq!(daily.description.as_deref(), Some("30 minutes"));

    assert!(DailyRepo::soft_delete(&pool, id, user_id).await.unwrap());
    assert!(DailyRepo::list_active(&pool, user_id).await.unwrap().is_empty());
    assert!(DailyRepo::update(&pool, id, user_id, &update).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Todos
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_todo_completed_is_read_only(pool: PgPool) {
    let user_id = new_user(&pool).await;
    let (priority, reward) = creation_reward(ActivityKind::Mission, Some("high")).unwrap();
    let todo = TodoRepo::create(&pool, user_id, &new_todo("Ship it"), priority, reward)
        .await
        .unwrap();
    assert_eq!((todo.xp_reward, todo.credits_reward), (100, 50));

    let mut tx = pool.begin().await.unwrap();
    let now = Utc::now();
    let done = TodoRepo::mark_completed(&mut tx, todo.id, now).await.unwrap();
    tx.commit().await.unwrap();
    assert!(done.is_completed);
    assert!(done.completed_at.is_some());

    let update = UpdateTodo {
        title: Some("Ship it again".to_string()),
        description: None,
        due_date: None,
    };
    assert!(TodoRepo::update(&pool, todo.id, user_id, &update).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_todo_hard_delete(pool: PgPool) {
    let user_id = new_user(&pool).await;
    let other = new_user(&pool).await;
    let (priority, reward) = creation_reward(ActivityKind::Mission, None).unwrap();
    let todo = TodoRepo::create(&pool, user_id, &new_todo("Call mom"), priority, reward)
        .await
        .unwrap();

    assert!(!TodoRepo::delete(&pool, todo.id, other).await.unwrap());
    assert!(TodoRepo::delete(&pool, todo.id, user_id).await.unwrap());
    assert!(TodoRepo::find_by_id(&pool, todo.id, user_id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_priority_check_constraint(pool: PgPool) {
    let user_id = new_user(&pool).await;
    let result = TodoRepo::create(
        &pool,
        user_id,
        &new_todo("Bad tier"),
        "hard",
        RewardAmount::new(1, 1),
    )
    .await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stats_without_character(pool: PgPool) {
    let user_id = new_user(&pool).await;
    create_habit(&pool, user_id, "One", None).await;
    let gone = create_habit(&pool, user_id, "Two", None).await;
    HabitRepo::soft_delete(&pool, gone, user_id).await.unwrap();
    let (priority, reward) = creation_reward(ActivityKind::Mission, None).unwrap();
    TodoRepo::create(&pool, user_id, &new_todo("Open"), priority, reward)
        .await
        .unwrap();

    let today = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();
    let stats = StatsRepo::for_user(&pool, user_id, today).await.unwrap();
    assert_eq!(stats.total_habits, 1);
    assert_eq!(stats.active_todos, 1);
    assert_eq!(stats.completed_today, 0);
    assert_eq!(stats.streak, 0);
}
