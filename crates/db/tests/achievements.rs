//! Integration tests for the achievements repository.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{Duration, TimeZone, Utc};
use questline_core::rewards::{RewardAmount, ACHIEVEMENT_REWARD};
use questline_db::models::achievement::UnlockAchievement;
use questline_db::models::user::UpsertUser;
use questline_db::repositories::{AchievementRepo, UserRepo};
use sqlx::PgPool;

static NEXT_USER_ID: AtomicI64 = AtomicI64::new(1);

async fn new_user(pool: &PgPool) -> i64 {
    let id = NEXT_USER_ID.fetch_add(1, Ordering::Relaxed);
    UserRepo::upsert(pool, id, &UpsertUser::default())
        .await
        .unwrap()
        .id
}

fn unlock(name: &str) -> UnlockAchievement {
    UnlockAchievement {
        name: name.to_string(),
        description: format!("{name} unlocked"),
        icon: None,
        xp_reward: None,
        credits_reward: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_and_list_newest_first(pool: PgPool) {
    let user_id = new_user(&pool).await;
    let t0 = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();

    let mut tx = pool.begin().await.unwrap();
    let first = AchievementRepo::insert(&mut tx, user_id, &unlock("First Blood"), ACHIEVEMENT_REWARD, t0)
        .await
        .unwrap();
    AchievementRepo::insert(
        &mut tx,
        user_id,
        &unlock("Week Streak"),
        RewardAmount::new(250, 0),
        t0 + Duration::days(7),
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(first.icon, "award");
    assert_eq!((first.xp_reward, first.credits_reward), (100, 50));

    let listed = AchievementRepo::list(&pool, user_id).await.unwrap();
    let names: Vec<_> = listed.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Week Streak", "First Blood"]);
    assert_eq!(listed[0].xp_reward, 250);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_name_twice_violates_unique_constraint(pool: PgPool) {
    let user_id = new_user(&pool).await;
    let other = new_user(&pool).await;
    let now = Utc::now();

    let mut tx = pool.begin().await.unwrap();
    AchievementRepo::insert(&mut tx, user_id, &unlock("Early Bird"), ACHIEVEMENT_REWARD, now)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    // Another user may hold the same name.
    let mut tx = pool.begin().await.unwrap();
    AchievementRepo::insert(&mut tx, other, &unlock("Early Bird"), ACHIEVEMENT_REWARD, now)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    let err = AchievementRepo::insert(&mut tx, user_id, &unlock("Early Bird"), ACHIEVEMENT_REWARD, now)
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_achievements_user_name"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}
