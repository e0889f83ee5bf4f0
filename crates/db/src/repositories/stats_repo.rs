//! Dashboard aggregates across a user's activities.

use questline_core::clock::day_bounds;
use questline_core::types::{CalendarDate, DbId};
use sqlx::PgPool;

use crate::models::stats::UserStats;

pub struct StatsRepo;

impl StatsRepo {
    /// Counts for `user_id`, with "today" taken as the UTC day `today`.
    pub async fn for_user(
        pool: &PgPool,
        user_id: DbId,
        today: CalendarDate,
    ) -> Result<UserStats, sqlx::Error> {
        let (start, end) = day_bounds(today);
        sqlx::query_as::<_, UserStats>(
            "SELECT
                (SELECT COUNT(*) FROM habits WHERE user_id = $1 AND is_active) AS total_habits,
                (SELECT COUNT(*) FROM todos WHERE user_id = $1 AND NOT is_completed) AS active_todos,
                (SELECT COUNT(*) FROM habit_completions
                    WHERE user_id = $1 AND completed_at >= $2 AND completed_at < $3) AS completed_today,
                COALESCE((SELECT streak FROM characters WHERE user_id = $1), 0) AS streak",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await
    }
}
