//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Methods that participate in a
//! caller-owned transaction take `&mut sqlx::Transaction<'_, Postgres>`
//! instead and never commit.

pub mod achievement_repo;
pub mod character_repo;
pub mod daily_repo;
pub mod equipment_repo;
pub mod habit_repo;
pub mod reward_repo;
pub mod stats_repo;
pub mod todo_repo;
pub mod user_repo;

pub use achievement_repo::AchievementRepo;
pub use character_repo::CharacterRepo;
pub use daily_repo::DailyRepo;
pub use equipment_repo::EquipmentRepo;
pub use habit_repo::HabitRepo;
pub use reward_repo::RewardRepo;
pub use stats_repo::StatsRepo;
pub use todo_repo::TodoRepo;
pub use user_repo::UserRepo;
