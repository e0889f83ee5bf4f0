//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod achievement;
pub mod character;
pub mod daily;
pub mod equipment;
pub mod habit;
pub mod reward;
pub mod stats;
pub mod todo;
pub mod user;
