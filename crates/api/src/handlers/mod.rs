//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers authenticate via the RBAC extractors, delegate to the
//! repositories in `questline_db` or the [`engine`](crate::engine), and map
//! errors via [`AppError`](crate::error::AppError).

pub mod achievements;
pub mod admin;
pub mod character;
pub mod dailies;
pub mod equipment;
pub mod habits;
pub mod profile;
pub mod rewards;
pub mod stats;
pub mod todos;
