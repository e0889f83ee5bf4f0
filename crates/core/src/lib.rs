//! Domain logic for the Questline progression engine.
//!
//! This crate has zero internal deps and no I/O: every function here is a
//! deterministic state transition that the `db` and `api` crates persist.

pub mod character;
pub mod clock;
pub mod equipment;
pub mod error;
pub mod progression;
pub mod rewards;
pub mod roles;
pub mod streak;
pub mod types;
