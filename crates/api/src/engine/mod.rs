//! Multi-row state transitions that must commit atomically.
//!
//! - [`completion`] -- habit, daily and todo completion with XP/credit grants.
//! - [`shop`] -- spending credits on a shop reward.
//! - [`onboarding`] -- one-time character setup.

pub mod completion;
pub mod onboarding;
pub mod shop;
