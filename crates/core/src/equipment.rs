//! Equipment slot types.
//!
//! A user may own any number of items per slot type but at most one of them
//! is equipped at a time. The resolver itself runs in the repository layer
//! inside a transaction; this module only owns the vocabulary.

use crate::error::CoreError;

pub const SLOT_ARMOR: &str = "armor";
pub const SLOT_WEAPON: &str = "weapon";
pub const SLOT_ACCESSORY: &str = "accessory";

/// All valid equipment slot types.
pub const VALID_SLOT_TYPES: &[&str] = &[SLOT_ARMOR, SLOT_WEAPON, SLOT_ACCESSORY];

/// Validate that an equipment `type` is a known slot.
pub fn validate_slot_type(slot: &str) -> Result<(), CoreError> {
    if VALID_SLOT_TYPES.contains(&slot) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid equipment type '{slot}'. Must be one of: {VALID_SLOT_TYPES:?}"
        )))
    }
}

/// Validate a shop cost (credits). Zero is allowed for starter gear.
pub fn validate_cost(cost: i32) -> Result<(), CoreError> {
    if cost < 0 {
        return Err(CoreError::Validation(format!(
            "Cost must be non-negative, got {cost}"
        )));
    }
    Ok(())
}
