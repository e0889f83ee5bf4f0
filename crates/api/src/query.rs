//! Shared query parameter types for API handlers.

use questline_core::types::CalendarDate;
use serde::Deserialize;

/// `?date=YYYY-MM-DD` filter for completion history. Dates are UTC days.
#[derive(Debug, Deserialize)]
pub struct DateFilterParams {
    pub date: Option<CalendarDate>,
}
