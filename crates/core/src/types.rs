/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A calendar day with no time component. Dailies are keyed by this.
pub type CalendarDate = chrono::NaiveDate;
