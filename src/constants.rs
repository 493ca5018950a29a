//! Numeric tables and limits shared across the engine.

/// Days per month, 1-indexed. Index 0 is a sentinel so `month` can be used
/// directly as an index.
pub const DAYS_IN_MONTH: [i32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days per month in a leap year, 1-indexed like [`DAYS_IN_MONTH`].
pub const DAYS_IN_MONTH_LEAP: [i32; 13] = [0, 31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Cumulative days before each month in a common year, 1-indexed.
pub const DAYS_BEFORE_MONTH: [i32; 13] =
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// The shortest possible month.
pub const DAYS_IN_MONTH_MIN: i32 = 28;

pub const MONTH_MIN: i32 = 1;
pub const MONTH_MAX: i32 = 12;
pub const DAY_MIN: i32 = 1;
pub const DAYS_IN_WEEK: i32 = 7;
pub const MINUTES_IN_HOUR: i32 = 60;
pub const HOURS_IN_DAY: i32 = 24;
pub const MILLISECONDS_IN_DAY: i64 = 86_400_000;

/// Every weekday, Sunday through Saturday, in the engine's 0..=6 numbering.
/// The identity weekday filter for [`relative_days`](crate::relative_days)
/// and friends.
pub const ALL_WEEKDAYS: [i32; 7] = [0, 1, 2, 3, 4, 5, 6];
