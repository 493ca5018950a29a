//! The `Timestamp` value type and its canonical string forms.
//!
//! A `Timestamp` is a freestanding value: nothing owns it, every field is a
//! primitive, and operations either mutate one in place (`&mut Timestamp`)
//! or derive a fresh value from a borrowed one. Which family an operation
//! belongs to is stated in its doc comment. Direct field assignment performs
//! no validation; call [`update_formatted`](crate::update_formatted) to
//! restore the derived fields before using a hand-edited value.

use serde::{Deserialize, Serialize};

/// A calendar date and/or time-of-day plus derived display and relative
/// fields.
///
/// Freshly parsed values are only partially populated: `weekday`, `doy`,
/// `workweek` and the relative flags are filled in by the explicit update
/// operations, never implicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timestamp {
    /// `YYYY-MM-DD`, or `YYYY-MM` when `has_day` is false.
    pub date: String,
    /// `HH:MM`, 24-hour, empty when `has_time` is false.
    pub time: String,
    pub year: i32,
    /// 1 = January .. 12 = December.
    pub month: i32,
    pub day: i32,
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday: i32,
    pub hour: i32,
    pub minute: i32,
    /// 1-based day of year, 0 when not derivable.
    pub doy: i32,
    /// ISO-8601 week number, 0 when not derivable.
    pub workweek: i32,
    /// Whether a day component was present in the input.
    pub has_day: bool,
    /// True whenever a time is carried, even a default midnight.
    pub has_time: bool,
    pub past: bool,
    pub current: bool,
    pub future: bool,
    pub disabled: bool,
    pub current_weekday: bool,
}

/// A bare time of day without a date.
///
/// This is the explicit "time-only" value: operations that derive calendar
/// data refuse a missing date instead of guessing, so a clock reading never
/// masquerades as a `Timestamp`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: i32,
    pub minute: i32,
}

/// Canonical date string for a timestamp: zero-padded `YYYY-MM-DD`, or
/// `YYYY-MM` when no day component is carried.
pub fn get_date(timestamp: &Timestamp) -> String {
    let mut date = format!("{:04}-{:02}", timestamp.year, timestamp.month);
    if timestamp.has_day {
        date.push_str(&format!("-{:02}", timestamp.day));
    }
    date
}

/// Canonical time string for a timestamp: zero-padded `HH:MM`, or empty when
/// no time is carried.
pub fn get_time(timestamp: &Timestamp) -> String {
    if !timestamp.has_time {
        return String::new();
    }
    format!("{:02}:{:02}", timestamp.hour, timestamp.minute)
}

/// Canonical combined form `YYYY-MM-DD HH:MM`. A timestamp without a time
/// renders as midnight.
pub fn get_date_time(timestamp: &Timestamp) -> String {
    let time = if timestamp.has_time {
        get_time(timestamp)
    } else {
        String::from("00:00")
    };
    format!("{} {}", get_date(timestamp), time)
}
