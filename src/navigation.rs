//! Day-stepping and week/month boundary navigation.
//!
//! The single-day movers are O(1): the weekday is maintained incrementally
//! instead of being recomputed, and month/year rollover consults the
//! days-in-month table only at boundaries.

use crate::arithmetic::{days_in_month, update_formatted, update_relative};
use crate::constants::{DAY_MIN, DAYS_IN_MONTH_MIN, DAYS_IN_WEEK, MONTH_MAX, MONTH_MIN};
use crate::timestamp::Timestamp;

/// Which way a search or step moves through the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Applies one day step in this direction.
    pub fn step(self, timestamp: &mut Timestamp) {
        match self {
            Direction::Forward => next_day(timestamp),
            Direction::Backward => prev_day(timestamp),
        }
    }
}

/// In-place operation: advances to the next day, rolling into the next
/// month/year at boundaries.
pub fn next_day(timestamp: &mut Timestamp) {
    timestamp.day += 1;
    timestamp.weekday = (timestamp.weekday + 1).rem_euclid(DAYS_IN_WEEK);
    if timestamp.day > DAYS_IN_MONTH_MIN
        && timestamp.day > days_in_month(timestamp.year, timestamp.month)
    {
        timestamp.day = DAY_MIN;
        timestamp.month += 1;
        if timestamp.month > MONTH_MAX {
            timestamp.month = MONTH_MIN;
            timestamp.year += 1;
        }
    }
}

/// In-place operation: retreats to the previous day, rolling onto the last
/// day of the previous month/year at boundaries.
pub fn prev_day(timestamp: &mut Timestamp) {
    timestamp.day -= 1;
    timestamp.weekday = (timestamp.weekday + 6).rem_euclid(DAYS_IN_WEEK);
    if timestamp.day < DAY_MIN {
        timestamp.month -= 1;
        if timestamp.month < MONTH_MIN {
            timestamp.year -= 1;
            timestamp.month = MONTH_MAX;
        }
        timestamp.day = days_in_month(timestamp.year, timestamp.month);
    }
}

/// In-place operation: moves `days` steps in `direction`, where steps that
/// land on a weekday absent from `allowed_weekdays` do not count.
///
/// Starting on an excluded Sunday and moving forward adds one extra day up
/// front, compensating for the weekly wraparound when Sunday is excluded. A
/// filter naming all seven weekdays short-circuits the membership checks.
pub fn relative_days(
    timestamp: &mut Timestamp,
    direction: Direction,
    days: i32,
    allowed_weekdays: &[i32],
) {
    let mut days = days;
    if !allowed_weekdays.contains(&timestamp.weekday)
        && timestamp.weekday == 0
        && direction == Direction::Forward
    {
        days += 1;
    }
    while days > 0 {
        days -= 1;
        direction.step(timestamp);
        if allowed_weekdays.len() < DAYS_IN_WEEK as usize
            && !allowed_weekdays.contains(&timestamp.weekday)
        {
            days += 1;
        }
    }
}

/// Alias of [`relative_days`].
pub fn move_relative_days(
    timestamp: &mut Timestamp,
    direction: Direction,
    days: i32,
    allowed_weekdays: &[i32],
) {
    relative_days(timestamp, direction, days, allowed_weekdays)
}

/// In-place operation: steps in `direction` until the weekday matches
/// `weekday`, giving up after `max_days` steps.
///
/// The bound keeps a malformed filter from looping forever; 6 steps reach
/// any weekday from any other.
pub fn find_weekday(timestamp: &mut Timestamp, weekday: i32, direction: Direction, max_days: i32) {
    let mut remaining = max_days;
    while timestamp.weekday != weekday && remaining > 0 {
        remaining -= 1;
        direction.step(timestamp);
    }
}

/// Deriving operation: the start of the week containing `timestamp`, where
/// `weekdays[0]` is the configured first weekday.
///
/// On the first of a month, or on a Sunday, first advances onto an allowed
/// weekday (months can start mid-filtered-week), then searches backward.
/// An empty weekday configuration returns the input unchanged. When `today`
/// is given the result carries relative flags.
pub fn start_of_week(
    timestamp: &Timestamp,
    weekdays: &[i32],
    today: Option<&Timestamp>,
) -> Timestamp {
    let mut start = timestamp.clone();
    let Some(&first) = weekdays.first() else {
        return start;
    };
    if start.day == DAY_MIN || start.weekday == 0 {
        for _ in 0..DAYS_IN_WEEK {
            if weekdays.contains(&start.weekday) {
                break;
            }
            next_day(&mut start);
        }
    }
    find_weekday(&mut start, first, Direction::Backward, 6);
    update_formatted(&mut start);
    if let Some(today) = today {
        let use_time = start.has_time;
        update_relative(&mut start, today, use_time);
    }
    start
}

/// Deriving operation: the end of the week containing `timestamp`, where
/// `weekdays[last]` is the configured last weekday. Symmetric to
/// [`start_of_week`].
pub fn end_of_week(
    timestamp: &Timestamp,
    weekdays: &[i32],
    today: Option<&Timestamp>,
) -> Timestamp {
    let mut end = timestamp.clone();
    let Some(&last) = weekdays.last() else {
        return end;
    };
    let last_day = days_in_month(end.year, end.month);
    if end.day == last_day || end.weekday == 6 {
        for _ in 0..DAYS_IN_WEEK {
            if weekdays.contains(&end.weekday) {
                break;
            }
            prev_day(&mut end);
        }
    }
    find_weekday(&mut end, last, Direction::Forward, 6);
    update_formatted(&mut end);
    if let Some(today) = today {
        let use_time = end.has_time;
        update_relative(&mut end, today, use_time);
    }
    end
}

/// Deriving operation: the first day of the timestamp's month.
pub fn start_of_month(timestamp: &Timestamp) -> Timestamp {
    let mut start = timestamp.clone();
    start.day = DAY_MIN;
    update_formatted(&mut start);
    start
}

/// Deriving operation: the last day of the timestamp's month.
pub fn end_of_month(timestamp: &Timestamp) -> Timestamp {
    let mut end = timestamp.clone();
    end.day = days_in_month(end.year, end.month);
    update_formatted(&mut end);
    end
}
