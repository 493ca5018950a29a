//! Parsing and construction of [`Timestamp`] values.
//!
//! The accepted text form is `YYYY-M[-D]`, optionally followed by a
//! separator and `H[:M[:S]][.fff]`. Seconds and fractions are accepted and
//! ignored. Malformed input yields `None`, never an error.

use chrono::{Datelike, Local, Timelike};

use crate::arithmetic::{update_formatted, update_relative};
use crate::timestamp::{TimeOfDay, Timestamp};

/// Cursor over the fixed-form input pattern.
struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    /// Consume one to `max` ASCII digits.
    fn digits(&mut self, max: usize) -> Option<i32> {
        let len = self
            .rest
            .bytes()
            .take(max)
            .take_while(|b| b.is_ascii_digit())
            .count();
        if len == 0 {
            return None;
        }
        let value = self.rest[..len].parse().ok()?;
        self.rest = &self.rest[len..];
        Some(value)
    }

    /// Consume exactly `n` ASCII digits.
    fn exact_digits(&mut self, n: usize) -> Option<i32> {
        let len = self
            .rest
            .bytes()
            .take(n)
            .take_while(|b| b.is_ascii_digit())
            .count();
        if len != n {
            return None;
        }
        let value = self.rest[..len].parse().ok()?;
        self.rest = &self.rest[len..];
        Some(value)
    }

    fn eat(&mut self, c: char) -> bool {
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    /// Consume a run of one or more non-digit characters (the date/time
    /// separator; a space, a `T`, anything non-numeric).
    fn separator(&mut self) -> bool {
        let len: usize = self
            .rest
            .chars()
            .take_while(|c| !c.is_ascii_digit())
            .map(char::len_utf8)
            .sum();
        if len == 0 {
            return false;
        }
        self.rest = &self.rest[len..];
        true
    }

    fn any_char(&mut self) -> Option<char> {
        let c = self.rest.chars().next()?;
        self.rest = &self.rest[c.len_utf8()..];
        Some(c)
    }
}

/// Fast low-level parser. Deriving operation: returns a minimally filled-in
/// [`Timestamp`] on match, `None` otherwise.
///
/// A missing day defaults to 1 with `has_day = false`; `has_time` is always
/// true because an absent time is a valid midnight. Weekday, day-of-year,
/// workweek and the relative flags are NOT populated; use
/// [`parse_timestamp`] for a fully formatted value. Out-of-range components
/// (month 13, day 32) are accepted here; normalization is a separate step.
pub fn parse_bare(input: &str) -> Option<Timestamp> {
    let mut scan = Scanner { rest: input };

    let year = scan.exact_digits(4)?;
    if !scan.eat('-') {
        return None;
    }
    let month = scan.digits(2)?;

    let mut day = 1;
    let mut has_day = false;
    if scan.eat('-') {
        day = scan.digits(2)?;
        has_day = true;
    }

    let mut hour = 0;
    let mut minute = 0;
    if !scan.rest.is_empty() {
        if !scan.separator() {
            return None;
        }
        hour = scan.digits(2)?;
        if scan.eat(':') {
            minute = scan.digits(2)?;
        }
        if scan.eat(':') {
            // seconds are accepted but not kept
            scan.digits(2)?;
        }
        if !scan.rest.is_empty() {
            // fractional part: one separator character, up to three digits
            scan.any_char()?;
            scan.digits(3)?;
        }
    }
    if !scan.rest.is_empty() {
        return None;
    }

    Some(Timestamp {
        date: input.to_string(),
        time: format!("{:02}:{:02}", hour, minute),
        year,
        month,
        day,
        hour,
        minute,
        has_day,
        has_time: true,
        ..Timestamp::default()
    })
}

/// High-level parser. Deriving operation: parses, formats, and optionally
/// stamps relative flags against an explicit `now`.
pub fn parse_timestamp(input: &str, now: Option<&Timestamp>) -> Option<Timestamp> {
    let mut timestamp = parse_bare(input)?;
    update_formatted(&mut timestamp);
    if let Some(now) = now {
        let use_time = timestamp.has_time;
        update_relative(&mut timestamp, now, use_time);
    }
    Some(timestamp)
}

/// Bridges a chrono date-time into a fully formatted [`Timestamp`].
///
/// The caller picks the frame of reference by what it passes: a
/// `DateTime<Utc>` for UTC fields, a `DateTime<Local>` for local fields, or
/// a `NaiveDateTime` for whatever it represents. Always carries both a day
/// and a time.
pub fn parse_native<T: Datelike + Timelike>(datetime: &T) -> Timestamp {
    let mut timestamp = Timestamp {
        year: datetime.year(),
        month: datetime.month() as i32,
        day: datetime.day() as i32,
        hour: datetime.hour() as i32,
        minute: datetime.minute() as i32,
        has_day: true,
        has_time: true,
        ..Timestamp::default()
    };
    update_formatted(&mut timestamp);
    timestamp
}

/// True iff the input matches the accepted text form.
pub fn validate_timestamp(input: &str) -> bool {
    parse_bare(input).is_some()
}

/// Alternate input forms accepted by [`parse_time`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeInput {
    /// Already minutes since midnight; passed through unchanged.
    Minutes(i64),
    /// `H[:MM[:SS]]` text; seconds are accepted and ignored.
    Text(String),
    /// An explicit clock reading.
    Clock(TimeOfDay),
}

impl From<i64> for TimeInput {
    fn from(minutes: i64) -> Self {
        TimeInput::Minutes(minutes)
    }
}

impl From<&str> for TimeInput {
    fn from(text: &str) -> Self {
        TimeInput::Text(text.to_string())
    }
}

impl From<String> for TimeInput {
    fn from(text: String) -> Self {
        TimeInput::Text(text)
    }
}

impl From<TimeOfDay> for TimeInput {
    fn from(clock: TimeOfDay) -> Self {
        TimeInput::Clock(clock)
    }
}

/// Parses a time-of-day into minutes since midnight.
///
/// Returns `None` on unparsable text. Callers must check explicitly; `0` is
/// a valid result (midnight).
pub fn parse_time(input: impl Into<TimeInput>) -> Option<i64> {
    match input.into() {
        TimeInput::Minutes(minutes) => Some(minutes),
        TimeInput::Text(text) => parse_time_text(&text),
        TimeInput::Clock(clock) => Some(i64::from(clock.hour) * 60 + i64::from(clock.minute)),
    }
}

fn parse_time_text(input: &str) -> Option<i64> {
    let start = input.find(|c: char| c.is_ascii_digit())?;
    let mut scan = Scanner {
        rest: &input[start..],
    };
    let hour = scan.digits(2)?;
    let minute = if scan.eat(':') {
        scan.digits(2).unwrap_or(0)
    } else {
        0
    };
    Some(i64::from(hour) * 60 + i64::from(minute))
}

/// Today's local date as `YYYY-MM-DD`.
///
/// This is the engine's only clock read. Resolve it once per logical "now"
/// and pass the resulting timestamp explicitly; never re-read mid
/// computation.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
