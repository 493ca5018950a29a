//! Day-list and interval-list builders plus the disabled-date rules they
//! apply.
//!
//! Disabled-date configuration is compiled once up front: rule strings are
//! parsed into day identifiers and structural mistakes fail loudly, so the
//! per-day check inside a list walk is a handful of integer comparisons.

use serde::{Deserialize, Serialize};

use crate::arithmetic::{update_formatted, update_minutes, update_relative};
use crate::compare::day_identifier;
use crate::constants::{ALL_WEEKDAYS, DAYS_IN_WEEK};
use crate::error::{TimegridError, TimegridResult};
use crate::navigation::{relative_days, Direction};
use crate::parse::parse_bare;
use crate::timestamp::Timestamp;

/// Per-weekday jump distances for a weekday filter.
///
/// Slot `k` holds the number of consecutive days from weekday `k` to the
/// next weekday present in `weekdays` (wrapping), or 0 when `k` itself is
/// excluded. Lets a day walk jump over excluded weekdays without scanning.
pub fn weekday_skips(weekdays: &[i32]) -> [i32; 7] {
    let mut filled = [false; 7];
    for &weekday in weekdays {
        if (0..DAYS_IN_WEEK).contains(&weekday) {
            filled[weekday as usize] = true;
        }
    }
    let mut skips = [0; 7];
    for k in 0..7 {
        if !filled[k] {
            continue;
        }
        let mut skip = 1;
        for j in 1..7 {
            if filled[(k + j) % 7] {
                break;
            }
            skip += 1;
        }
        skips[k] = skip;
    }
    skips
}

/// One entry of the disabled-days configuration: a single date or an
/// inclusive range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisabledDay {
    Single(String),
    Range(String, String),
}

/// Compiled disabled-date rules.
///
/// Rules short-circuit in order: before, after, weekday, explicit days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisabledRules {
    before: Option<i64>,
    after: Option<i64>,
    weekdays: Vec<i32>,
    days: Vec<(i64, i64)>,
}

impl DisabledRules {
    /// Compiles rule strings into day identifiers.
    ///
    /// A rule date that does not parse is a caller-configuration bug, not
    /// user input, and fails loudly.
    pub fn compile(
        before: Option<&str>,
        after: Option<&str>,
        weekdays: &[i32],
        days: &[DisabledDay],
    ) -> TimegridResult<Self> {
        let before = before.map(rule_identifier).transpose()?;
        let after = after.map(rule_identifier).transpose()?;
        let days = days
            .iter()
            .map(|day| match day {
                DisabledDay::Single(date) => {
                    let id = rule_identifier(date)?;
                    Ok((id, id))
                }
                DisabledDay::Range(start, end) => {
                    let ids = (rule_identifier(start), rule_identifier(end));
                    match ids {
                        (Ok(start), Ok(end)) => Ok((start, end)),
                        _ => Err(TimegridError::InvalidRuleRange {
                            start: start.clone(),
                            end: end.clone(),
                        }),
                    }
                }
            })
            .collect::<TimegridResult<Vec<_>>>()?;

        Ok(DisabledRules {
            before,
            after,
            weekdays: weekdays.to_vec(),
            days,
        })
    }
}

fn rule_identifier(date: &str) -> TimegridResult<i64> {
    let timestamp =
        parse_bare(date).ok_or_else(|| TimegridError::InvalidRuleDate(date.to_string()))?;
    Ok(day_identifier(&timestamp))
}

/// In-place operation: sets `disabled` when the timestamp falls under any
/// compiled rule. The first matching rule wins; later rules are not
/// consulted.
pub fn update_disabled(timestamp: &mut Timestamp, rules: &DisabledRules) {
    let own = day_identifier(timestamp);

    if let Some(before) = rules.before {
        if own <= before {
            timestamp.disabled = true;
            return;
        }
    }
    if let Some(after) = rules.after {
        if own >= after {
            timestamp.disabled = true;
            return;
        }
    }
    if rules.weekdays.contains(&timestamp.weekday) {
        timestamp.disabled = true;
        return;
    }
    for &(start, end) in &rules.days {
        if own >= start && own <= end {
            timestamp.disabled = true;
            return;
        }
    }
}

/// Deriving operation: the list of days from `start` through `end`,
/// filtered by `skips`, each fully formatted, stamped relative to `now`,
/// and checked against `rules`.
///
/// The walk stops once the day identifier passes `end` AND at least `min`
/// days were collected (`min` pads a view out to a fixed grid even past the
/// logical end), or once `max` days were collected, whichever comes first.
/// Empty when `end` precedes `start`.
pub fn create_day_list(
    start: &Timestamp,
    end: &Timestamp,
    now: &Timestamp,
    skips: &[i32; 7],
    rules: &DisabledRules,
    max: usize,
    min: usize,
) -> Vec<Timestamp> {
    let stop = day_identifier(end);
    let mut days: Vec<Timestamp> = Vec::new();

    if stop < day_identifier(start) {
        return days;
    }

    let mut current = start.clone();
    let mut stopped = false;

    while days.len() < max {
        let current_id = day_identifier(&current);
        stopped = stopped || (current_id > stop && days.len() >= min);
        if stopped {
            break;
        }
        let skip = skips
            .get(current.weekday.rem_euclid(DAYS_IN_WEEK) as usize)
            .copied()
            .unwrap_or(0);
        if skip == 0 {
            relative_days(&mut current, Direction::Forward, 1, &ALL_WEEKDAYS);
            continue;
        }
        let mut day = current.clone();
        update_formatted(&mut day);
        update_relative(&mut day, now, false);
        update_disabled(&mut day, rules);
        days.push(day);
        relative_days(&mut current, Direction::Forward, 1, &ALL_WEEKDAYS);
    }

    days
}

/// Deriving operation: `count` timestamps on the same date as `timestamp`,
/// at `(first + i) * minutes_per_interval` minutes past midnight.
pub fn create_interval_list(
    timestamp: &Timestamp,
    first: i64,
    minutes_per_interval: i64,
    count: usize,
    now: Option<&Timestamp>,
) -> Vec<Timestamp> {
    let mut intervals = Vec::with_capacity(count);
    for i in 0..count {
        let minutes = (first + i as i64) * minutes_per_interval;
        let mut interval = timestamp.clone();
        update_minutes(&mut interval, minutes, now);
        intervals.push(interval);
    }
    intervals
}
