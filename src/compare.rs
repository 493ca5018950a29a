//! Ordering identifiers, range tests, and comparisons.
//!
//! A day identifier packs (year, month, day) into one integer whose
//! component magnitudes cannot overlap for any valid calendar date, so
//! ordering and equality never fall back to string comparison. The time
//! identifier tops out at 2359, far below the day identifier's granularity
//! of 10000, which is what makes the combined identifier a sound ordering
//! key.

use chrono::{NaiveDate, NaiveDateTime};

use crate::constants::MILLISECONDS_IN_DAY;
use crate::navigation::{find_weekday, Direction};
use crate::timestamp::{get_date, get_date_time, get_time, Timestamp};

/// Monotonic integer encoding of the timestamp's date.
pub fn day_identifier(timestamp: &Timestamp) -> i64 {
    i64::from(timestamp.year) * 100_000_000
        + i64::from(timestamp.month) * 1_000_000
        + i64::from(timestamp.day) * 10_000
}

/// Monotonic integer encoding of the timestamp's time.
pub fn time_identifier(timestamp: &Timestamp) -> i64 {
    i64::from(timestamp.hour) * 100 + i64::from(timestamp.minute)
}

/// Combined date+time ordering key.
pub fn day_time_identifier(timestamp: &Timestamp) -> i64 {
    day_identifier(timestamp) + time_identifier(timestamp)
}

/// Bridges a timestamp's date into chrono, `None` when the fields do not
/// form a real calendar date.
pub fn to_naive_date(timestamp: &Timestamp) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(timestamp.year, timestamp.month as u32, timestamp.day as u32)
}

/// Bridges a timestamp's date and time into chrono.
pub fn to_naive_datetime(timestamp: &Timestamp) -> Option<NaiveDateTime> {
    to_naive_date(timestamp)?.and_hms_opt(timestamp.hour as u32, timestamp.minute as u32, 0)
}

/// Millisecond difference `b - a`.
///
/// With `strict`, a negative difference is clamped to 0 (for callers where
/// only non-negative durations are meaningful). Returns 0 when either
/// timestamp does not form a valid date.
pub fn diff_timestamp(a: &Timestamp, b: &Timestamp, strict: bool) -> i64 {
    let (Some(a), Some(b)) = (to_naive_datetime(a), to_naive_datetime(b)) else {
        return 0;
    };
    let diff = (b - a).num_milliseconds();
    if strict && diff < 0 {
        0
    } else {
        diff
    }
}

/// Whole days between `a` and `b`, never negative.
pub fn days_between(a: &Timestamp, b: &Timestamp) -> i64 {
    diff_timestamp(a, b, true).div_euclid(MILLISECONDS_IN_DAY)
}

/// Calendar weeks between `a` and `b`: both ends are first advanced to a
/// week-row boundary (the next Sunday and the next Saturday) before
/// counting.
pub fn weeks_between(a: &Timestamp, b: &Timestamp) -> i64 {
    let mut start = a.clone();
    let mut end = b.clone();
    find_weekday(&mut start, 0, Direction::Forward, 6);
    find_weekday(&mut end, 6, Direction::Forward, 6);
    let days = days_between(&start, &end);
    (days + 6) / 7
}

/// Inclusive range test by day identifier, or by combined identifier when
/// `use_time` is set.
pub fn is_between_dates(
    timestamp: &Timestamp,
    start: &Timestamp,
    end: &Timestamp,
    use_time: bool,
) -> bool {
    let key = if use_time {
        day_time_identifier
    } else {
        day_identifier
    };
    let own = key(timestamp);
    own >= key(start) && own <= key(end)
}

/// True if the inclusive ranges `[start1, end1]` and `[start2, end2]`
/// intersect. Day identifiers only; the time component is ignored.
pub fn is_overlapping_dates(
    start1: &Timestamp,
    end1: &Timestamp,
    start2: &Timestamp,
    end2: &Timestamp,
) -> bool {
    let start = day_identifier(start1);
    let end = day_identifier(end1);
    let first = day_identifier(start2);
    let last = day_identifier(end2);
    (start >= first && start <= last) // overlap left
        || (end >= first && end <= last) // overlap right
        || (first >= start && end >= last) // surrounding
}

/// The latest timestamp by day (or day+time) identifier; `None` on an empty
/// collection. Ties keep the earliest occurrence.
pub fn max_timestamp(timestamps: &[Timestamp], use_time: bool) -> Option<&Timestamp> {
    let key = if use_time {
        day_time_identifier
    } else {
        day_identifier
    };
    timestamps
        .iter()
        .reduce(|best, cur| if key(cur) > key(best) { cur } else { best })
}

/// The earliest timestamp by day (or day+time) identifier; `None` on an
/// empty collection.
pub fn min_timestamp(timestamps: &[Timestamp], use_time: bool) -> Option<&Timestamp> {
    let key = if use_time {
        day_time_identifier
    } else {
        day_identifier
    };
    timestamps
        .iter()
        .reduce(|best, cur| if key(cur) < key(best) { cur } else { best })
}

/// Date equality on the canonical `YYYY-MM-DD` form. Unrelated fields (a
/// `disabled` flag, relative flags) do not participate.
pub fn compare_date(a: &Timestamp, b: &Timestamp) -> bool {
    get_date(a) == get_date(b)
}

/// Time equality on the canonical `HH:MM` form.
pub fn compare_time(a: &Timestamp, b: &Timestamp) -> bool {
    get_time(a) == get_time(b)
}

/// Date and time equality on the canonical combined form.
pub fn compare_date_time(a: &Timestamp, b: &Timestamp) -> bool {
    get_date_time(a) == get_date_time(b)
}

/// Full structural equality over every field.
pub fn compare_timestamps(a: &Timestamp, b: &Timestamp) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_timestamp;

    fn ts(input: &str) -> Timestamp {
        parse_timestamp(input, None).expect("Should parse")
    }

    #[test]
    fn test_identifiers_order() {
        assert!(day_identifier(&ts("2024-01-31")) < day_identifier(&ts("2024-02-01")));
        assert!(day_identifier(&ts("2023-12-31")) < day_identifier(&ts("2024-01-01")));
        assert_eq!(time_identifier(&ts("2024-01-01 14:30")), 1430);
        assert_eq!(
            day_time_identifier(&ts("2024-01-01 14:30")),
            day_identifier(&ts("2024-01-01")) + 1430
        );
    }

    #[test]
    fn test_diff_timestamp() {
        let a = ts("2024-06-01 00:00");
        let b = ts("2024-06-02 01:00");
        assert_eq!(diff_timestamp(&a, &b, false), 25 * 60 * 60 * 1000);
        assert_eq!(diff_timestamp(&b, &a, false), -25 * 60 * 60 * 1000);
        assert_eq!(diff_timestamp(&b, &a, true), 0, "strict clamps negatives");
    }

    #[test]
    fn test_days_and_weeks_between() {
        assert_eq!(days_between(&ts("2024-06-01"), &ts("2024-06-15")), 14);
        assert_eq!(days_between(&ts("2024-06-15"), &ts("2024-06-01")), 0);
        // Jun 5 to Jun 18 2024 snaps to Jun 9 (Sunday) .. Jun 22 (Saturday).
        assert_eq!(weeks_between(&ts("2024-06-05"), &ts("2024-06-18")), 2);
    }

    #[test]
    fn test_is_between_dates_inclusive() {
        let start = ts("2024-06-01");
        let end = ts("2024-06-30");
        assert!(is_between_dates(&ts("2024-06-01"), &start, &end, false));
        assert!(is_between_dates(&ts("2024-06-30"), &start, &end, false));
        assert!(is_between_dates(&ts("2024-06-15"), &start, &end, false));
        assert!(!is_between_dates(&ts("2024-05-31"), &start, &end, false));
        assert!(!is_between_dates(&ts("2024-07-01"), &start, &end, false));
    }

    #[test]
    fn test_is_between_dates_with_time() {
        let start = ts("2024-06-01 09:00");
        let end = ts("2024-06-01 17:00");
        assert!(is_between_dates(&ts("2024-06-01 12:00"), &start, &end, true));
        assert!(!is_between_dates(&ts("2024-06-01 08:59"), &start, &end, true));
        assert!(
            is_between_dates(&ts("2024-06-01 08:59"), &start, &end, false),
            "day granularity ignores the time"
        );
    }

    #[test]
    fn test_is_overlapping_dates_cases() {
        let (a1, a2) = (ts("2024-06-01"), ts("2024-06-10"));
        let (b1, b2) = (ts("2024-06-05"), ts("2024-06-15"));
        let (c1, c2) = (ts("2024-06-11"), ts("2024-06-20"));
        let (d1, d2) = (ts("2024-05-01"), ts("2024-07-01"));

        assert!(is_overlapping_dates(&a1, &a2, &b1, &b2), "partial overlap");
        assert!(!is_overlapping_dates(&a1, &a2, &c1, &c2), "disjoint");
        assert!(is_overlapping_dates(&a1, &a2, &d1, &d2), "surrounded");
        assert!(is_overlapping_dates(&d1, &d2, &a1, &a2), "surrounding");
    }

    #[test]
    fn test_is_overlapping_dates_symmetry() {
        let ranges = [
            (ts("2024-06-01"), ts("2024-06-10")),
            (ts("2024-06-05"), ts("2024-06-15")),
            (ts("2024-06-11"), ts("2024-06-20")),
            (ts("2024-05-01"), ts("2024-07-01")),
        ];
        for (s1, e1) in &ranges {
            for (s2, e2) in &ranges {
                assert_eq!(
                    is_overlapping_dates(s1, e1, s2, e2),
                    is_overlapping_dates(s2, e2, s1, e1),
                    "overlap must be symmetric for [{}, {}] vs [{}, {}]",
                    s1.date, e1.date, s2.date, e2.date
                );
            }
        }
    }

    #[test]
    fn test_min_max_timestamp() {
        let list = vec![ts("2024-06-15"), ts("2024-06-01"), ts("2024-06-30")];
        assert_eq!(min_timestamp(&list, false).expect("non-empty").date, "2024-06-01");
        assert_eq!(max_timestamp(&list, false).expect("non-empty").date, "2024-06-30");
        assert!(min_timestamp(&[], false).is_none());
        assert!(max_timestamp(&[], false).is_none());
    }

    #[test]
    fn test_min_max_with_time() {
        let list = vec![ts("2024-06-01 14:00"), ts("2024-06-01 09:00")];
        assert_eq!(min_timestamp(&list, true).expect("non-empty").time, "09:00");
        assert_eq!(max_timestamp(&list, true).expect("non-empty").time, "14:00");
    }

    #[test]
    fn test_compare_families() {
        let mut a = ts("2024-06-01 10:00");
        let b = ts("2024-06-01 10:00");
        a.disabled = true;

        assert!(compare_date(&a, &b), "disabled does not affect date equality");
        assert!(compare_time(&a, &b));
        assert!(compare_date_time(&a, &b));
        assert!(!compare_timestamps(&a, &b), "structural equality sees every field");
        assert!(compare_timestamps(&b, &b.clone()));
    }
}
