//! Calendar arithmetic: leap years, weekday and workweek computation, field
//! normalization after arbitrary deltas.
//!
//! Everything here is pure integer arithmetic over the proleptic Gregorian
//! calendar. No clock is read and no timezone is consulted; the ISO workweek
//! is therefore free of daylight-saving corrections by construction.

use crate::compare::{day_identifier, time_identifier};
use crate::constants::{
    DAYS_BEFORE_MONTH, DAYS_IN_MONTH, DAYS_IN_MONTH_LEAP, HOURS_IN_DAY, MINUTES_IN_HOUR,
    MONTH_MAX, MONTH_MIN,
};
use crate::timestamp::{get_date, get_time, Timestamp};

/// Gregorian leap-year rule, valid for all integer years.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in the given month (28/29/30/31), or 0 when `month` is outside
/// 1..=12.
pub fn days_in_month(year: i32, month: i32) -> i32 {
    if !(MONTH_MIN..=MONTH_MAX).contains(&month) {
        return 0;
    }
    if is_leap_year(year) {
        DAYS_IN_MONTH_LEAP[month as usize]
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Weekday (0 = Sunday .. 6 = Saturday) via Zeller's congruence.
///
/// Computed analytically from year/month/day; no platform date object is
/// involved. When the timestamp carries no day component the stored weekday
/// is returned unchanged.
pub fn get_weekday(timestamp: &Timestamp) -> i32 {
    if !timestamp.has_day {
        return timestamp.weekday;
    }
    // January and February count as months 13 and 14 of the previous year.
    let (year, month) = if timestamp.month <= 2 {
        (timestamp.year - 1, timestamp.month + 12)
    } else {
        (timestamp.year, timestamp.month)
    };
    let k = year.rem_euclid(100);
    let j = year.div_euclid(100);
    // h: 0 = Saturday .. 6 = Friday
    let h = (timestamp.day + (13 * (month + 1)) / 5 + k + k / 4 + j.div_euclid(4) + 5 * j)
        .rem_euclid(7);
    (h + 6) % 7
}

/// 1-based day of year, or 0 when the date fields are not derivable.
pub fn get_day_of_year(timestamp: &Timestamp) -> i32 {
    if !(MONTH_MIN..=MONTH_MAX).contains(&timestamp.month) || timestamp.day < 1 {
        return 0;
    }
    let mut doy = DAYS_BEFORE_MONTH[timestamp.month as usize] + timestamp.day;
    if timestamp.month > 2 && is_leap_year(timestamp.year) {
        doy += 1;
    }
    doy
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar.
fn days_from_civil(year: i32, month: i32, day: i32) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (i64::from(month) + 9) % 12;
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Calendar year containing the given epoch day.
fn civil_year_from_days(epoch_day: i64) -> i32 {
    let z = epoch_day + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    (y + i64::from(month <= 2)) as i32
}

/// ISO-8601 week number via the Thursday-pivot rule, or 0 when the
/// underlying date is invalid.
///
/// The week number is the distance in weeks between the Thursday of the
/// timestamp's week and the Thursday of the week containing January 4 of
/// that Thursday's year. Entirely timezone-free.
pub fn get_work_week(timestamp: &Timestamp) -> i32 {
    if timestamp.day < 1 || timestamp.day > days_in_month(timestamp.year, timestamp.month) {
        return 0;
    }
    let epoch = days_from_civil(timestamp.year, timestamp.month, timestamp.day);
    // Epoch day 0 (1970-01-01) was a Thursday; shift to a Monday-based index.
    let iso_weekday = (epoch + 3).rem_euclid(7);
    let thursday = epoch - iso_weekday + 3;

    let year = civil_year_from_days(thursday);
    let jan4 = days_from_civil(year, 1, 4);
    let first_thursday = jan4 - (jan4 + 3).rem_euclid(7) + 3;

    (1 + (thursday - first_thursday) / 7) as i32
}

/// In-place operation: recomputes `time`, `date`, `weekday`, `doy` and
/// `workweek` from the raw fields and forces `has_time`.
///
/// The canonical "make this timestamp internally consistent" step; call it
/// after any direct field mutation and before comparisons or display.
/// Idempotent.
pub fn update_formatted(timestamp: &mut Timestamp) {
    timestamp.has_time = true;
    timestamp.time = get_time(timestamp);
    timestamp.date = get_date(timestamp);
    timestamp.weekday = get_weekday(timestamp);
    timestamp.doy = get_day_of_year(timestamp);
    timestamp.workweek = get_work_week(timestamp);
}

/// In-place operation: refreshes the stored weekday only.
pub fn update_weekday(timestamp: &mut Timestamp) {
    timestamp.weekday = get_weekday(timestamp);
}

/// In-place operation: refreshes the stored day-of-year only.
pub fn update_day_of_year(timestamp: &mut Timestamp) {
    timestamp.doy = get_day_of_year(timestamp);
}

/// In-place operation: refreshes the stored workweek only.
pub fn update_work_week(timestamp: &mut Timestamp) {
    timestamp.workweek = get_work_week(timestamp);
}

/// In-place operation: stamps `past`/`current`/`future`/`current_weekday`
/// against an explicit reference `now`.
///
/// With `use_time`, two timestamps on the same day are further discriminated
/// by their time identifiers.
pub fn update_relative(timestamp: &mut Timestamp, now: &Timestamp, use_time: bool) {
    let mut reference = day_identifier(now);
    let mut own = day_identifier(timestamp);
    let mut current = reference == own;

    if timestamp.has_time && use_time && current {
        reference = time_identifier(now);
        own = time_identifier(timestamp);
        current = reference == own;
    }

    timestamp.past = own < reference;
    timestamp.current = current;
    timestamp.future = own > reference;
    timestamp.current_weekday = timestamp.weekday == now.weekday;
}

/// In-place operation: sets the time to `minutes` past midnight, refreshing
/// the time string and, when `now` is given, the relative flags.
pub fn update_minutes(timestamp: &mut Timestamp, minutes: i64, now: Option<&Timestamp>) {
    timestamp.has_time = true;
    timestamp.hour = minutes.div_euclid(i64::from(MINUTES_IN_HOUR)) as i32;
    timestamp.minute = minutes.rem_euclid(i64::from(MINUTES_IN_HOUR)) as i32;
    timestamp.time = get_time(timestamp);
    if let Some(now) = now {
        update_relative(timestamp, now, true);
    }
}

/// Signed field deltas for [`add_to_date`]. Absent fields are untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delta {
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub day: Option<i32>,
    pub hour: Option<i32>,
    pub minute: Option<i32>,
}

/// Normalization entry points, finest first.
#[derive(Clone, Copy)]
enum Unit {
    Minute,
    Hour,
    Day,
    Month,
}

impl Delta {
    /// Finest-granularity field this delta touches. Year deltas need no
    /// normalization of their own; they propagate through month handling.
    fn finest_unit(&self) -> Option<Unit> {
        if self.minute.is_some() {
            Some(Unit::Minute)
        } else if self.hour.is_some() {
            Some(Unit::Hour)
        } else if self.day.is_some() {
            Some(Unit::Day)
        } else if self.month.is_some() {
            Some(Unit::Month)
        } else {
            None
        }
    }
}

/// Deriving operation: returns a copy with each delta applied and the result
/// normalized, starting from the finest touched field and cascading any
/// overflow upward (minutes into hours, hours into days, days across month
/// boundaries, months into years).
///
/// Multi-unit overflow is handled by iterative rollover: adding 400 days or
/// 1500 minutes lands on the correct calendar day.
pub fn add_to_date(timestamp: &Timestamp, delta: Delta) -> Timestamp {
    let mut out = timestamp.clone();
    out.year += delta.year.unwrap_or(0);
    out.month += delta.month.unwrap_or(0);
    out.day += delta.day.unwrap_or(0);
    out.hour += delta.hour.unwrap_or(0);
    out.minute += delta.minute.unwrap_or(0);

    match delta.finest_unit() {
        Some(Unit::Minute) => normalize_minute(&mut out),
        Some(Unit::Hour) => normalize_hour(&mut out),
        Some(Unit::Day) => normalize_day(&mut out),
        Some(Unit::Month) => normalize_month(&mut out),
        None => {}
    }
    update_formatted(&mut out);
    out
}

fn normalize_minute(timestamp: &mut Timestamp) {
    let hours = timestamp.minute.div_euclid(MINUTES_IN_HOUR);
    if hours != 0 {
        timestamp.minute -= hours * MINUTES_IN_HOUR;
        timestamp.hour += hours;
    }
    normalize_hour(timestamp);
}

fn normalize_hour(timestamp: &mut Timestamp) {
    let days = timestamp.hour.div_euclid(HOURS_IN_DAY);
    if days != 0 {
        timestamp.hour -= days * HOURS_IN_DAY;
        timestamp.day += days;
    }
    normalize_day(timestamp);
}

fn normalize_day(timestamp: &mut Timestamp) {
    normalize_month(timestamp);
    while timestamp.day > days_in_month(timestamp.year, timestamp.month) {
        timestamp.day -= days_in_month(timestamp.year, timestamp.month);
        timestamp.month += 1;
        normalize_month(timestamp);
    }
    while timestamp.day < 1 {
        timestamp.month -= 1;
        normalize_month(timestamp);
        timestamp.day += days_in_month(timestamp.year, timestamp.month);
    }
}

fn normalize_month(timestamp: &mut Timestamp) {
    let years = (timestamp.month - 1).div_euclid(MONTH_MAX);
    if years != 0 {
        timestamp.month -= years * MONTH_MAX;
        timestamp.year += years;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_timestamp;

    fn ts(input: &str) -> Timestamp {
        parse_timestamp(input, None).expect("Should parse")
    }

    #[test]
    fn test_leap_year_table() {
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
    }

    #[test]
    fn test_leap_year_rule_over_all_integers() {
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));
        assert!(is_leap_year(-400));
    }

    #[test]
    fn test_days_in_month_invalid_month() {
        assert_eq!(days_in_month(2024, 0), 0);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn test_weekday_known_anchors() {
        assert_eq!(get_weekday(&ts("2024-01-01")), 1, "a Monday");
        assert_eq!(get_weekday(&ts("2024-12-25")), 3, "a Wednesday");
        assert_eq!(get_weekday(&ts("2000-01-01")), 6, "a Saturday");
        assert_eq!(get_weekday(&ts("2024-06-01")), 6, "a Saturday");
    }

    #[test]
    fn test_weekday_century_boundary() {
        // Trips naive Zeller variants that skip the year-of-century borrow.
        assert_eq!(get_weekday(&ts("1900-02-28")), 3, "a Wednesday");
        assert_eq!(get_weekday(&ts("2000-02-29")), 2, "a Tuesday");
    }

    #[test]
    fn test_weekday_preserved_without_day() {
        let mut t = ts("2024-06");
        t.weekday = 4;
        assert_eq!(get_weekday(&t), 4);
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(get_day_of_year(&ts("2024-01-01")), 1);
        assert_eq!(get_day_of_year(&ts("2024-03-01")), 61, "leap year");
        assert_eq!(get_day_of_year(&ts("2023-03-01")), 60);
        assert_eq!(get_day_of_year(&ts("2024-12-31")), 366);
    }

    #[test]
    fn test_work_week_boundaries() {
        // Jan 1 2021 is a Friday and belongs to the last ISO week of 2020.
        assert_eq!(get_work_week(&ts("2021-01-01")), 53);
        assert_eq!(get_work_week(&ts("2020-12-31")), 53);
        assert_eq!(get_work_week(&ts("2024-01-01")), 1);
        assert_eq!(get_work_week(&ts("2023-01-01")), 52, "Sunday of 2022's last week");
        assert_eq!(get_work_week(&ts("2024-06-01")), 22);
    }

    #[test]
    fn test_work_week_invalid_date() {
        let mut t = ts("2024-02-05");
        t.day = 31;
        assert_eq!(get_work_week(&t), 0);
    }

    #[test]
    fn test_update_formatted_idempotent() {
        let mut once = Timestamp {
            year: 2024,
            month: 6,
            day: 1,
            hour: 9,
            minute: 30,
            has_day: true,
            ..Timestamp::default()
        };
        update_formatted(&mut once);
        let mut twice = once.clone();
        update_formatted(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_update_relative_with_time() {
        let now = ts("2024-06-15 12:00");
        let mut earlier = ts("2024-06-15 08:00");
        update_relative(&mut earlier, &now, true);
        assert!(earlier.past && !earlier.current);
        assert!(earlier.current_weekday);

        let mut same_day = ts("2024-06-15 08:00");
        update_relative(&mut same_day, &now, false);
        assert!(same_day.current, "day-granularity comparison ignores time");
    }

    #[test]
    fn test_update_minutes() {
        let mut t = ts("2024-06-15");
        update_minutes(&mut t, 5 * 60 + 45, None);
        assert_eq!(t.hour, 5);
        assert_eq!(t.minute, 45);
        assert_eq!(t.time, "05:45");
    }

    #[test]
    fn test_add_to_date_day_overflow() {
        let base = ts("2024-01-31");
        let next = add_to_date(&base, Delta { day: Some(1), ..Delta::default() });
        assert_eq!(next.date, "2024-02-01");
        assert_eq!(next.weekday, get_weekday(&next));
    }

    #[test]
    fn test_add_to_date_minute_cascade() {
        let base = ts("2024-01-31 00:00");
        let rolled = add_to_date(&base, Delta { minute: Some(1500), ..Delta::default() });
        assert_eq!(rolled.date, "2024-02-01");
        assert_eq!(rolled.time, "01:00");
    }

    #[test]
    fn test_add_to_date_many_days() {
        let base = ts("2024-01-01");
        let far = add_to_date(&base, Delta { day: Some(400), ..Delta::default() });
        assert_eq!(far.date, "2025-02-04");

        let back = add_to_date(&far, Delta { day: Some(-400), ..Delta::default() });
        assert_eq!(back.date, "2024-01-01");
    }

    #[test]
    fn test_add_to_date_negative_day_borrow() {
        let base = ts("2024-03-01");
        let prev = add_to_date(&base, Delta { day: Some(-1), ..Delta::default() });
        assert_eq!(prev.date, "2024-02-29");
    }

    #[test]
    fn test_add_to_date_month_and_year() {
        let base = ts("2023-11-15");
        let shifted = add_to_date(&base, Delta { month: Some(3), ..Delta::default() });
        assert_eq!(shifted.date, "2024-02-15");

        let ago = add_to_date(&base, Delta { year: Some(-1), ..Delta::default() });
        assert_eq!(ago.date, "2022-11-15");
    }
}
