//! Locale-aware label formatting.
//!
//! A thin adapter over chrono's localized formatting, the engine's one call
//! into a larger platform subsystem. Labels are cosmetic: any failure here
//! (an unknown locale tag, a bad format spec) is logged as a diagnostic and
//! degrades to empty output, never propagated. Construct a formatter per
//! call site; there is no module-level handle.

use std::fmt::Write as _;

use chrono::{Locale, NaiveDate};
use log::warn;

use crate::compare::to_naive_date;
use crate::timestamp::{get_date, Timestamp};

/// Label length variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    Long,
    Short,
    /// The first character of the long form.
    Narrow,
}

/// Formats dates, weekday names and month names for one locale.
#[derive(Debug, Clone, Copy)]
pub struct LocaleFormatter {
    locale: Option<Locale>,
}

impl LocaleFormatter {
    /// Builds a formatter for a BCP-47 tag such as `en-US` or `de-DE`.
    ///
    /// `None` selects the POSIX locale. An unrecognized tag degrades to the
    /// empty formatter: every method returns an empty string.
    pub fn new(tag: Option<&str>) -> Self {
        let locale = match tag {
            None => Some(Locale::POSIX),
            Some(tag) => match Locale::try_from(tag.replace('-', "_").as_str()) {
                Ok(locale) => Some(locale),
                Err(_) => {
                    warn!("unsupported locale tag '{tag}', labels will be empty");
                    None
                }
            },
        };
        LocaleFormatter { locale }
    }

    /// Formats a timestamp's date with a chrono format string, localized.
    /// Empty when the timestamp has no valid date or the spec fails.
    pub fn format_date(&self, timestamp: &Timestamp, spec: &str) -> String {
        let Some(locale) = self.locale else {
            return String::new();
        };
        let Some(date) = to_naive_date(timestamp) else {
            return String::new();
        };
        let mut label = String::new();
        if write!(label, "{}", date.format_localized(spec, locale)).is_err() {
            warn!("format spec '{spec}' failed for {}", get_date(timestamp));
            return String::new();
        }
        label
    }

    /// The localized name of a weekday (0 = Sunday .. 6 = Saturday).
    pub fn weekday_name(&self, weekday: i32, style: NameStyle) -> String {
        // 2020-01-05 was a Sunday; the week starting there anchors the
        // engine's weekday numbering onto real dates.
        let Some(anchor) =
            NaiveDate::from_ymd_opt(2020, 1, (5 + weekday.rem_euclid(7)) as u32)
        else {
            return String::new();
        };
        self.name_of(&anchor, style, "%A", "%a")
    }

    /// The localized name of a month (1 = January .. 12 = December). Empty
    /// for an out-of-range month.
    pub fn month_name(&self, month: i32, style: NameStyle) -> String {
        let Some(anchor) = NaiveDate::from_ymd_opt(2020, month as u32, 1) else {
            return String::new();
        };
        self.name_of(&anchor, style, "%B", "%b")
    }

    /// All seven weekday names in engine order, Sunday first.
    pub fn weekday_names(&self, style: NameStyle) -> Vec<String> {
        (0..7).map(|weekday| self.weekday_name(weekday, style)).collect()
    }

    /// All twelve month names, January first.
    pub fn month_names(&self, style: NameStyle) -> Vec<String> {
        (1..=12).map(|month| self.month_name(month, style)).collect()
    }

    fn name_of(&self, date: &NaiveDate, style: NameStyle, long: &str, short: &str) -> String {
        let Some(locale) = self.locale else {
            return String::new();
        };
        let spec = match style {
            NameStyle::Long | NameStyle::Narrow => long,
            NameStyle::Short => short,
        };
        let mut label = String::new();
        if write!(label, "{}", date.format_localized(spec, locale)).is_err() {
            return String::new();
        }
        if style == NameStyle::Narrow {
            label = label.chars().take(1).collect();
        }
        label
    }
}
