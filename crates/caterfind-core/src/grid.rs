//! Month cursor and calendar grid generation.
//!
//! The grid is the sequence of cells a month view renders: leading padding
//! so that day 1 sits under its weekday (Sunday first), then every day of the
//! month in order.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::date_key::DateKey;

/// One grid cell: `None` for padding, otherwise the day of the month.
pub type CalendarDayCell = Option<u32>;

/// Column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MIN_YEAR: i64 = 1;
const MAX_YEAR: i64 = 9999;

/// Error returned when parsing a `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid month '{0}': expected YYYY-MM")]
pub struct YearMonthParseError(String);

/// A displayed month. The month index is zero-based.
///
/// Construction normalizes out-of-range months across year boundaries and
/// clamps to years 1..=9999, the range a four-digit [`DateKey`] can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month0: u32,
}

impl YearMonth {
    /// Creates a cursor, normalizing `month0` (e.g. `-1` is December of the previous year).
    pub fn new(year: i32, month0: i32) -> Self {
        let total = (i64::from(year) * 12 + i64::from(month0))
            .clamp(MIN_YEAR * 12, MAX_YEAR * 12 + 11);
        Self {
            year: total.div_euclid(12) as i32,
            month0: total.rem_euclid(12) as u32,
        }
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0() as i32)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month index.
    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// One-based month number.
    pub fn month(&self) -> u32 {
        self.month0 + 1
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::new(self.year, self.month0 as i32 - 1)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::new(self.year, self.month0 as i32 + 1)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month(), 1)
            .expect("year is clamped into chrono's range")
    }

    /// Day 0 of the following month, i.e. the last day of this one.
    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month0 == 11 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month() + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|first_of_next| first_of_next.pred_opt())
            .expect("year is clamped into chrono's range")
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Weekday of the 1st, Sunday = 0.
    pub fn first_weekday(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    /// The date of `day` in this month, if it exists.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month(), day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month0 as usize]
    }

    /// Inclusive key range covering the whole month.
    pub fn range_keys(&self) -> (DateKey, DateKey) {
        (
            DateKey::from_date(self.first_day()),
            DateKey::from_date(self.last_day()),
        )
    }

    /// The grid cells for this month.
    pub fn days(&self) -> Vec<CalendarDayCell> {
        let padding = self.first_weekday() as usize;
        let total = self.days_in_month();

        let mut cells = Vec::with_capacity(padding + total as usize);
        cells.extend(std::iter::repeat_n(None, padding));
        cells.extend((1..=total).map(Some));
        cells
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

impl FromStr for YearMonth {
    type Err = YearMonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || YearMonthParseError(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(err)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(err());
        }
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: i32 = month.parse().map_err(|_| err())?;
        if !(1..=12).contains(&month) || year < 1 {
            return Err(err());
        }
        Ok(Self::new(year, month - 1))
    }
}

/// Number of days in the zero-based `month` of `year`.
pub fn days_in_month(year: i32, month: i32) -> u32 {
    YearMonth::new(year, month).days_in_month()
}

/// Weekday of the first day of the zero-based `month`, Sunday = 0.
pub fn first_weekday_of_month(year: i32, month: i32) -> u32 {
    YearMonth::new(year, month).first_weekday()
}

/// Grid cells for the zero-based `month` of `year`.
pub fn generate_days(year: i32, month: i32) -> Vec<CalendarDayCell> {
    YearMonth::new(year, month).days()
}
