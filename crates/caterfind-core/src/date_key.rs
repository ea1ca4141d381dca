//! Canonical day keys.
//!
//! A [`DateKey`] identifies one calendar day and renders as `YYYY-MM-DD`
//! with a zero-padded month and day. It is the key of every availability
//! and event lookup, and the exact string exchanged with the server.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::grid::YearMonth;

/// Error returned when a string is not a canonical `YYYY-MM-DD` key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date key '{input}': expected YYYY-MM-DD")]
pub struct DateKeyParseError {
    input: String,
}

impl DateKeyParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// A calendar day, keyed as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Wraps a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a key from a 1-based month. Returns `None` for days that do not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The underlying date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Zero-based month, matching [`YearMonth::month0`].
    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The month this day belongs to.
    pub fn year_month(&self) -> YearMonth {
        YearMonth::from_date(self.0)
    }
}

/// Formats the key for `day` of the zero-based `month` in `year`.
///
/// Returns `None` for a padding cell (`day == 0`) and for days past the end
/// of the month. Months outside `0..=11` roll over into neighbouring years.
pub fn format_date_key(day: u32, month: i32, year: i32) -> Option<DateKey> {
    if day == 0 {
        return None;
    }
    YearMonth::new(year, month).day(day).map(DateKey)
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<DateKey> for NaiveDate {
    fn from(key: DateKey) -> Self {
        key.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl FromStr for DateKey {
    type Err = DateKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let canonical = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !canonical {
            return Err(DateKeyParseError::new(s));
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| DateKeyParseError::new(s))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero_padded() {
        let key = format_date_key(5, 1, 2026).unwrap();
        assert_eq!(key.to_string(), "2026-02-05");

        let key = format_date_key(25, 11, 2026).unwrap();
        assert_eq!(key.to_string(), "2026-12-25");
    }

    #[test]
    fn padding_day_has_no_key() {
        assert!(format_date_key(0, 1, 2026).is_none());
    }

    #[test]
    fn nonexistent_day_has_no_key() {
        assert!(format_date_key(29, 1, 2026).is_none());
        assert!(format_date_key(29, 1, 2024).is_some());
        assert!(format_date_key(32, 0, 2026).is_none());
    }

    #[test]
    fn month_rolls_over_years() {
        assert_eq!(
            format_date_key(31, -1, 2026).unwrap().to_string(),
            "2025-12-31"
        );
        assert_eq!(
            format_date_key(1, 12, 2026).unwrap().to_string(),
            "2027-01-01"
        );
    }

    #[test]
    fn generated_keys_parse_back_to_inputs() {
        for year in [1999, 2024, 2026] {
            for month in 0..12 {
                let days = YearMonth::new(year, month).days_in_month();
                for day in 1..=days {
                    let key = format_date_key(day, month, year).unwrap();
                    let text = key.to_string();
                    assert_eq!(text.len(), 10);

                    let parsed: DateKey = text.parse().unwrap();
                    assert_eq!(parsed.year(), year);
                    assert_eq!(parsed.month0(), month as u32);
                    assert_eq!(parsed.day(), day);
                    assert_eq!(&text[5..7], format!("{:02}", month + 1));
                    assert_eq!(&text[8..10], format!("{:02}", day));
                }
            }
        }
    }

    #[test]
    fn rejects_non_canonical_strings() {
        assert!("2026-2-05".parse::<DateKey>().is_err());
        assert!("2026-02-5".parse::<DateKey>().is_err());
        assert!("2026/02/05".parse::<DateKey>().is_err());
        assert!("2026-02-30".parse::<DateKey>().is_err());
        assert!("".parse::<DateKey>().is_err());
    }

    #[test]
    fn ordering_follows_calendar() {
        let a: DateKey = "2025-12-31".parse().unwrap();
        let b: DateKey = "2026-01-01".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn serde_uses_plain_string() {
        let key: DateKey = "2026-02-15".parse().unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2026-02-15\"");

        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);

        assert!(serde_json::from_str::<DateKey>("\"15/02/2026\"").is_err());
    }
}
