//! Per-day availability status.
//!
//! [`AvailabilityStatus::Unset`] is never stored: an [`AvailabilityMap`]
//! only holds available and busy days, and a missing key reads as unset.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::date_key::DateKey;

/// Error returned for a status string the server does not understand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown availability status '{0}'")]
pub struct UnknownStatus(pub String);

/// Availability of a caterer on one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Busy,
    /// No entry. Sent to the server as `neutral`, which clears the day.
    #[default]
    #[serde(rename = "neutral")]
    Unset,
}

impl AvailabilityStatus {
    /// Next status in the click cycle: unset, available, busy, unset.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Unset => Self::Available,
            Self::Available => Self::Busy,
            Self::Busy => Self::Unset,
        }
    }

    pub fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Busy => "busy",
            Self::Unset => "neutral",
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailabilityStatus {
    type Err = UnknownStatus;

    /// Case-insensitive; empty and `neutral` both mean unset.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "busy" => Ok(Self::Busy),
            "" | "neutral" => Ok(Self::Unset),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// One `{date, status}` record as exchanged with the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    pub date: DateKey,
    pub status: AvailabilityStatus,
}

impl AvailabilityEntry {
    pub fn new(date: DateKey, status: AvailabilityStatus) -> Self {
        Self { date, status }
    }
}

/// Statuses of the days of one displayed range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityMap {
    entries: BTreeMap<DateKey, AvailabilityStatus>,
}

impl AvailabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status of `key`; absent keys are unset.
    pub fn get(&self, key: DateKey) -> AvailabilityStatus {
        self.entries.get(&key).copied().unwrap_or_default()
    }

    /// Sets `key` and returns its previous status. Setting unset removes the entry.
    pub fn set(&mut self, key: DateKey, status: AvailabilityStatus) -> AvailabilityStatus {
        let previous = if status.is_set() {
            self.entries.insert(key, status)
        } else {
            self.entries.remove(&key)
        };
        previous.unwrap_or_default()
    }

    pub fn contains(&self, key: DateKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = AvailabilityEntry> + '_ {
        self.entries
            .iter()
            .map(|(date, status)| AvailabilityEntry::new(*date, *status))
    }
}

impl FromIterator<AvailabilityEntry> for AvailabilityMap {
    /// Later entries for the same day win.
    fn from_iter<I: IntoIterator<Item = AvailabilityEntry>>(iter: I) -> Self {
        let mut map = Self::new();
        for entry in iter {
            map.set(entry.date, entry.status);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn cycle_returns_to_unset_after_three_steps() {
        let first = AvailabilityStatus::Unset.next();
        let second = first.next();
        let third = second.next();
        assert_eq!(first, AvailabilityStatus::Available);
        assert_eq!(second, AvailabilityStatus::Busy);
        assert_eq!(third, AvailabilityStatus::Unset);
    }

    #[test]
    fn parse_is_lenient_about_case_and_neutral() {
        assert_eq!(
            " Available ".parse::<AvailabilityStatus>().unwrap(),
            AvailabilityStatus::Available
        );
        assert_eq!(
            "BUSY".parse::<AvailabilityStatus>().unwrap(),
            AvailabilityStatus::Busy
        );
        assert_eq!(
            "neutral".parse::<AvailabilityStatus>().unwrap(),
            AvailabilityStatus::Unset
        );
        assert_eq!(
            "".parse::<AvailabilityStatus>().unwrap(),
            AvailabilityStatus::Unset
        );
        assert!("maybe".parse::<AvailabilityStatus>().is_err());
    }

    #[test]
    fn unset_is_absence() {
        let mut map = AvailabilityMap::new();
        let day = key("2026-02-15");

        assert_eq!(map.get(day), AvailabilityStatus::Unset);
        assert_eq!(map.set(day, AvailabilityStatus::Available), AvailabilityStatus::Unset);
        assert!(map.contains(day));

        assert_eq!(map.set(day, AvailabilityStatus::Unset), AvailabilityStatus::Available);
        assert!(!map.contains(day));
        assert!(map.is_empty());
    }

    #[test]
    fn a_day_holds_one_status() {
        let mut map = AvailabilityMap::new();
        let day = key("2026-02-10");
        map.set(day, AvailabilityStatus::Available);
        map.set(day, AvailabilityStatus::Busy);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(day), AvailabilityStatus::Busy);
    }

    #[test]
    fn collects_entries_dropping_unset() {
        let map: AvailabilityMap = [
            AvailabilityEntry::new(key("2026-02-05"), AvailabilityStatus::Busy),
            AvailabilityEntry::new(key("2026-02-15"), AvailabilityStatus::Available),
            AvailabilityEntry::new(key("2026-02-20"), AvailabilityStatus::Unset),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.len(), 2);
        let dates: Vec<String> = map.iter().map(|e| e.date.to_string()).collect();
        assert_eq!(dates, vec!["2026-02-05", "2026-02-15"]);
    }

    #[test]
    fn entry_wire_format() {
        let entry = AvailabilityEntry::new(key("2026-02-21"), AvailabilityStatus::Available);
        insta::assert_json_snapshot!(entry, @r#"
        {
          "date": "2026-02-21",
          "status": "available"
        }
        "#);

        let cleared = AvailabilityEntry::new(key("2026-02-21"), AvailabilityStatus::Unset);
        assert_eq!(
            serde_json::to_string(&cleared).unwrap(),
            r#"{"date":"2026-02-21","status":"neutral"}"#
        );
    }
}
