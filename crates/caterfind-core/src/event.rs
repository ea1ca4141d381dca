//! Calendar events booked on a caterer's calendar.
//!
//! Events are created from an [`EventDraft`] (raw form input). Validation
//! turns the draft into a [`NewEvent`], which is what gets sent to the
//! server; the server answers with a [`CalendarEvent`] carrying its id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::date_key::DateKey;

/// Server-assigned event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// An event as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: EventId,
    pub event_date: DateKey,
    pub event_host_name: String,
    #[serde(default)]
    pub managed_by: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl CalendarEvent {
    pub fn is_on(&self, key: DateKey) -> bool {
        self.event_date == key
    }
}

/// Validation failures for an event draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventValidationError {
    #[error("Event host name is required")]
    MissingHostName,
}

/// Raw event form input, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub event_host_name: String,
    pub managed_by: String,
    pub location: String,
}

impl EventDraft {
    pub fn new(event_host_name: impl Into<String>) -> Self {
        Self {
            event_host_name: event_host_name.into(),
            ..Default::default()
        }
    }

    pub fn with_managed_by(mut self, managed_by: impl Into<String>) -> Self {
        self.managed_by = managed_by.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Empties every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validates the draft for `event_date`.
    ///
    /// The host name must be non-empty after trimming. Optional fields that
    /// are empty after trimming become `None`.
    pub fn validate(&self, event_date: DateKey) -> Result<NewEvent, EventValidationError> {
        let host = self.event_host_name.trim();
        if host.is_empty() {
            return Err(EventValidationError::MissingHostName);
        }

        Ok(NewEvent {
            event_date,
            event_host_name: host.to_string(),
            managed_by: non_empty(&self.managed_by),
            location: non_empty(&self.location),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A validated event ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub event_date: DateKey,
    pub event_host_name: String,
    pub managed_by: Option<String>,
    pub location: Option<String>,
}

impl NewEvent {
    /// The stored form of this event once the server assigned `id`.
    pub fn into_event(self, id: EventId) -> CalendarEvent {
        CalendarEvent {
            id,
            event_date: self.event_date,
            event_host_name: self.event_host_name,
            managed_by: self.managed_by,
            location: self.location,
        }
    }
}

/// Events falling on `key`, in their original order.
pub fn events_for_date(events: &[CalendarEvent], key: DateKey) -> Vec<&CalendarEvent> {
    events.iter().filter(|event| event.is_on(key)).collect()
}
