//! The remote authority for availability and events.
//!
//! [`CatererBackend`] is the seam between view state and storage. The REST
//! implementation lives in [`crate::http`]; [`crate::memory`] keeps the same
//! contract in process.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

use caterfind_core::{AvailabilityEntry, CalendarEvent, DateKey, EventId, NewEvent};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;

/// The caterer whose calendar is read or edited.
///
/// Supplied by the session layer and passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub i64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OwnerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Which events to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventQuery {
    #[default]
    All,
    /// Events on one day.
    OnDate(DateKey),
    /// Events in an inclusive range.
    Range { start: DateKey, end: DateKey },
}

impl EventQuery {
    pub fn matches(&self, event: &CalendarEvent) -> bool {
        match *self {
            Self::All => true,
            Self::OnDate(date) => event.event_date == date,
            Self::Range { start, end } => start <= event.event_date && event.event_date <= end,
        }
    }
}

/// A boxed future, keeping [`CatererBackend`] object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Operations the calendar consumes from the server.
///
/// Implementations must be `Send + Sync`: stores share one backend behind an
/// `Arc` and call it from background write tasks.
pub trait CatererBackend: Send + Sync {
    /// Short name used in logs ("http", "memory").
    fn name(&self) -> &str;

    /// Entries whose date falls in `[start, end]`.
    fn list_availability(
        &self,
        owner: OwnerId,
        start: DateKey,
        end: DateKey,
    ) -> BoxFuture<'_, ApiResult<Vec<AvailabilityEntry>>>;

    /// Persists one day. An unset status clears the day.
    fn set_availability(
        &self,
        owner: OwnerId,
        entry: AvailabilityEntry,
    ) -> BoxFuture<'_, ApiResult<()>>;

    fn list_events(
        &self,
        owner: OwnerId,
        query: EventQuery,
    ) -> BoxFuture<'_, ApiResult<Vec<CalendarEvent>>>;

    /// Creates an event; the server assigns its id.
    fn create_event(
        &self,
        owner: OwnerId,
        event: NewEvent,
    ) -> BoxFuture<'_, ApiResult<CalendarEvent>>;

    fn delete_event(&self, id: EventId) -> BoxFuture<'_, ApiResult<()>>;
}
