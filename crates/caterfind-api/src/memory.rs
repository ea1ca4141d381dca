//! In-process backend.
//!
//! Keeps availability and events in memory with the server's rules for
//! clearing days and assigning ids. Failures can be switched on to exercise
//! rollback and error paths, and every call is counted.

use std::collections::BTreeMap;

use caterfind_core::{AvailabilityEntry, CalendarEvent, DateKey, EventId, NewEvent};
use tokio::sync::Mutex;
use tracing::debug;

use crate::backend::{BoxFuture, CatererBackend, EventQuery, OwnerId};
use crate::error::{ApiError, ApiResult};

/// Number of calls per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list_availability: usize,
    pub set_availability: usize,
    pub list_events: usize,
    pub create_event: usize,
    pub delete_event: usize,
}

#[derive(Debug, Default)]
struct MemoryState {
    availability: BTreeMap<(OwnerId, DateKey), AvailabilityEntry>,
    events: Vec<(OwnerId, CalendarEvent)>,
    next_event_id: i64,
    fail_reads: bool,
    fail_writes: bool,
    calls: CallCounts,
}

impl MemoryState {
    fn check_read(&self) -> ApiResult<()> {
        if self.fail_reads {
            Err(ApiError::network("memory backend: reads are failing"))
        } else {
            Ok(())
        }
    }

    fn check_write(&self) -> ApiResult<()> {
        if self.fail_writes {
            Err(ApiError::server("memory backend: writes are failing").with_status(500))
        } else {
            Ok(())
        }
    }
}

/// [`CatererBackend`] backed by in-memory maps.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: Mutex<MemoryState>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one availability entry.
    pub async fn seed_availability(&self, owner: OwnerId, entry: AvailabilityEntry) {
        let mut state = self.state.lock().await;
        if entry.status.is_set() {
            state.availability.insert((owner, entry.date), entry);
        } else {
            state.availability.remove(&(owner, entry.date));
        }
    }

    /// Seeds one event and returns it with its assigned id.
    pub async fn seed_event(&self, owner: OwnerId, event: NewEvent) -> CalendarEvent {
        let mut state = self.state.lock().await;
        state.next_event_id += 1;
        let stored = event.into_event(EventId(state.next_event_id));
        state.events.push((owner, stored.clone()));
        stored
    }

    /// Makes every list call fail with a network error.
    pub async fn set_fail_reads(&self, fail: bool) {
        self.state.lock().await.fail_reads = fail;
    }

    /// Makes every mutating call fail with a server error.
    pub async fn set_fail_writes(&self, fail: bool) {
        self.state.lock().await.fail_writes = fail;
    }

    pub async fn calls(&self) -> CallCounts {
        self.state.lock().await.calls
    }

    /// Stored status for `date`, bypassing call counting.
    pub async fn stored_availability(&self, owner: OwnerId, date: DateKey) -> Option<AvailabilityEntry> {
        self.state.lock().await.availability.get(&(owner, date)).copied()
    }

    /// Stored events of `owner`, bypassing call counting.
    pub async fn stored_events(&self, owner: OwnerId) -> Vec<CalendarEvent> {
        self.state
            .lock()
            .await
            .events
            .iter()
            .filter(|(o, _)| *o == owner)
            .map(|(_, event)| event.clone())
            .collect()
    }
}

impl CatererBackend for InMemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    fn list_availability(
        &self,
        owner: OwnerId,
        start: DateKey,
        end: DateKey,
    ) -> BoxFuture<'_, ApiResult<Vec<AvailabilityEntry>>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            state.calls.list_availability += 1;
            state.check_read()?;
            if start > end {
                return Ok(Vec::new());
            }

            Ok(state
                .availability
                .range((owner, start)..=(owner, end))
                .map(|(_, entry)| *entry)
                .collect())
        })
    }

    fn set_availability(
        &self,
        owner: OwnerId,
        entry: AvailabilityEntry,
    ) -> BoxFuture<'_, ApiResult<()>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            state.calls.set_availability += 1;
            state.check_write()?;

            debug!(owner = %owner, date = %entry.date, status = %entry.status, "Storing availability");
            if entry.status.is_set() {
                state.availability.insert((owner, entry.date), entry);
            } else {
                state.availability.remove(&(owner, entry.date));
            }
            Ok(())
        })
    }

    fn list_events(
        &self,
        owner: OwnerId,
        query: EventQuery,
    ) -> BoxFuture<'_, ApiResult<Vec<CalendarEvent>>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            state.calls.list_events += 1;
            state.check_read()?;

            Ok(state
                .events
                .iter()
                .filter(|(o, event)| *o == owner && query.matches(event))
                .map(|(_, event)| event.clone())
                .collect())
        })
    }

    fn create_event(
        &self,
        owner: OwnerId,
        event: NewEvent,
    ) -> BoxFuture<'_, ApiResult<CalendarEvent>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            state.calls.create_event += 1;
            state.check_write()?;

            if event.event_host_name.trim().is_empty() {
                return Err(ApiError::bad_request("Event host name is required").with_status(400));
            }

            state.next_event_id += 1;
            let stored = event.into_event(EventId(state.next_event_id));
            state.events.push((owner, stored.clone()));
            Ok(stored)
        })
    }

    fn delete_event(&self, id: EventId) -> BoxFuture<'_, ApiResult<()>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            state.calls.delete_event += 1;
            state.check_write()?;

            state.events.retain(|(_, event)| event.id != id);
            Ok(())
        })
    }
}
