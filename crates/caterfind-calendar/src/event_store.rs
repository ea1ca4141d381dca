//! Cached events of one caterer.
//!
//! Every mutation reloads the full list from the server afterwards; nothing
//! is inserted or removed locally.

use std::sync::Arc;

use caterfind_api::{CatererBackend, EventQuery, OwnerId};
use caterfind_core::{CalendarEvent, DateKey, EventDraft, EventId, events_for_date};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{CalendarError, CalendarResult};

/// Prompt shown before an event is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this event?";

/// Asks the user to approve a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Approves everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The confirmation was declined; nothing was sent.
    Declined,
}

#[derive(Clone)]
pub struct EventStore {
    backend: Arc<dyn CatererBackend>,
    events: Arc<RwLock<Vec<CalendarEvent>>>,
}

impl std::fmt::Debug for EventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStore")
            .field("backend", &self.backend.name())
            .finish_non_exhaustive()
    }
}

impl EventStore {
    pub fn new(backend: Arc<dyn CatererBackend>) -> Self {
        Self {
            backend,
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Replaces the cache with every event of `owner`.
    ///
    /// On failure the previous list is kept.
    pub async fn load_all(&self, owner: OwnerId) -> CalendarResult<Vec<CalendarEvent>> {
        let events = match self.backend.list_events(owner, EventQuery::All).await {
            Ok(events) => events,
            Err(err) => {
                warn!(%owner, error = %err, "Failed to load events");
                return Err(CalendarError::network("load events", err));
            }
        };

        debug!(%owner, count = events.len(), "Events loaded");
        *self.events.write().await = events.clone();
        Ok(events)
    }

    /// Validates `draft`, creates it on `date` and reloads the list.
    ///
    /// An invalid draft is rejected before anything is sent.
    pub async fn create(
        &self,
        owner: OwnerId,
        date: DateKey,
        draft: &EventDraft,
    ) -> CalendarResult<CalendarEvent> {
        let new_event = draft.validate(date)?;
        let created = self
            .backend
            .create_event(owner, new_event)
            .await
            .map_err(|err| CalendarError::network("create event", err))?;
        info!(%owner, id = %created.id, date = %created.event_date, "Event created");

        if let Err(err) = self.load_all(owner).await {
            debug!(error = %err, "Event list not refreshed after create");
        }
        Ok(created)
    }

    /// Deletes `id` once `confirm` approves, then reloads the list.
    pub async fn delete(
        &self,
        owner: OwnerId,
        id: EventId,
        confirm: &dyn Confirm,
    ) -> CalendarResult<DeleteOutcome> {
        if !confirm.confirm(DELETE_PROMPT) {
            debug!(%id, "Event deletion declined");
            return Ok(DeleteOutcome::Declined);
        }

        self.backend
            .delete_event(id)
            .await
            .map_err(|err| CalendarError::network("delete event", err))?;
        info!(%owner, %id, "Event deleted");

        if let Err(err) = self.load_all(owner).await {
            debug!(error = %err, "Event list not refreshed after delete");
        }
        Ok(DeleteOutcome::Deleted)
    }

    /// Copy of the cached list.
    pub async fn events(&self) -> Vec<CalendarEvent> {
        self.events.read().await.clone()
    }

    /// Cached events on `key`.
    pub async fn events_for_date(&self, key: DateKey) -> Vec<CalendarEvent> {
        let events = self.events.read().await;
        events_for_date(&events, key).into_iter().cloned().collect()
    }
}
