//! Backend whose calls can be held until a test releases them.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use caterfind_api::{
    ApiResult, BoxFuture, CatererBackend, EventQuery, InMemoryBackend, OwnerId,
};
use caterfind_core::{AvailabilityEntry, CalendarEvent, DateKey, EventId, NewEvent};
use tokio::sync::Semaphore;

pub const OWNER: OwnerId = OwnerId(1);

pub fn key(s: &str) -> DateKey {
    s.parse().unwrap()
}

/// [`InMemoryBackend`] with optional gates on availability reads and writes.
pub struct GatedBackend {
    pub inner: InMemoryBackend,
    gate_writes: bool,
    writes: Semaphore,
    read_gates: Mutex<HashMap<DateKey, Arc<Semaphore>>>,
}

impl GatedBackend {
    pub fn new() -> Self {
        Self {
            inner: InMemoryBackend::new(),
            gate_writes: false,
            writes: Semaphore::new(0),
            read_gates: Mutex::new(HashMap::new()),
        }
    }

    /// Every availability write waits for [`Self::release_writes`].
    pub fn with_gated_writes() -> Self {
        Self {
            gate_writes: true,
            ..Self::new()
        }
    }

    pub fn release_writes(&self, count: usize) {
        self.writes.add_permits(count);
    }

    /// Holds availability reads starting at `start` until the returned
    /// semaphore gets a permit.
    pub fn gate_reads_from(&self, start: DateKey) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.read_gates
            .lock()
            .unwrap()
            .insert(start, Arc::clone(&gate));
        gate
    }
}

impl CatererBackend for GatedBackend {
    fn name(&self) -> &str {
        "gated"
    }

    fn list_availability(
        &self,
        owner: OwnerId,
        start: DateKey,
        end: DateKey,
    ) -> BoxFuture<'_, ApiResult<Vec<AvailabilityEntry>>> {
        Box::pin(async move {
            let gate = self.read_gates.lock().unwrap().get(&start).cloned();
            if let Some(gate) = gate {
                gate.acquire().await.unwrap().forget();
            }
            self.inner.list_availability(owner, start, end).await
        })
    }

    fn set_availability(
        &self,
        owner: OwnerId,
        entry: AvailabilityEntry,
    ) -> BoxFuture<'_, ApiResult<()>> {
        Box::pin(async move {
            if self.gate_writes {
                self.writes.acquire().await.unwrap().forget();
            }
            self.inner.set_availability(owner, entry).await
        })
    }

    fn list_events(
        &self,
        owner: OwnerId,
        query: EventQuery,
    ) -> BoxFuture<'_, ApiResult<Vec<CalendarEvent>>> {
        self.inner.list_events(owner, query)
    }

    fn create_event(
        &self,
        owner: OwnerId,
        event: NewEvent,
    ) -> BoxFuture<'_, ApiResult<CalendarEvent>> {
        self.inner.create_event(owner, event)
    }

    fn delete_event(&self, id: EventId) -> BoxFuture<'_, ApiResult<()>> {
        self.inner.delete_event(id)
    }
}

/// Lets spawned tasks run until they block.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
