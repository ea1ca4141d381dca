//! Cached availability for the displayed month.
//!
//! Loads replace the cache wholesale and are guarded by a month token so a
//! slow response for a month the user already left is dropped. Toggles apply
//! the next status to the cache at once and persist it in the background.
//!
//! Writes to one day are serialized in click order. A queued write whose
//! click has been superseded by a newer one on the same day is skipped, and
//! a failed write rolls the day back to the last status the server confirmed.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use caterfind_api::{BoxFuture, CatererBackend, OwnerId};
use caterfind_core::{AvailabilityEntry, AvailabilityMap, AvailabilityStatus, DateKey, YearMonth};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{CalendarError, CalendarResult};

/// Result of [`AvailabilityStore::load_month`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The cache now holds the month.
    Applied { entries: usize },
    /// A newer month load started first; the response was discarded.
    Stale,
}

/// Result of a background availability write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The server stored this status.
    Persisted(AvailabilityStatus),
    /// A newer click on the same day made this write unnecessary.
    Superseded,
}

/// A click's local effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    pub date: DateKey,
    pub previous: AvailabilityStatus,
    pub applied: AvailabilityStatus,
}

/// Handle to a spawned availability write.
#[derive(Debug)]
pub struct PendingWrite(JoinHandle<CalendarResult<WriteOutcome>>);

impl PendingWrite {
    pub(crate) fn spawn<F>(write: F) -> Self
    where
        F: Future<Output = CalendarResult<WriteOutcome>> + Send + 'static,
    {
        Self(tokio::spawn(write))
    }

    /// Waits for the write to finish.
    pub async fn wait(self) -> CalendarResult<WriteOutcome> {
        self.0
            .await
            .map_err(|err| CalendarError::TaskFailed(err.to_string()))?
    }

    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

/// Write bookkeeping for one day with clicks not yet settled.
#[derive(Debug, Clone, Copy)]
struct KeyState {
    confirmed: AvailabilityStatus,
    optimistic: AvailabilityStatus,
    latest_seq: u64,
    in_flight: usize,
}

#[derive(Debug, Default)]
struct StoreState {
    map: AvailabilityMap,
    month: Option<YearMonth>,
    token: u64,
    next_seq: u64,
    keys: HashMap<DateKey, KeyState>,
}

impl StoreState {
    /// True when `key` is part of what the view currently shows.
    fn displays(&self, key: DateKey) -> bool {
        self.month.is_none_or(|month| month.contains(key.date()))
    }

    fn settle(&mut self, key: DateKey) {
        if self.keys.get(&key).is_some_and(|ks| ks.in_flight == 0) {
            self.keys.remove(&key);
        }
    }
}

/// Availability cache shared by a view and its background writes.
#[derive(Clone)]
pub struct AvailabilityStore {
    backend: Arc<dyn CatererBackend>,
    state: Arc<RwLock<StoreState>>,
    write_locks: Arc<Mutex<HashMap<DateKey, Arc<Mutex<()>>>>>,
}

impl std::fmt::Debug for AvailabilityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvailabilityStore")
            .field("backend", &self.backend.name())
            .finish_non_exhaustive()
    }
}

impl AvailabilityStore {
    pub fn new(backend: Arc<dyn CatererBackend>) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(StoreState::default())),
            write_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Fetches the statuses in `[start, end]` without touching the cache.
    pub async fn load_range(
        &self,
        owner: OwnerId,
        start: DateKey,
        end: DateKey,
    ) -> CalendarResult<AvailabilityMap> {
        let entries = self
            .backend
            .list_availability(owner, start, end)
            .await
            .map_err(|err| CalendarError::network("load availability", err))?;

        let mut map = AvailabilityMap::new();
        for entry in entries {
            if entry.status.is_set() {
                map.set(entry.date, entry.status);
            } else {
                debug!(date = %entry.date, "Skipping unset availability entry");
            }
        }
        Ok(map)
    }

    /// Loads `month` into the cache unless a newer load started meanwhile.
    ///
    /// Days with writes still in flight keep their optimistic status. On
    /// failure the previous cache is kept.
    pub async fn load_month(&self, owner: OwnerId, month: YearMonth) -> CalendarResult<LoadOutcome> {
        let token = {
            let mut state = self.state.write().await;
            state.token += 1;
            state.month = Some(month);
            state.token
        };

        let (start, end) = month.range_keys();
        debug!(%owner, %month, token, backend = self.backend.name(), "Loading availability");
        let result = self.load_range(owner, start, end).await;

        let mut guard = self.state.write().await;
        let state = &mut *guard;
        if state.token != token {
            debug!(%month, token, current = state.token, "Discarding stale availability response");
            return Ok(LoadOutcome::Stale);
        }

        let mut map = match result {
            Ok(map) => map,
            Err(err) => {
                warn!(%month, error = %err, "Failed to load availability");
                return Err(err);
            }
        };

        state.keys.retain(|_, ks| ks.in_flight > 0);
        for (key, ks) in &state.keys {
            if month.contains(key.date()) {
                map.set(*key, ks.optimistic);
            }
        }

        let entries = map.len();
        state.map = map;
        debug!(%month, entries, "Availability loaded");
        Ok(LoadOutcome::Applied { entries })
    }

    /// Persists `status` for `key` directly, bypassing the cache.
    pub async fn set_status(
        &self,
        owner: OwnerId,
        key: DateKey,
        status: AvailabilityStatus,
    ) -> CalendarResult<()> {
        self.backend
            .set_availability(owner, AvailabilityEntry::new(key, status))
            .await
            .map_err(|err| CalendarError::network("update availability", err))
    }

    /// Applies the next status for `key` to the cache and returns the write
    /// that persists it. The write does nothing until polled.
    pub async fn begin_toggle(
        &self,
        owner: OwnerId,
        key: DateKey,
    ) -> (Toggle, BoxFuture<'static, CalendarResult<WriteOutcome>>) {
        let (toggle, seq) = {
            let mut guard = self.state.write().await;
            let state = &mut *guard;
            let previous = state.map.get(key);
            let applied = previous.next();
            state.map.set(key, applied);
            state.next_seq += 1;
            let seq = state.next_seq;

            let ks = state.keys.entry(key).or_insert(KeyState {
                confirmed: previous,
                optimistic: applied,
                latest_seq: seq,
                in_flight: 0,
            });
            ks.optimistic = applied;
            ks.latest_seq = seq;
            ks.in_flight += 1;

            (Toggle { date: key, previous, applied }, seq)
        };

        debug!(date = %key, previous = %toggle.previous, applied = %toggle.applied, seq, "Toggled availability");
        let store = self.clone();
        let write = Box::pin(async move { store.persist(owner, key, seq).await });
        (toggle, write)
    }

    /// Toggles `key` and spawns its write.
    pub async fn toggle(&self, owner: OwnerId, key: DateKey) -> (Toggle, PendingWrite) {
        let (toggle, write) = self.begin_toggle(owner, key).await;
        (toggle, PendingWrite::spawn(write))
    }

    async fn write_lock(&self, key: DateKey) -> Arc<Mutex<()>> {
        let mut locks = self.write_locks.lock().await;
        Arc::clone(locks.entry(key).or_default())
    }

    /// Drops the lock for `key` once no other write holds or waits on it.
    async fn release_write_lock(&self, key: DateKey, lock: Arc<Mutex<()>>) {
        let mut locks = self.write_locks.lock().await;
        let idle = locks.get(&key).is_some_and(|held| Arc::ptr_eq(held, &lock))
            && Arc::strong_count(&lock) == 2;
        if idle {
            locks.remove(&key);
        }
    }

    async fn persist(&self, owner: OwnerId, key: DateKey, seq: u64) -> CalendarResult<WriteOutcome> {
        let lock = self.write_lock(key).await;
        let result = {
            let _queue = lock.lock().await;
            self.persist_queued(owner, key, seq).await
        };
        self.release_write_lock(key, lock).await;
        result
    }

    async fn persist_queued(
        &self,
        owner: OwnerId,
        key: DateKey,
        seq: u64,
    ) -> CalendarResult<WriteOutcome> {
        let status = {
            let mut state = self.state.write().await;
            let Some(ks) = state.keys.get_mut(&key) else {
                return Ok(WriteOutcome::Superseded);
            };
            if ks.latest_seq != seq {
                ks.in_flight -= 1;
                state.settle(key);
                debug!(date = %key, seq, "Skipping superseded availability write");
                return Ok(WriteOutcome::Superseded);
            }
            ks.optimistic
        };

        let result = self
            .backend
            .set_availability(owner, AvailabilityEntry::new(key, status))
            .await;

        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let displayed = state.displays(key);
        let Some(ks) = state.keys.get_mut(&key) else {
            return result
                .map(|()| WriteOutcome::Persisted(status))
                .map_err(|err| CalendarError::network("update availability", err));
        };
        ks.in_flight -= 1;

        match result {
            Ok(()) => {
                ks.confirmed = status;
                state.settle(key);
                debug!(date = %key, %status, "Availability persisted");
                Ok(WriteOutcome::Persisted(status))
            }
            Err(source) => {
                let rolled_back_to = if ks.latest_seq == seq && displayed {
                    let confirmed = ks.confirmed;
                    state.map.set(key, confirmed);
                    Some(confirmed)
                } else {
                    None
                };
                state.settle(key);
                warn!(
                    date = %key,
                    %status,
                    rolled_back_to = ?rolled_back_to,
                    error = %source,
                    "Availability write failed"
                );
                Err(CalendarError::WriteFailed {
                    date: key,
                    rolled_back_to,
                    source,
                })
            }
        }
    }

    /// Cached status of `key`.
    pub async fn status(&self, key: DateKey) -> AvailabilityStatus {
        self.state.read().await.map.get(key)
    }

    /// Copy of the cached map.
    pub async fn snapshot(&self) -> AvailabilityMap {
        self.state.read().await.map.clone()
    }

    /// Month of the latest load.
    pub async fn month(&self) -> Option<YearMonth> {
        self.state.read().await.month
    }
}
