//! The caterer's editable availability calendar.
//!
//! Clicking a day selects it and cycles its status; the selected day also
//! carries an event form. Past days cannot be changed.

use std::sync::Arc;

use caterfind_api::{CatererBackend, OwnerId};
use caterfind_core::{
    AvailabilityStatus, CalendarDayCell, CalendarEvent, DateKey, EventDraft, EventId, YearMonth,
    format_date_key,
};
use tracing::{debug, warn};

use crate::availability_store::{AvailabilityStore, LoadOutcome, PendingWrite, Toggle};
use crate::clock::{Clock, SystemClock};
use crate::error::{CalendarError, CalendarResult};
use crate::event_store::{Confirm, DeleteOutcome, EventStore};
use crate::flash::FlashSlot;

pub const PAST_DATE_MESSAGE: &str = "Cannot add events to past dates";
pub const EVENT_ADDED_MESSAGE: &str = "Event added successfully";
pub const EVENT_DELETED_MESSAGE: &str = "Event deleted";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update availability";
pub const ADD_FAILED_MESSAGE: &str = "Failed to add event";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete event";

/// How a day is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayClass {
    Past,
    Available,
    Busy,
    Neutral,
}

impl DayClass {
    /// Past days are drawn as past whatever their status.
    pub fn classify(status: AvailabilityStatus, past: bool) -> Self {
        if past {
            return Self::Past;
        }
        Self::from_status(status)
    }

    pub fn from_status(status: AvailabilityStatus) -> Self {
        match status {
            AvailabilityStatus::Available => Self::Available,
            AvailabilityStatus::Busy => Self::Busy,
            AvailabilityStatus::Unset => Self::Neutral,
        }
    }
}

/// One non-padding cell of the editable grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date: DateKey,
    pub class: DayClass,
    /// Selection ring; never set on past days.
    pub selected: bool,
    pub has_events: bool,
}

/// What a click on a grid cell did.
#[derive(Debug)]
pub enum ClickOutcome {
    /// Padding cell; nothing happened.
    Padding,
    /// Past day; nothing changed and an error is shown.
    Past(DateKey),
    /// The day is selected and its status toggled. `write` persists it.
    Selected { toggle: Toggle, write: PendingWrite },
}

/// Editable calendar state for one caterer.
pub struct AvailabilityView {
    owner: OwnerId,
    month: YearMonth,
    selected: Option<DateKey>,
    form: EventDraft,
    error: FlashSlot,
    success: FlashSlot,
    availability: AvailabilityStore,
    events: EventStore,
    backend: Arc<dyn CatererBackend>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AvailabilityView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvailabilityView")
            .field("owner", &self.owner)
            .field("month", &self.month)
            .field("selected", &self.selected)
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}

impl AvailabilityView {
    /// A view on the current month with nothing selected.
    pub fn new(owner: OwnerId, backend: Arc<dyn CatererBackend>) -> Self {
        Self::with_clock(owner, backend, Arc::new(SystemClock))
    }

    /// Like [`Self::new`], with `clock` deciding which days are past.
    pub fn with_clock(
        owner: OwnerId,
        backend: Arc<dyn CatererBackend>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            owner,
            month: YearMonth::from_date(clock.today()),
            selected: None,
            form: EventDraft::default(),
            error: FlashSlot::default(),
            success: FlashSlot::default(),
            availability: AvailabilityStore::new(Arc::clone(&backend)),
            events: EventStore::new(Arc::clone(&backend)),
            backend,
            clock,
        }
    }

    /// Starts on `month` instead of the current one.
    pub fn starting_at(mut self, month: YearMonth) -> Self {
        self.month = month;
        self
    }

    /// Starts with `date` selected.
    pub fn with_selected(mut self, date: DateKey) -> Self {
        self.selected = Some(date);
        self
    }

    /// Loads availability for the displayed month and all events.
    ///
    /// Both loads run; the first failure is returned after both finish.
    pub async fn load(&self) -> CalendarResult<()> {
        let (availability, events) = tokio::join!(
            self.availability.load_month(self.owner, self.month),
            self.events.load_all(self.owner),
        );
        availability?;
        events?;
        Ok(())
    }

    /// Switches to another caterer and reloads.
    ///
    /// Writes still in flight for the previous caterer finish against
    /// detached caches and message slots, so they never show up here.
    pub async fn set_owner(&mut self, owner: OwnerId) -> CalendarResult<()> {
        if owner != self.owner {
            debug!(from = %self.owner, to = %owner, "Switching caterer");
            self.owner = owner;
            self.availability = AvailabilityStore::new(Arc::clone(&self.backend));
            self.events = EventStore::new(Arc::clone(&self.backend));
            self.error = FlashSlot::default();
            self.success = FlashSlot::default();
        }
        self.close_panel();
        self.load().await
    }

    pub async fn prev_month(&mut self) -> CalendarResult<LoadOutcome> {
        self.go_to_month(self.month.prev()).await
    }

    pub async fn next_month(&mut self) -> CalendarResult<LoadOutcome> {
        self.go_to_month(self.month.next()).await
    }

    /// Shows `month` and reloads its availability. The selection is kept.
    pub async fn go_to_month(&mut self, month: YearMonth) -> CalendarResult<LoadOutcome> {
        self.month = month;
        self.availability.load_month(self.owner, month).await
    }

    /// True when `date` is before today.
    pub fn is_past(&self, date: DateKey) -> bool {
        date.date() < self.clock.today()
    }

    /// Handles a click on a grid cell of the displayed month.
    pub async fn click_day(&mut self, day: CalendarDayCell) -> ClickOutcome {
        let (month0, year) = (self.month.month0() as i32, self.month.year());
        let Some(key) = day.and_then(|d| format_date_key(d, month0, year)) else {
            return ClickOutcome::Padding;
        };

        if self.is_past(key) {
            debug!(date = %key, "Ignoring click on past date");
            self.error.show_transient(PAST_DATE_MESSAGE);
            return ClickOutcome::Past(key);
        }

        self.selected = Some(key);
        self.form.clear();
        self.error.clear();
        self.success.clear();

        let (toggle, write) = self.availability.begin_toggle(self.owner, key).await;
        let errors = self.error.clone();
        let write = PendingWrite::spawn(async move {
            let result = write.await;
            if let Err(err @ CalendarError::WriteFailed { .. }) = &result {
                debug!(error = %err, "Showing availability write failure");
                errors.show_transient(UPDATE_FAILED_MESSAGE);
            }
            result
        });

        ClickOutcome::Selected { toggle, write }
    }

    /// Clears the selection, the form and both messages.
    pub fn close_panel(&mut self) {
        self.selected = None;
        self.form.clear();
        self.error.clear();
        self.success.clear();
    }

    pub fn form(&self) -> &EventDraft {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EventDraft {
        &mut self.form
    }

    /// Creates an event from the form on the selected day.
    ///
    /// A missing host name shows an error that stays until the next save or
    /// selection change.
    pub async fn save_event(&mut self) -> CalendarResult<CalendarEvent> {
        let Some(date) = self.selected else {
            let err = CalendarError::NoDateSelected;
            self.error.show_persistent(err.to_string());
            return Err(err);
        };

        if self.is_past(date) {
            self.error.show_transient(PAST_DATE_MESSAGE);
            return Err(CalendarError::PastDate { date });
        }

        match self.events.create(self.owner, date, &self.form).await {
            Ok(event) => {
                self.form.clear();
                self.error.clear();
                self.success.show_transient(EVENT_ADDED_MESSAGE);
                Ok(event)
            }
            Err(err @ CalendarError::Validation(_)) => {
                self.error.show_persistent(err.to_string());
                Err(err)
            }
            Err(err) => {
                warn!(date = %date, error = %err, "Failed to add event");
                self.error.show_transient(ADD_FAILED_MESSAGE);
                Err(err)
            }
        }
    }

    /// Deletes an event after `confirm` approves.
    pub async fn delete_event(
        &mut self,
        id: EventId,
        confirm: &dyn Confirm,
    ) -> CalendarResult<DeleteOutcome> {
        match self.events.delete(self.owner, id, confirm).await {
            Ok(DeleteOutcome::Deleted) => {
                self.success.show_transient(EVENT_DELETED_MESSAGE);
                Ok(DeleteOutcome::Deleted)
            }
            Ok(DeleteOutcome::Declined) => Ok(DeleteOutcome::Declined),
            Err(err) => {
                self.error.show_transient(DELETE_FAILED_MESSAGE);
                Err(err)
            }
        }
    }

    /// Grid cells of the displayed month; `None` is padding.
    pub async fn cells(&self) -> Vec<Option<DayCell>> {
        let map = self.availability.snapshot().await;
        let events = self.events.events().await;

        self.month
            .days()
            .into_iter()
            .map(|cell| {
                let day = cell?;
                let date = format_date_key(day, self.month.month0() as i32, self.month.year())?;
                let past = self.is_past(date);
                Some(DayCell {
                    day,
                    date,
                    class: DayClass::classify(map.get(date), past),
                    selected: !past && self.selected == Some(date),
                    has_events: events.iter().any(|event| event.is_on(date)),
                })
            })
            .collect()
    }

    /// Events on the selected day.
    pub async fn events_for_selected(&self) -> Vec<CalendarEvent> {
        match self.selected {
            Some(date) => self.events.events_for_date(date).await,
            None => Vec::new(),
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn selected(&self) -> Option<DateKey> {
        self.selected
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.text()
    }

    pub fn success_message(&self) -> Option<String> {
        self.success.text()
    }

    pub fn availability(&self) -> &AvailabilityStore {
        &self.availability
    }

    pub fn events(&self) -> &EventStore {
        &self.events
    }
}
