//! Availability calendar state.
//!
//! - [`AvailabilityStore`] - month cache with optimistic toggles and rollback
//! - [`EventStore`] - event cache reloaded after each change
//! - [`AvailabilityView`] - the caterer's editable calendar
//! - [`ReadOnlyAvailabilityView`] - the client-facing calendar
//! - [`FlashSlot`] - self-clearing status messages

pub mod availability_store;
pub mod clock;
pub mod error;
pub mod event_store;
pub mod flash;
pub mod readonly;
pub mod view;

pub use availability_store::{AvailabilityStore, LoadOutcome, PendingWrite, Toggle, WriteOutcome};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CalendarError, CalendarResult};
pub use event_store::{AlwaysConfirm, Confirm, DELETE_PROMPT, DeleteOutcome, EventStore};
pub use flash::{FLASH_DURATION, Flash, FlashSlot};
pub use readonly::{DisplayOptions, ReadOnlyAvailabilityView, ReadOnlyCell};
pub use view::{
    ADD_FAILED_MESSAGE, AvailabilityView, ClickOutcome, DELETE_FAILED_MESSAGE, DayCell, DayClass,
    EVENT_ADDED_MESSAGE, EVENT_DELETED_MESSAGE, PAST_DATE_MESSAGE, UPDATE_FAILED_MESSAGE,
};
