//! Core types: date keys, month grid, availability, events, tracing
//!
//! Everything here is pure data and arithmetic; talking to the server lives
//! in `caterfind-api` and view state in `caterfind-calendar`.

pub mod availability;
pub mod date_key;
pub mod event;
pub mod grid;
pub mod tracing;

pub use availability::{AvailabilityEntry, AvailabilityMap, AvailabilityStatus, UnknownStatus};
pub use date_key::{DateKey, DateKeyParseError, format_date_key};
pub use event::{
    CalendarEvent, EventDraft, EventId, EventValidationError, NewEvent, events_for_date,
};
pub use grid::{
    CalendarDayCell, WEEKDAY_LABELS, YearMonth, YearMonthParseError, days_in_month,
    first_weekday_of_month, generate_days,
};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
