//! Calendar error types.

use caterfind_api::ApiError;
use caterfind_core::{AvailabilityStatus, DateKey, EventValidationError};
use thiserror::Error;

/// Result type for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Errors surfaced by the stores and views.
///
/// None of them is fatal: each leaves the view in its last valid state.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// A required form field is empty; nothing was sent.
    #[error(transparent)]
    Validation(#[from] EventValidationError),

    /// An event needs a selected day.
    #[error("Select a date first")]
    NoDateSelected,

    /// The day is before today.
    #[error("Cannot add events to past dates")]
    PastDate { date: DateKey },

    /// A load, create or delete call failed.
    #[error("failed to {action}: {source}")]
    Network {
        action: &'static str,
        #[source]
        source: ApiError,
    },

    /// Persisting a toggled status failed. `rolled_back_to` is the restored
    /// status, or `None` when a newer click or a month change made the
    /// rollback moot.
    #[error("failed to update availability for {date}: {source}")]
    WriteFailed {
        date: DateKey,
        rolled_back_to: Option<AvailabilityStatus>,
        #[source]
        source: ApiError,
    },

    /// A background write task panicked or was aborted.
    #[error("background write did not complete: {0}")]
    TaskFailed(String),
}

impl CalendarError {
    pub(crate) fn network(action: &'static str, source: ApiError) -> Self {
        Self::Network { action, source }
    }

    /// True for failures talking to the server.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::WriteFailed { .. })
    }
}
