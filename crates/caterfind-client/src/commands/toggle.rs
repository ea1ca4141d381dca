//! `caterfind toggle`: cycle one day's status.

use std::sync::Arc;

use caterfind_api::{CatererBackend, OwnerId};
use caterfind_calendar::{AvailabilityView, CalendarError, ClickOutcome, WriteOutcome};
use caterfind_core::DateKey;
use tracing::debug;

use crate::error::ClientResult;

pub async fn run(backend: Arc<dyn CatererBackend>, owner: OwnerId, date: DateKey) -> ClientResult<()> {
    let mut view = AvailabilityView::new(owner, backend);
    view.go_to_month(date.year_month()).await?;

    match view.click_day(Some(date.day())).await {
        ClickOutcome::Selected { toggle, write } => {
            let outcome = write.wait().await?;
            debug!(?outcome, "Toggle finished");
            if let WriteOutcome::Persisted(status) = outcome {
                println!("{}: {} -> {}", date, toggle.previous, status);
            }
            Ok(())
        }
        ClickOutcome::Past(date) => Err(CalendarError::PastDate { date }.into()),
        ClickOutcome::Padding => Ok(()),
    }
}
