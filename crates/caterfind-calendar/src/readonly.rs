//! A caterer's calendar as clients see it.

use std::sync::Arc;

use caterfind_api::{CatererBackend, OwnerId};
use caterfind_core::{AvailabilityStatus, DateKey, YearMonth, format_date_key};
use crate::availability_store::{AvailabilityStore, LoadOutcome};
use crate::clock::{Clock, SystemClock};
use crate::error::CalendarResult;
use crate::view::DayClass;

/// Presentation switches. They never change what is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Drawn inside another page: no title, no back link.
    pub embedded: bool,
    /// Show a link back to the caterer list.
    pub show_back: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            embedded: false,
            show_back: true,
        }
    }
}

impl DisplayOptions {
    pub fn embedded() -> Self {
        Self {
            embedded: true,
            show_back: false,
        }
    }

    pub fn shows_title(&self) -> bool {
        !self.embedded
    }

    pub fn shows_back_link(&self) -> bool {
        self.show_back && !self.embedded
    }
}

/// One non-padding cell of the read-only grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOnlyCell {
    pub day: u32,
    pub date: DateKey,
    pub status: AvailabilityStatus,
}

impl ReadOnlyCell {
    /// Read-only cells are drawn by status alone.
    pub fn class(&self) -> DayClass {
        DayClass::from_status(self.status)
    }
}

/// Month navigation over a caterer's availability, without any mutation.
#[derive(Debug)]
pub struct ReadOnlyAvailabilityView {
    owner: OwnerId,
    month: YearMonth,
    options: DisplayOptions,
    availability: AvailabilityStore,
}

impl ReadOnlyAvailabilityView {
    /// A view on the current month.
    pub fn new(owner: OwnerId, backend: Arc<dyn CatererBackend>) -> Self {
        Self::with_clock(owner, backend, Arc::new(SystemClock))
    }

    /// A view on the month `clock` says is current.
    pub fn with_clock(
        owner: OwnerId,
        backend: Arc<dyn CatererBackend>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            owner,
            month: YearMonth::from_date(clock.today()),
            options: DisplayOptions::default(),
            availability: AvailabilityStore::new(backend),
        }
    }

    pub fn starting_at(mut self, month: YearMonth) -> Self {
        self.month = month;
        self
    }

    pub fn with_options(mut self, options: DisplayOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn load(&self) -> CalendarResult<LoadOutcome> {
        self.availability.load_month(self.owner, self.month).await
    }

    pub async fn prev_month(&mut self) -> CalendarResult<LoadOutcome> {
        self.month = self.month.prev();
        self.load().await
    }

    pub async fn next_month(&mut self) -> CalendarResult<LoadOutcome> {
        self.month = self.month.next();
        self.load().await
    }

    /// Grid cells of the displayed month; `None` is padding.
    pub async fn cells(&self) -> Vec<Option<ReadOnlyCell>> {
        let map = self.availability.snapshot().await;
        self.month
            .days()
            .into_iter()
            .map(|cell| {
                let day = cell?;
                let date = format_date_key(day, self.month.month0() as i32, self.month.year())?;
                Some(ReadOnlyCell {
                    day,
                    date,
                    status: map.get(date),
                })
            })
            .collect()
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn options(&self) -> DisplayOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use caterfind_api::InMemoryBackend;
    use caterfind_core::AvailabilityEntry;

    #[test]
    fn embedded_hides_chrome() {
        let options = DisplayOptions::embedded();
        assert!(!options.shows_title());
        assert!(!options.shows_back_link());

        let options = DisplayOptions {
            embedded: true,
            show_back: true,
        };
        assert!(!options.shows_back_link());
        assert!(DisplayOptions::default().shows_back_link());
    }

    #[tokio::test]
    async fn navigation_crosses_year_boundary() {
        let owner = OwnerId(8);
        let backend = Arc::new(InMemoryBackend::new());
        for (date, status) in [
            ("2026-01-09", AvailabilityStatus::Available),
            ("2025-12-24", AvailabilityStatus::Busy),
        ] {
            backend
                .seed_availability(owner, AvailabilityEntry::new(date.parse().unwrap(), status))
                .await;
        }

        let month = |s: &str| s.parse::<YearMonth>().unwrap();
        let date = |s: &str| s.parse::<DateKey>().unwrap();
        let today = "2026-01-20".parse().unwrap();
        let clock = Arc::new(FixedClock(today));
        let mut view = ReadOnlyAvailabilityView::with_clock(owner, backend.clone(), clock);
        assert_eq!(view.month(), month("2026-01"));
        view.load().await.unwrap();
        let january = view.cells().await;
        // January 2026 starts on a Thursday.
        assert_eq!(january[12].unwrap().day, 9);
        assert_eq!(january[12].unwrap().class(), DayClass::Available);

        view.prev_month().await.unwrap();
        assert_eq!(view.month(), month("2025-12"));
        let december = view.cells().await;
        // December 2025 starts on a Monday.
        let eve = december[24].unwrap();
        assert_eq!(eve.date, date("2025-12-24"));
        assert_eq!(eve.class(), DayClass::Busy);
        assert!(december.iter().flatten().all(|cell| cell.date != date("2026-01-09")));
        assert!(
            december
                .iter()
                .flatten()
                .filter(|cell| cell.date != eve.date)
                .all(|cell| cell.status == AvailabilityStatus::Unset)
        );

        view.next_month().await.unwrap();
        assert_eq!(view.month(), month("2026-01"));
        let cells = view.cells().await;
        assert_eq!(cells[12].unwrap().class(), DayClass::Available);
        assert!(cells.iter().flatten().all(|cell| cell.class() != DayClass::Busy));
        assert_eq!(backend.calls().await.set_availability, 0);
    }

    #[tokio::test]
    async fn cells_follow_status_only() {
        let owner = OwnerId(8);
        let backend = Arc::new(InMemoryBackend::new());
        backend
            .seed_availability(
                owner,
                AvailabilityEntry::new("2020-03-04".parse().unwrap(), AvailabilityStatus::Busy),
            )
            .await;

        let view = ReadOnlyAvailabilityView::new(owner, backend)
            .starting_at("2020-03".parse().unwrap());
        view.load().await.unwrap();

        let cells = view.cells().await;
        // March 2020 starts on a Sunday.
        let fourth = cells[3].unwrap();
        assert_eq!(fourth.day, 4);
        assert_eq!(fourth.class(), DayClass::Busy);
        assert_eq!(cells[4].unwrap().class(), DayClass::Neutral);
    }
}
