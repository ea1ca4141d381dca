//! Editable view behavior: clicks, past days, the event form and messages.

mod common;

use std::sync::Arc;
use std::time::Duration;

use caterfind_calendar::{
    AvailabilityView, CalendarError, ClickOutcome, DayClass, DeleteOutcome, EVENT_ADDED_MESSAGE,
    EVENT_DELETED_MESSAGE, FixedClock, PAST_DATE_MESSAGE, UPDATE_FAILED_MESSAGE, WriteOutcome,
};
use caterfind_api::OwnerId;
use caterfind_core::{AvailabilityEntry, AvailabilityStatus, EventDraft, YearMonth};
use chrono::NaiveDate;
use common::{GatedBackend, OWNER, key, settle};

fn view_on(backend: Arc<GatedBackend>, today: &str) -> AvailabilityView {
    let today: NaiveDate = today.parse().unwrap();
    AvailabilityView::with_clock(OWNER, backend, Arc::new(FixedClock(today)))
}

async fn seeded_february() -> Arc<GatedBackend> {
    let backend = Arc::new(GatedBackend::new());
    for (date, status) in [
        ("2026-02-05", AvailabilityStatus::Busy),
        ("2026-02-10", AvailabilityStatus::Busy),
        ("2026-02-15", AvailabilityStatus::Available),
    ] {
        backend
            .inner
            .seed_availability(OWNER, AvailabilityEntry::new(key(date), status))
            .await;
    }
    backend
}

#[tokio::test]
async fn february_2026_grid_has_no_padding() {
    let view = view_on(seeded_february().await, "2026-02-01");
    view.load().await.unwrap();

    let cells = view.cells().await;
    assert_eq!(view.month(), "2026-02".parse::<YearMonth>().unwrap());
    assert_eq!(cells.len(), 28);
    assert_eq!(cells[0].unwrap().day, 1);
    assert_eq!(cells[27].unwrap().day, 28);
    assert_eq!(cells[4].unwrap().class, DayClass::Busy);
    assert_eq!(cells[14].unwrap().class, DayClass::Available);
    assert_eq!(cells[1].unwrap().class, DayClass::Neutral);
}

#[tokio::test]
async fn click_shows_available_before_write_resolves() {
    let backend = Arc::new(GatedBackend::with_gated_writes());
    let mut view = view_on(backend.clone(), "2026-02-01");
    view.load().await.unwrap();

    let ClickOutcome::Selected { toggle, write } = view.click_day(Some(15)).await else {
        panic!("expected a selection");
    };
    assert_eq!(toggle.previous, AvailabilityStatus::Unset);
    settle().await;
    assert!(!write.is_finished());

    let cell = view.cells().await[14].unwrap();
    assert_eq!(cell.class, DayClass::Available);
    assert!(cell.selected);
    assert_eq!(view.selected(), Some(key("2026-02-15")));

    backend.release_writes(1);
    assert_eq!(
        write.wait().await.unwrap(),
        WriteOutcome::Persisted(AvailabilityStatus::Available)
    );
}

#[tokio::test]
async fn failed_write_rolls_back_and_reports() {
    let backend = Arc::new(GatedBackend::new());
    backend.inner.set_fail_writes(true).await;
    let mut view = view_on(backend, "2026-02-01");
    view.load().await.unwrap();

    let ClickOutcome::Selected { write, .. } = view.click_day(Some(20)).await else {
        panic!("expected a selection");
    };
    let err = write.wait().await.unwrap_err();
    assert!(matches!(
        err,
        CalendarError::WriteFailed {
            rolled_back_to: Some(AvailabilityStatus::Unset),
            ..
        }
    ));

    assert!(!view.availability().snapshot().await.contains(key("2026-02-20")));
    assert_eq!(view.error_message().as_deref(), Some(UPDATE_FAILED_MESSAGE));
}

#[tokio::test]
async fn switching_caterer_detaches_pending_writes() {
    let backend = Arc::new(GatedBackend::with_gated_writes());
    let other = OwnerId(2);
    backend
        .inner
        .seed_availability(
            other,
            AvailabilityEntry::new(key("2026-02-10"), AvailabilityStatus::Busy),
        )
        .await;
    let mut view = view_on(backend.clone(), "2026-02-01");
    view.load().await.unwrap();

    let ClickOutcome::Selected { write, .. } = view.click_day(Some(15)).await else {
        panic!("expected a selection");
    };
    settle().await;

    view.set_owner(other).await.unwrap();
    assert_eq!(view.owner(), other);
    assert_eq!(view.selected(), None);
    let cells = view.cells().await;
    assert_eq!(cells[9].unwrap().class, DayClass::Busy);
    assert_eq!(cells[14].unwrap().class, DayClass::Neutral);

    backend.inner.set_fail_writes(true).await;
    backend.release_writes(1);
    assert!(write.wait().await.is_err());
    settle().await;

    assert_eq!(view.cells().await[14].unwrap().class, DayClass::Neutral);
    assert_eq!(view.error_message(), None);
    assert!(backend.inner.stored_availability(other, key("2026-02-15")).await.is_none());
}

#[tokio::test(start_paused = true)]
async fn past_click_changes_nothing() {
    let backend = seeded_february().await;
    let mut view = view_on(backend.clone(), "2026-02-13");
    view.load().await.unwrap();
    let before = view.availability().snapshot().await;

    let outcome = view.click_day(Some(10)).await;
    assert!(matches!(outcome, ClickOutcome::Past(date) if date == key("2026-02-10")));
    assert_eq!(view.selected(), None);
    assert_eq!(view.availability().snapshot().await, before);
    assert_eq!(view.error_message().as_deref(), Some(PAST_DATE_MESSAGE));
    assert_eq!(backend.inner.calls().await.set_availability, 0);

    let cell = view.cells().await[9].unwrap();
    assert_eq!(cell.class, DayClass::Past);

    tokio::time::sleep(Duration::from_millis(3100)).await;
    assert_eq!(view.error_message(), None);
}

#[tokio::test]
async fn today_is_not_past_and_padding_is_inert() {
    let mut view = view_on(Arc::new(GatedBackend::new()), "2026-03-04");
    view.load().await.unwrap();

    assert!(matches!(view.click_day(None).await, ClickOutcome::Padding));
    assert!(matches!(view.click_day(Some(32)).await, ClickOutcome::Padding));
    assert!(matches!(
        view.click_day(Some(4)).await,
        ClickOutcome::Selected { .. }
    ));
    assert_eq!(view.selected(), Some(key("2026-03-04")));
}

#[tokio::test(start_paused = true)]
async fn blank_host_name_is_never_sent() {
    let backend = Arc::new(GatedBackend::new());
    let mut view = view_on(backend.clone(), "2026-02-01");
    view.load().await.unwrap();
    view.click_day(Some(25)).await;

    view.form_mut().event_host_name = "   ".to_string();
    view.form_mut().location = "Hall".to_string();
    let err = view.save_event().await.unwrap_err();
    assert!(matches!(err, CalendarError::Validation(_)));
    assert_eq!(backend.inner.calls().await.create_event, 0);
    assert_eq!(view.selected(), Some(key("2026-02-25")));

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(
        view.error_message().as_deref(),
        Some("Event host name is required")
    );
    assert_eq!(view.form().location, "Hall");
}

#[tokio::test(start_paused = true)]
async fn saving_event_reloads_and_clears_form() {
    let backend = Arc::new(GatedBackend::new());
    let mut view = view_on(backend.clone(), "2026-02-01");
    view.load().await.unwrap();
    view.click_day(Some(25)).await;

    *view.form_mut() = EventDraft::new("John's Wedding").with_managed_by("Sarah");
    let event = view.save_event().await.unwrap();
    assert_eq!(event.event_date, key("2026-02-25"));
    assert_eq!(view.form(), &EventDraft::default());
    assert_eq!(view.success_message().as_deref(), Some(EVENT_ADDED_MESSAGE));
    assert_eq!(view.events_for_selected().await, vec![event]);
    assert!(view.cells().await[24].unwrap().has_events);

    tokio::time::sleep(Duration::from_millis(3100)).await;
    assert_eq!(view.success_message(), None);
}

#[tokio::test]
async fn saving_for_past_selection_is_rejected() {
    let backend = Arc::new(GatedBackend::new());
    let mut view =
        view_on(backend.clone(), "2026-02-13").with_selected(key("2026-02-02"));
    *view.form_mut() = EventDraft::new("Brunch");

    let err = view.save_event().await.unwrap_err();
    assert!(matches!(err, CalendarError::PastDate { .. }));
    assert_eq!(view.error_message().as_deref(), Some(PAST_DATE_MESSAGE));
    assert_eq!(backend.inner.calls().await.create_event, 0);
    assert!(!view.cells().await[1].unwrap().selected);
}

#[tokio::test]
async fn declined_delete_keeps_events() {
    let backend = Arc::new(GatedBackend::new());
    let gala = backend
        .inner
        .seed_event(OWNER, EventDraft::new("Gala").validate(key("2026-02-25")).unwrap())
        .await;
    let mut view = view_on(backend.clone(), "2026-02-01");
    view.load().await.unwrap();

    let decline = |_: &str| false;
    let outcome = view.delete_event(gala.id, &decline).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(view.events().events().await, vec![gala.clone()]);
    assert_eq!(backend.inner.calls().await.delete_event, 0);

    let accept = |_: &str| true;
    let outcome = view.delete_event(gala.id, &accept).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(view.events().events().await.is_empty());
    assert_eq!(view.success_message().as_deref(), Some(EVENT_DELETED_MESSAGE));
}

#[tokio::test]
async fn navigation_keeps_selection_and_close_clears_it() {
    let backend = seeded_february().await;
    let mut view = view_on(backend, "2026-02-01");
    view.load().await.unwrap();
    view.click_day(Some(20)).await;
    *view.form_mut() = EventDraft::new("Draft");

    view.next_month().await.unwrap();
    assert_eq!(view.month(), "2026-03".parse::<YearMonth>().unwrap());
    assert!(view.cells().await.iter().flatten().all(|cell| !cell.selected));

    view.prev_month().await.unwrap();
    assert_eq!(view.selected(), Some(key("2026-02-20")));

    view.close_panel();
    assert_eq!(view.selected(), None);
    assert_eq!(view.form(), &EventDraft::default());
    assert_eq!(view.error_message(), None);
}
