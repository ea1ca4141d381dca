//! `caterfind calendar`: print one month.

use std::sync::Arc;

use caterfind_api::{CatererBackend, OwnerId};
use caterfind_calendar::{AvailabilityView, DisplayOptions, ReadOnlyAvailabilityView};
use caterfind_core::{AvailabilityEntry, DateKey, YearMonth};

use crate::error::ClientResult;
use crate::render::{render_editable, render_events, render_readonly};

/// What to show.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarArgs {
    pub month: Option<YearMonth>,
    pub read_only: bool,
    pub embedded: bool,
    pub select: Option<DateKey>,
    pub json: bool,
}

pub async fn run(
    backend: Arc<dyn CatererBackend>,
    owner: OwnerId,
    args: CalendarArgs,
) -> ClientResult<()> {
    if args.read_only {
        read_only(backend, owner, args).await
    } else {
        editable(backend, owner, args).await
    }
}

async fn editable(
    backend: Arc<dyn CatererBackend>,
    owner: OwnerId,
    args: CalendarArgs,
) -> ClientResult<()> {
    let mut view = AvailabilityView::new(owner, backend);
    if let Some(date) = args.select {
        view = view.with_selected(date).starting_at(date.year_month());
    }
    if let Some(month) = args.month {
        view = view.starting_at(month);
    }
    view.load().await?;

    if args.json {
        let entries: Vec<AvailabilityEntry> = view.availability().snapshot().await.iter().collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    print!("{}", render_editable(view.month(), &view.cells().await));
    if let Some(date) = view.selected() {
        println!();
        println!("Events on {}:", date);
        print!("{}", render_events(&view.events_for_selected().await));
    }
    Ok(())
}

async fn read_only(
    backend: Arc<dyn CatererBackend>,
    owner: OwnerId,
    args: CalendarArgs,
) -> ClientResult<()> {
    let options = if args.embedded {
        DisplayOptions::embedded()
    } else {
        DisplayOptions::default()
    };
    let mut view = ReadOnlyAvailabilityView::new(owner, backend).with_options(options);
    if let Some(month) = args.month {
        view = view.starting_at(month);
    }
    view.load().await?;

    let cells = view.cells().await;
    if args.json {
        let entries: Vec<AvailabilityEntry> = cells
            .iter()
            .flatten()
            .filter(|cell| cell.status.is_set())
            .map(|cell| AvailabilityEntry::new(cell.date, cell.status))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    print!("{}", render_readonly(view.month(), &cells, view.options()));
    Ok(())
}
