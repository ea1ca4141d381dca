//! `caterfind events`: list, add and delete events.

use std::io::{BufRead, Write};
use std::sync::Arc;

use caterfind_api::{CatererBackend, EventQuery, OwnerId};
use caterfind_calendar::{AlwaysConfirm, AvailabilityView, Confirm, DeleteOutcome};
use caterfind_core::{DateKey, EventDraft, EventId};

use crate::error::ClientResult;
use crate::render::render_events;

/// Asks on the terminal; anything but `y`/`yes` declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if std::io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub async fn list(
    backend: Arc<dyn CatererBackend>,
    owner: OwnerId,
    query: EventQuery,
    json: bool,
) -> ClientResult<()> {
    let events = backend.list_events(owner, query).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    } else {
        print!("{}", render_events(&events));
    }
    Ok(())
}

pub async fn add(
    backend: Arc<dyn CatererBackend>,
    owner: OwnerId,
    date: DateKey,
    draft: EventDraft,
) -> ClientResult<()> {
    let mut view = AvailabilityView::new(owner, backend).with_selected(date);
    *view.form_mut() = draft;

    let event = view.save_event().await?;
    if let Some(message) = view.success_message() {
        println!("{}", message);
    }
    print!("{}", render_events(std::slice::from_ref(&event)));
    Ok(())
}

pub async fn delete(
    backend: Arc<dyn CatererBackend>,
    owner: OwnerId,
    id: EventId,
    yes: bool,
) -> ClientResult<()> {
    let mut view = AvailabilityView::new(owner, backend);
    let confirm: &dyn Confirm = if yes { &AlwaysConfirm } else { &PromptConfirm };

    match view.delete_event(id, confirm).await? {
        DeleteOutcome::Deleted => {
            if let Some(message) = view.success_message() {
                println!("{}", message);
            }
        }
        DeleteOutcome::Declined => println!("Cancelled."),
    }
    Ok(())
}
