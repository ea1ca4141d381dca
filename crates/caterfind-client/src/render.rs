//! Plain-text rendering of month grids and event lists.
//!
//! Each day takes five columns: the day number, a status marker, and either
//! brackets around the selected day or `*` after a day with events.

use std::fmt::Write;

use caterfind_calendar::{DayCell, DayClass, DisplayOptions, ReadOnlyCell};
use caterfind_core::{CalendarEvent, WEEKDAY_LABELS, YearMonth};

const EDITABLE_LEGEND: &str = "+ available  x busy  . past  [ ] selected  * events";
const READONLY_LEGEND: &str = "+ available  x busy";
const READONLY_TITLE: &str = "Caterer availability";
const BACK_LINK: &str = "< Back to caterers";

struct Glyph {
    day: u32,
    marker: char,
    selected: bool,
    has_events: bool,
}

fn marker(class: DayClass) -> char {
    match class {
        DayClass::Past => '.',
        DayClass::Available => '+',
        DayClass::Busy => 'x',
        DayClass::Neutral => ' ',
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

fn push_grid(out: &mut String, glyphs: &[Option<Glyph>]) {
    let header: String = WEEKDAY_LABELS.iter().map(|label| format!("{:^5}", label)).collect();
    push_line(out, &header);

    for week in glyphs.chunks(7) {
        let mut line = String::new();
        for glyph in week {
            match glyph {
                None => line.push_str("     "),
                Some(g) => {
                    let (open, close) = match (g.selected, g.has_events) {
                        (true, _) => ('[', ']'),
                        (false, true) => (' ', '*'),
                        (false, false) => (' ', ' '),
                    };
                    let _ = write!(line, "{}{:>2}{}{}", open, g.day, g.marker, close);
                }
            }
        }
        push_line(out, &line);
    }
}

/// Renders the caterer's editable month.
pub fn render_editable(month: YearMonth, cells: &[Option<DayCell>]) -> String {
    let glyphs: Vec<Option<Glyph>> = cells
        .iter()
        .map(|cell| {
            cell.map(|c| Glyph {
                day: c.day,
                marker: marker(c.class),
                selected: c.selected,
                has_events: c.has_events,
            })
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, &month.to_string());
    push_grid(&mut out, &glyphs);
    push_line(&mut out, EDITABLE_LEGEND);
    out
}

/// Renders a caterer's month as clients see it.
pub fn render_readonly(
    month: YearMonth,
    cells: &[Option<ReadOnlyCell>],
    options: DisplayOptions,
) -> String {
    let glyphs: Vec<Option<Glyph>> = cells
        .iter()
        .map(|cell| {
            cell.map(|c| Glyph {
                day: c.day,
                marker: marker(c.class()),
                selected: false,
                has_events: false,
            })
        })
        .collect();

    let mut out = String::new();
    if options.shows_back_link() {
        push_line(&mut out, BACK_LINK);
    }
    if options.shows_title() {
        push_line(&mut out, READONLY_TITLE);
    }
    push_line(&mut out, &month.to_string());
    push_grid(&mut out, &glyphs);
    push_line(&mut out, READONLY_LEGEND);
    out
}

/// One line per event.
pub fn render_events(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return "No events\n".to_string();
    }

    let mut out = String::new();
    for event in events {
        let mut line = format!(
            "#{:<4} {}  {}",
            event.id.0, event.event_date, event.event_host_name
        );
        if let Some(ref managed_by) = event.managed_by {
            let _ = write!(line, "  managed by {}", managed_by);
        }
        if let Some(ref location) = event.location {
            let _ = write!(line, "  at {}", location);
        }
        push_line(&mut out, &line);
    }
    out
}
