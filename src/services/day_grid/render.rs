use std::fmt::Write;

use chrono::{DateTime, Local};

use super::{DayGrid, HourRow, PlacedEvent};
use crate::models::hour_slot::HourSlot;

/// Plain-text day grid, optionally rotated so `first` is the top row.
pub fn render_text(grid: &DayGrid, first: Option<HourSlot>) -> String {
    let rows: Vec<&HourRow> = match first {
        Some(slot) => grid.rotated_from(slot),
        None => grid.rows.iter().collect(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", grid.date.format("%A, %B %-d, %Y"));

    for row in rows {
        let _ = writeln!(out, "{:>5}", row.slot.label());
        if let Some(offset) = row.now_marker {
            let _ = writeln!(out, "      --- now (offset {:.1}) ---", offset);
        }
        for placed in &row.events {
            let _ = writeln!(out, "      {}", event_line(placed));
        }
    }

    out
}

fn event_line(placed: &PlacedEvent) -> String {
    let event = &placed.event;
    let mut line = format!(
        "{}-{}  {}",
        time_label(event.start, placed.continues_from_previous),
        time_label(event.end, false),
        event.name
    );

    if let Some(location) = &event.location {
        let _ = write!(line, " @ {}", location);
    }
    if event.is_recurring() {
        line.push_str(" (repeats)");
    }
    if placed.continues_from_previous {
        line.push_str(" (cont.)");
    }
    let _ = write!(
        line,
        "  [top {:.1}, height {:.1}]",
        placed.placement.top, placed.placement.height
    );

    line
}

fn time_label(instant: DateTime<Local>, with_date: bool) -> String {
    if with_date {
        instant.format("%m/%d %H:%M").to_string()
    } else {
        instant.format("%H:%M").to_string()
    }
}
