//! Day grid: 24 hour rows of placed events plus the now marker.

mod render;

use chrono::{DateTime, Local, NaiveDate};

use crate::models::event::Event;
use crate::models::hour_slot::HourSlot;
use crate::services::placement::{
    current_time_offset, events_in_slot, place_event, Placement, PlacementConfig,
};
use crate::utils::date::is_same_day;

pub use render::render_text;

/// An event positioned inside one hour row.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEvent {
    pub event: Event,
    pub placement: Placement,
    /// The event began in an earlier hour.
    pub continues_from_previous: bool,
    /// The event runs into a later hour.
    pub continues_into_next: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourRow {
    pub slot: HourSlot,
    /// Input order; later entries draw on top.
    pub events: Vec<PlacedEvent>,
    pub now_marker: Option<f32>,
}

impl HourRow {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayGrid {
    pub date: NaiveDate,
    pub rows: Vec<HourRow>,
    pub config: PlacementConfig,
}

impl DayGrid {
    /// Build the grid for `date` from the day's fetched events.
    ///
    /// The now marker is placed on the row containing `now` only when `now`
    /// falls on `date`.
    pub fn build(
        events: &[Event],
        date: NaiveDate,
        now: DateTime<Local>,
        config: PlacementConfig,
    ) -> Self {
        let now_slot = is_same_day(now, date).then(|| HourSlot::containing(&now));

        let rows = HourSlot::all()
            .map(|slot| {
                let (hour_start, hour_end) = slot.bounds(date);
                let events = events_in_slot(events, date, slot)
                    .into_iter()
                    .map(|event| PlacedEvent {
                        placement: place_event(event, date, slot, &config),
                        continues_from_previous: event.start < hour_start,
                        continues_into_next: event.end > hour_end,
                        event: event.clone(),
                    })
                    .collect();

                HourRow {
                    slot,
                    events,
                    now_marker: (now_slot == Some(slot))
                        .then(|| current_time_offset(&now, &config)),
                }
            })
            .collect();

        log::debug!(
            "Built day grid for {} from {} events",
            date,
            events.len()
        );

        Self { date, rows, config }
    }

    /// Rows starting at `first` and wrapping past midnight.
    pub fn rotated_from(&self, first: HourSlot) -> Vec<&HourRow> {
        HourSlot::rotated_from(first)
            .filter_map(|slot| self.row(slot))
            .collect()
    }

    pub fn row(&self, slot: HourSlot) -> Option<&HourRow> {
        self.rows.get(slot.hour() as usize)
    }

    /// Distinct events placed anywhere on the grid.
    pub fn event_count(&self) -> usize {
        let mut seen: Vec<&Event> = Vec::new();
        for placed in self.rows.iter().flat_map(|row| row.events.iter()) {
            if !seen.contains(&&placed.event) {
                seen.push(&placed.event);
            }
        }
        seen.len()
    }
}
