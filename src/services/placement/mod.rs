//! Interval placement engine.
//!
//! Maps a day's events onto the 24 hour rows of the day grid and computes
//! where each event sits inside a row. Everything here is pure: callers pass
//! the clock reading and the configuration explicitly.

use chrono::{DateTime, Local, NaiveDate, Timelike};

use crate::models::event::Event;
use crate::models::hour_slot::{HourSlot, PlacementError};
use crate::models::settings::GridSettings;

const MINUTES_PER_HOUR: i64 = 60;

/// Pixel geometry of a single hour row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    pub box_height: f32,
    /// Raw heights at or below this are replaced by the fallback height.
    pub min_visible_height: f32,
    pub visual_margin: f32,
    pub now_marker_margin: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            box_height: 64.0,
            min_visible_height: 8.0,
            visual_margin: 4.0,
            now_marker_margin: 1.0,
        }
    }
}

impl PlacementConfig {
    pub fn with_box_height(box_height: f32) -> Self {
        Self {
            box_height,
            ..Self::default()
        }
    }

    fn fallback_height(&self) -> f32 {
        self.box_height - self.visual_margin
    }
}

impl From<&GridSettings> for PlacementConfig {
    fn from(grid: &GridSettings) -> Self {
        Self {
            box_height: grid.box_height,
            min_visible_height: grid.min_visible_height,
            visual_margin: grid.visual_margin,
            now_marker_margin: grid.now_marker_margin,
        }
    }
}

/// Vertical offset and height of an event inside one hour row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top: f32,
    pub height: f32,
}

/// Half-open overlap of `[start, end)` with `[hour_start, hour_end)`.
///
/// An event ending exactly at `hour_start` or starting exactly at
/// `hour_end` does not overlap, and neither does a zero-duration event.
pub fn overlaps_hour(
    event: &Event,
    hour_start: DateTime<Local>,
    hour_end: DateTime<Local>,
) -> bool {
    event.start < hour_end && event.end > hour_start
}

/// Events overlapping `hour` on `date`, in input order.
pub fn events_in_hour<'a>(
    events: &'a [Event],
    date: NaiveDate,
    hour: u32,
) -> Result<Vec<&'a Event>, PlacementError> {
    let slot = HourSlot::new(hour)?;
    Ok(events_in_slot(events, date, slot))
}

pub fn events_in_slot(events: &[Event], date: NaiveDate, slot: HourSlot) -> Vec<&Event> {
    let (hour_start, hour_end) = slot.bounds(date);
    events
        .iter()
        .filter(|event| overlaps_hour(event, hour_start, hour_end))
        .collect()
}

/// Offset and height of `event` within `slot` on `date`.
///
/// Events continuing from an earlier hour are pinned to the row top, and
/// events running past this hour are pinned to the row bottom. Each hour an
/// event overlaps is placed independently.
pub fn place_event(
    event: &Event,
    date: NaiveDate,
    slot: HourSlot,
    config: &PlacementConfig,
) -> Placement {
    let (hour_start, hour_end) = slot.bounds(date);

    let start_minutes = if event.start > hour_start {
        minutes_between(hour_start, event.start)
    } else {
        0
    };
    let end_minutes = if event.end < hour_end {
        minutes_between(hour_start, event.end)
    } else {
        MINUTES_PER_HOUR
    };

    let top = minutes_to_pixels(start_minutes, config.box_height);
    let raw_height = minutes_to_pixels(end_minutes - start_minutes, config.box_height);
    let height = if raw_height > config.min_visible_height {
        raw_height
    } else {
        config.fallback_height()
    };

    Placement { top, height }
}

/// Offset of the current-time marker inside its hour row.
pub fn current_time_offset<T: Timelike>(now: &T, config: &PlacementConfig) -> f32 {
    minutes_to_pixels(i64::from(now.minute()), config.box_height) - config.now_marker_margin
}

fn minutes_between(from: DateTime<Local>, to: DateTime<Local>) -> i64 {
    (to - from).num_minutes().clamp(0, MINUTES_PER_HOUR)
}

fn minutes_to_pixels(minutes: i64, box_height: f32) -> f32 {
    minutes as f32 / MINUTES_PER_HOUR as f32 * box_height
}
