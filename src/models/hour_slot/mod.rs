//! Hour slot model.
//!
//! One of the 24 fixed rows of the day grid. Slots are derived per render
//! and never persisted.

use std::fmt;

use chrono::{DateTime, Duration, Local, NaiveDate, Timelike};
use thiserror::Error;

use crate::utils::date::local_datetime;

pub const HOURS_PER_DAY: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("hour {0} is outside the day grid (expected 0-23)")]
    HourOutOfRange(u32),
}

/// A validated hour index in `[0, 23]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourSlot(u32);

impl HourSlot {
    pub fn new(hour: u32) -> Result<Self, PlacementError> {
        if hour < HOURS_PER_DAY {
            Ok(Self(hour))
        } else {
            Err(PlacementError::HourOutOfRange(hour))
        }
    }

    /// The slot holding the given wall-clock time.
    pub fn containing<T: Timelike>(time: &T) -> Self {
        Self(time.hour())
    }

    pub fn hour(self) -> u32 {
        self.0
    }

    /// All 24 slots, midnight first.
    pub fn all() -> impl Iterator<Item = HourSlot> {
        (0..HOURS_PER_DAY).map(HourSlot)
    }

    /// All 24 slots starting at `first` and wrapping past midnight.
    pub fn rotated_from(first: HourSlot) -> impl Iterator<Item = HourSlot> {
        (0..HOURS_PER_DAY).map(move |offset| HourSlot((first.0 + offset) % HOURS_PER_DAY))
    }

    /// Half-open bounds `[start, end)` of this slot on `date`.
    ///
    /// The end is computed by adding one hour to the start instant, so the
    /// 23:00 slot ends at midnight of the following calendar day.
    pub fn bounds(self, date: NaiveDate) -> (DateTime<Local>, DateTime<Local>) {
        let start = local_datetime(date, self.0, 0);
        (start, start + Duration::hours(1))
    }

    /// 12-hour label, e.g. "9 AM", "12 PM".
    pub fn label(self) -> String {
        let (suffix, hour) = match self.0 {
            0 => ("AM", 12),
            1..=11 => ("AM", self.0),
            12 => ("PM", 12),
            _ => ("PM", self.0 - 12),
        };
        format!("{} {}", hour, suffix)
    }
}

impl TryFrom<u32> for HourSlot {
    type Error = PlacementError;

    fn try_from(hour: u32) -> Result<Self, Self::Error> {
        Self::new(hour)
    }
}

impl fmt::Display for HourSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}
