//! Fixed-interval "now" ticker for re-rendering the grid.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Local};

#[derive(Debug, Clone)]
pub struct RefreshSchedule {
    interval: Duration,
    last_due: Option<DateTime<Local>>,
}

impl RefreshSchedule {
    pub fn new(interval: StdDuration) -> Self {
        Self {
            interval: Duration::from_std(interval).unwrap_or_else(|_| Duration::seconds(60)),
            last_due: None,
        }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(StdDuration::from_secs(secs.max(1)))
    }

    pub fn interval(&self) -> StdDuration {
        self.interval.to_std().unwrap_or_default()
    }

    /// Whether a refresh is due at `now`. Due on the first tick.
    pub fn tick_at(&mut self, now: DateTime<Local>) -> bool {
        let due = self
            .last_due
            .is_none_or(|last| now - last >= self.interval || now < last);

        if due {
            self.last_due = Some(now);
        }
        due
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Local::now())
    }

    /// Time left until the next due tick.
    pub fn next_due_in(&self, now: DateTime<Local>) -> StdDuration {
        let Some(last) = self.last_due else {
            return StdDuration::ZERO;
        };

        (last + self.interval - now)
            .to_std()
            .unwrap_or(StdDuration::ZERO)
    }
}
