// Test fixtures - reusable test data
// Provides consistent events and API payloads across integration tests

#![allow(dead_code)]

use canopy_calendar::models::event::Event;
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde_json::{json, Value};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Jan 1, 2024
    pub fn new_years_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Local wall-clock time on Jan 1, 2024
    pub fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 1, hour, minute, 0).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::dates::at;
    use super::*;

    /// 09:15-09:45, fits in one hour
    pub fn standup() -> Event {
        Event::builder()
            .id(1)
            .name("Standup")
            .location("Room 4")
            .start(at(9, 15))
            .end(at(9, 45))
            .build()
            .unwrap()
    }

    /// 09:00-11:00, fills two rows
    pub fn workshop() -> Event {
        Event::builder()
            .id(2)
            .name("Workshop")
            .start(at(9, 0))
            .end(at(11, 0))
            .build()
            .unwrap()
    }

    /// 09:50-10:05, leaves a sliver in the 10 AM row
    pub fn quick_call() -> Event {
        Event::builder()
            .id(3)
            .name("Quick call")
            .start(at(9, 50))
            .end(at(10, 5))
            .build()
            .unwrap()
    }
}

/// API payloads as the events service sends them
pub mod payloads {
    use super::*;

    pub fn event_json(id: i64, name: &str, start: &str, end: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "start": start,
            "end": end,
            "location": "",
            "description": "",
            "user_id": 1,
            "color": "#4f9d69",
            "created_at": "2024-01-01T00:00:00.000Z",
            "updated_at": "2024-01-01T00:00:00.000Z"
        })
    }

    pub fn user_json(id: i64) -> Value {
        json!({
            "id": id,
            "name": "Ada Lovelace",
            "email": "ada@example.com"
        })
    }
}
