// Property-based tests for the interval placement engine
// Checks the half-open overlap law and placement bounds with random events

use canopy_calendar::models::event::Event;
use canopy_calendar::models::hour_slot::HourSlot;
use canopy_calendar::services::placement::{events_in_hour, place_event, PlacementConfig};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use proptest::prelude::*;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn midnight() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Events starting anywhere from the previous evening to the next morning,
/// lasting up to six hours.
fn event_strategy() -> impl Strategy<Value = Event> {
    (-180i64..(26 * 60), 0i64..(6 * 60)).prop_map(|(start_offset, length)| {
        let start = midnight() + Duration::minutes(start_offset);
        Event::new("Generated", start, start + Duration::minutes(length)).unwrap()
    })
}

proptest! {
    /// Property: an event is in hour h exactly when start < hourEnd and end > hourStart
    #[test]
    fn prop_half_open_overlap_law(
        events in prop::collection::vec(event_strategy(), 0..12),
        hour in 0u32..24,
    ) {
        let (hour_start, hour_end) = HourSlot::new(hour).unwrap().bounds(date());
        let selected = events_in_hour(&events, date(), hour).unwrap();

        let expected: Vec<&Event> = events
            .iter()
            .filter(|e| e.start < hour_end && e.end > hour_start)
            .collect();
        prop_assert_eq!(selected, expected);
    }

    /// Property: an event starting exactly at the end of an hour is not in that hour
    #[test]
    fn prop_event_starting_at_hour_end_excluded(hour in 0u32..24, length in 1i64..240) {
        let (_, hour_end) = HourSlot::new(hour).unwrap().bounds(date());
        let events = vec![Event::new("Next", hour_end, hour_end + Duration::minutes(length)).unwrap()];

        prop_assert!(events_in_hour(&events, date(), hour).unwrap().is_empty());
    }

    /// Property: zero-duration events never occupy a slot
    #[test]
    fn prop_zero_duration_never_placed(offset in 0i64..(24 * 60), hour in 0u32..24) {
        let instant = midnight() + Duration::minutes(offset);
        let events = vec![Event::new("Ping", instant, instant).unwrap()];

        prop_assert!(events_in_hour(&events, date(), hour).unwrap().is_empty());
    }

    /// Property: placement stays inside the row and is idempotent
    #[test]
    fn prop_placement_within_row(
        event in event_strategy(),
        hour in 0u32..24,
        box_height in 16.0f32..200.0,
    ) {
        let slot = HourSlot::new(hour).unwrap();
        let config = PlacementConfig::with_box_height(box_height);
        let placement = place_event(&event, date(), slot, &config);

        prop_assert!(placement.top >= 0.0);
        prop_assert!(placement.top <= box_height);
        prop_assert!(placement.height > 0.0);
        prop_assert!(placement.height <= box_height);
        prop_assert_eq!(placement, place_event(&event, date(), slot, &config));
    }
}
