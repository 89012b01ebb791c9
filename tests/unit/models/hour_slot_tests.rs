// Unit tests for HourSlot labels and bounds
// Table-driven with test_case

use canopy_calendar::models::hour_slot::{HourSlot, PlacementError};
use chrono::{Local, NaiveDate, TimeZone};
use test_case::test_case;

#[test_case(0, "12 AM" ; "midnight")]
#[test_case(1, "1 AM" ; "early morning")]
#[test_case(9, "9 AM" ; "morning")]
#[test_case(11, "11 AM" ; "before noon")]
#[test_case(12, "12 PM" ; "noon")]
#[test_case(15, "3 PM" ; "afternoon")]
#[test_case(23, "11 PM" ; "last hour")]
fn test_label(hour: u32, expected: &str) {
    assert_eq!(HourSlot::new(hour).unwrap().label(), expected);
}

#[test_case(24 ; "one past the end")]
#[test_case(100 ; "far out of range")]
#[test_case(u32::MAX ; "max")]
fn test_out_of_range(hour: u32) {
    assert_eq!(HourSlot::new(hour), Err(PlacementError::HourOutOfRange(hour)));
    assert_eq!(HourSlot::try_from(hour), Err(PlacementError::HourOutOfRange(hour)));
}

#[test_case(0 ; "first hour")]
#[test_case(12 ; "noon")]
#[test_case(22 ; "late evening")]
fn test_bounds_span_one_hour(hour: u32) {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let (start, end) = HourSlot::new(hour).unwrap().bounds(date);

    assert_eq!(start, Local.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap());
    assert_eq!(end - start, chrono::Duration::hours(1));
}

#[test]
fn test_all_yields_24_in_order() {
    let hours: Vec<u32> = HourSlot::all().map(HourSlot::hour).collect();
    assert_eq!(hours, (0..24).collect::<Vec<_>>());
}

#[test]
fn test_display_is_24_hour() {
    assert_eq!(HourSlot::new(7).unwrap().to_string(), "07:00");
}
