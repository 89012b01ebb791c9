// Event module
// Calendar event record as served by the Canopy events API

use chrono::{DateTime, Local};

pub mod dto;

pub use dto::{CreateEventRequest, EventDto, UpdateEventRequest};

/// A calendar event fetched from the events API.
///
/// Events are immutable for the duration of a render pass. `end` may equal
/// `start` (zero-duration event) but may never precede it.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub color: Option<String>,
    pub recurrence_rule: Option<String>, // already materialized per occurrence
    pub user_id: Option<i64>,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Event {
    /// Create a new event with required fields
    ///
    /// # Arguments
    /// * `name` - Event name (required, non-empty)
    /// * `start` - Event start time
    /// * `end` - Event end time, not before `start`
    ///
    /// # Examples
    /// ```
    /// use canopy_calendar::models::event::Event;
    /// use chrono::Local;
    ///
    /// let start = Local::now();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = Event::new("Team Meeting", start, end).unwrap();
    /// ```
    pub fn new(
        name: impl Into<String>,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Self, String> {
        let event = Self {
            id: None,
            name: name.into(),
            description: None,
            location: None,
            start,
            end,
            color: None,
            recurrence_rule: None,
            user_id: None,
            created_at: None,
            updated_at: None,
        };

        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Event name cannot be empty".to_string());
        }

        if self.end < self.start {
            return Err("Event end time cannot be before start time".to_string());
        }

        if let Some(ref color) = self.color {
            if !is_hex_color(color) {
                return Err("Color must be in hex format (#RRGGBB or #RGB)".to_string());
            }
        }

        Ok(())
    }

    /// Check if this occurrence came from a recurring series
    pub fn is_recurring(&self) -> bool {
        self.recurrence_rule.is_some()
    }

    /// Zero-duration events never occupy an hour slot.
    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    /// Get the duration of the event
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// `#RRGGBB` or `#RGB`.
pub fn is_hex_color(color: &str) -> bool {
    let Some(digits) = color.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 6 || digits.len() == 3) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Builder for creating events with optional fields
pub struct EventBuilder {
    id: Option<i64>,
    name: Option<String>,
    description: Option<String>,
    location: Option<String>,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
    color: Option<String>,
    recurrence_rule: Option<String>,
    user_id: Option<i64>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            name: None,
            description: None,
            location: None,
            start: None,
            end: None,
            color: None,
            recurrence_rule: None,
            user_id: None,
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Local>) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the event color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the recurrence rule (RRULE format)
    pub fn recurrence_rule(mut self, rule: impl Into<String>) -> Self {
        self.recurrence_rule = Some(rule.into());
        self
    }

    pub fn user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Build the event
    pub fn build(self) -> Result<Event, String> {
        let name = self.name.ok_or("Event name is required")?;
        let start = self.start.ok_or("Event start time is required")?;
        let end = self.end.ok_or("Event end time is required")?;

        let event = Event {
            id: self.id,
            name,
            description: self.description,
            location: self.location,
            start,
            end,
            color: self.color,
            recurrence_rule: self.recurrence_rule,
            user_id: self.user_id,
            created_at: None,
            updated_at: None,
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample_start() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    fn sample_end() -> DateTime<Local> {
        sample_start() + Duration::hours(1)
    }

    #[test]
    fn test_new_event_success() {
        let start = sample_start();
        let end = sample_end();
        let event = Event::new("Meeting", start, end).unwrap();

        assert_eq!(event.name, "Meeting");
        assert_eq!(event.start, start);
        assert_eq!(event.end, end);
        assert!(event.id.is_none());
        assert!(event.description.is_none());
    }

    #[test]
    fn test_new_event_empty_name() {
        let result = Event::new("   ", sample_start(), sample_end());
        assert_eq!(result.unwrap_err(), "Event name cannot be empty");
    }

    #[test]
    fn test_new_event_end_before_start() {
        let start = sample_start();
        let result = Event::new("Meeting", start, start - Duration::minutes(1));

        assert_eq!(
            result.unwrap_err(),
            "Event end time cannot be before start time"
        );
    }

    #[test]
    fn test_zero_duration_event_is_allowed() {
        let start = sample_start();
        let event = Event::new("Reminder", start, start).unwrap();

        assert!(event.is_instant());
        assert_eq!(event.duration(), Duration::zero());
    }

    #[test]
    fn test_builder_with_optional_fields() {
        let event = Event::builder()
            .id(7)
            .name("Conference")
            .description("Annual tech conference")
            .location("Convention Center")
            .start(sample_start())
            .end(sample_end())
            .color("#FF5733")
            .user_id(3)
            .build()
            .unwrap();

        assert_eq!(event.id, Some(7));
        assert_eq!(event.location.as_deref(), Some("Convention Center"));
        assert_eq!(event.color.as_deref(), Some("#FF5733"));
        assert_eq!(event.user_id, Some(3));
    }

    #[test]
    fn test_builder_missing_fields() {
        let missing_name = Event::builder().start(sample_start()).end(sample_end()).build();
        assert_eq!(missing_name.unwrap_err(), "Event name is required");

        let missing_start = Event::builder().name("Meeting").end(sample_end()).build();
        assert_eq!(missing_start.unwrap_err(), "Event start time is required");

        let missing_end = Event::builder().name("Meeting").start(sample_start()).build();
        assert_eq!(missing_end.unwrap_err(), "Event end time is required");
    }

    #[test]
    fn test_validate_invalid_color() {
        let mut event = Event::new("Meeting", sample_start(), sample_end()).unwrap();
        event.color = Some("red".to_string());
        assert!(event.validate().unwrap_err().contains("hex format"));

        event.color = Some("#GGGGGG".to_string());
        assert!(event.validate().is_err());
    }

    #[test]
    fn test_validate_valid_colors() {
        let mut event = Event::new("Meeting", sample_start(), sample_end()).unwrap();
        event.color = Some("#FF5733".to_string());
        assert!(event.validate().is_ok());

        event.color = Some("#f57".to_string());
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_is_recurring() {
        let mut event = Event::new("Meeting", sample_start(), sample_end()).unwrap();
        assert!(!event.is_recurring());

        event.recurrence_rule = Some("FREQ=WEEKLY;BYDAY=MO".to_string());
        assert!(event.is_recurring());
    }
}
