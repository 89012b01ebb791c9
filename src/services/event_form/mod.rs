//! Create/edit form for events.
//!
//! Holds user input, validates it and turns it into API requests.

use chrono::{DateTime, Duration, Local, Utc};
use thiserror::Error;

use crate::models::event::{is_hex_color, CreateEventRequest, Event, UpdateEventRequest};
use crate::services::events_api::{EventRepository, RepositoryError};
use crate::utils::date::next_half_hour;

pub const DEFAULT_COLOR: &str = "#4f9d69";
pub const NO_RECURRENCE: &str = "Never";

#[derive(Debug, Error)]
pub enum FormError {
    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub name: String,
    pub description: String,
    pub location: String,
    pub color: String,
    pub recurrence: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub user_id: i64,
}

impl EventForm {
    /// Blank form starting at the next half hour, one hour long.
    pub fn new_at(now: DateTime<Local>, user_id: i64) -> Self {
        let start = next_half_hour(now);
        Self {
            name: String::new(),
            description: String::new(),
            location: String::new(),
            color: DEFAULT_COLOR.to_string(),
            recurrence: NO_RECURRENCE.to_string(),
            start,
            end: start + Duration::hours(1),
            user_id,
        }
    }

    /// Prefill from an existing event for editing.
    pub fn from_event(event: &Event, user_id: i64) -> Self {
        Self {
            name: event.name.clone(),
            description: event.description.clone().unwrap_or_default(),
            location: event.location.clone().unwrap_or_default(),
            color: event
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            recurrence: event
                .recurrence_rule
                .clone()
                .unwrap_or_else(|| NO_RECURRENCE.to_string()),
            start: event.start,
            end: event.end,
            user_id: event.user_id.unwrap_or(user_id),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Event name cannot be empty".to_string());
        }

        if self.end < self.start {
            return Err("End time must be after start time".to_string());
        }

        if !is_hex_color(self.color.trim()) {
            return Err(format!("Invalid color '{}'", self.color));
        }

        Ok(())
    }

    fn recurrence_rule(&self) -> Option<String> {
        let rule = self.recurrence.trim();
        if rule.is_empty() || rule.eq_ignore_ascii_case(NO_RECURRENCE) {
            None
        } else {
            Some(rule.to_string())
        }
    }

    pub fn into_create_request(self) -> Result<CreateEventRequest, String> {
        self.validate()?;
        let recurrence_rule = self.recurrence_rule();

        Ok(CreateEventRequest {
            name: self.name.trim().to_string(),
            start: self.start.with_timezone(&Utc),
            end: self.end.with_timezone(&Utc),
            location: self.location.trim().to_string(),
            description: self.description.trim().to_string(),
            user_id: self.user_id,
            color: self.color.trim().to_string(),
            recurrence_rule,
        })
    }

    pub fn into_update_request(self) -> Result<UpdateEventRequest, String> {
        self.into_create_request()
    }

    pub fn submit_create(self, repository: &dyn EventRepository) -> Result<Event, FormError> {
        let request = self.into_create_request().map_err(FormError::Invalid)?;
        Ok(repository.create(&request)?)
    }

    pub fn submit_update(
        self,
        repository: &dyn EventRepository,
        id: i64,
    ) -> Result<Event, FormError> {
        let request = self.into_update_request().map_err(FormError::Invalid)?;
        Ok(repository.update(id, &request)?)
    }
}
