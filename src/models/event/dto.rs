//! Wire records exchanged with the events API.
//!
//! The API speaks JSON with ISO-8601 timestamps. Incoming records are
//! converted into [`Event`] strictly: a record that cannot be fully parsed
//! and validated is rejected as a whole.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Event;

/// Event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDto {
    pub id: i64,
    pub name: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub user_id: i64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of `POST /events/create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub user_id: i64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
}

/// Body of `PUT /events/{id}`. Same shape as a create.
pub type UpdateEventRequest = CreateEventRequest;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DtoError {
    #[error("invalid timestamp in field '{field}': {value}")]
    Timestamp { field: &'static str, value: String },

    #[error("event {id} rejected: {reason}")]
    Invalid { id: i64, reason: String },
}

impl TryFrom<EventDto> for Event {
    type Error = DtoError;

    fn try_from(dto: EventDto) -> Result<Self, Self::Error> {
        let event = Event {
            id: Some(dto.id),
            name: dto.name,
            description: non_empty(dto.description),
            location: non_empty(dto.location),
            start: parse_instant("start", &dto.start)?,
            end: parse_instant("end", &dto.end)?,
            color: non_empty(dto.color),
            recurrence_rule: non_empty(dto.recurrence_rule),
            user_id: Some(dto.user_id),
            created_at: Some(parse_instant("created_at", &dto.created_at)?),
            updated_at: Some(parse_instant("updated_at", &dto.updated_at)?),
        };

        event
            .validate()
            .map_err(|reason| DtoError::Invalid { id: dto.id, reason })?;
        Ok(event)
    }
}

fn parse_instant(field: &'static str, value: &str) -> Result<DateTime<Local>, DtoError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|_| DtoError::Timestamp {
            field,
            value: value.to_string(),
        })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_dto() -> EventDto {
        EventDto {
            id: 42,
            name: "Standup".to_string(),
            start: "2024-01-01T09:15:00.000Z".to_string(),
            end: "2024-01-01T09:45:00.000Z".to_string(),
            location: Some("Room 4".to_string()),
            description: Some(String::new()),
            user_id: 1,
            color: Some("#4f9d69".to_string()),
            recurrence_rule: None,
            created_at: "2023-12-30T10:00:00Z".to_string(),
            updated_at: "2023-12-31T10:00:00+02:00".to_string(),
        }
    }

    #[test]
    fn test_dto_converts_to_event() {
        let event = Event::try_from(sample_dto()).unwrap();

        let expected_start = DateTime::parse_from_rfc3339("2024-01-01T09:15:00Z").unwrap();
        assert_eq!(event.id, Some(42));
        assert_eq!(event.start, expected_start);
        assert_eq!(event.duration(), chrono::Duration::minutes(30));
        assert_eq!(event.location.as_deref(), Some("Room 4"));
        assert_eq!(event.description, None);
        assert_eq!(event.user_id, Some(1));
    }

    #[test]
    fn test_dto_deserializes_from_api_json() {
        let json = r##"{
            "id": 3,
            "name": "Lunch",
            "start": "2024-01-01T12:00:00Z",
            "end": "2024-01-01T13:00:00Z",
            "location": "Cafe",
            "description": "with team",
            "user_id": 9,
            "color": "#ff0000",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"##;

        let dto: EventDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.recurrence_rule, None);
        assert_eq!(dto.name, "Lunch");
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let mut dto = sample_dto();
        dto.end = "tomorrow-ish".to_string();

        let err = Event::try_from(dto).unwrap_err();
        assert_eq!(
            err,
            DtoError::Timestamp {
                field: "end",
                value: "tomorrow-ish".to_string()
            }
        );
    }

    #[test]
    fn test_inverted_interval_is_rejected() {
        let mut dto = sample_dto();
        dto.end = "2024-01-01T09:00:00Z".to_string();

        let err = Event::try_from(dto).unwrap_err();
        assert!(matches!(err, DtoError::Invalid { id: 42, .. }));
    }

    #[test]
    fn test_create_request_serializes_without_missing_rule() {
        let request = CreateEventRequest {
            name: "Review".to_string(),
            start: "2024-01-01T09:00:00Z".parse().unwrap(),
            end: "2024-01-01T10:00:00Z".parse().unwrap(),
            location: String::new(),
            description: String::new(),
            user_id: 1,
            color: "#4f9d69".to_string(),
            recurrence_rule: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("recurrence_rule").is_none());
        assert_eq!(value["start"], "2024-01-01T09:00:00Z");
    }
}
