//! Events API client.
//!
//! All network I/O goes through [`EventRepository`]. The HTTP
//! implementation lives in [`client`]; tests substitute the generated mock.

pub mod auth;
pub mod client;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::event::dto::DtoError;
use crate::models::event::{CreateEventRequest, Event, UpdateEventRequest};
use crate::models::user::User;

pub use auth::{StaticTokenProvider, TokenProvider, AUTH_TOKEN_ENV};
pub use client::HttpEventRepository;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("no auth token available; sign in or set {}", AUTH_TOKEN_ENV)]
    AuthTokenUnavailable,

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("invalid event: {0}")]
    InvalidEvent(String),
}

impl From<DtoError> for RepositoryError {
    fn from(err: DtoError) -> Self {
        match err {
            DtoError::Timestamp { .. } => RepositoryError::Parse(err.to_string()),
            DtoError::Invalid { .. } => RepositoryError::InvalidEvent(err.to_string()),
        }
    }
}

/// Remote CRUD for events plus the user lookup.
#[cfg_attr(test, mockall::automock)]
pub trait EventRepository: Send + Sync {
    fn create(&self, request: &CreateEventRequest) -> Result<Event, RepositoryError>;

    /// Events on `date`, in the order the API returned them.
    fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Event>, RepositoryError>;

    fn update(&self, id: i64, request: &UpdateEventRequest) -> Result<Event, RepositoryError>;

    fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    fn get_user(&self, id: i64) -> Result<User, RepositoryError>;
}
