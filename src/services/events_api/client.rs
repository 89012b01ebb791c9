use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use super::auth::{StaticTokenProvider, TokenProvider};
use super::{EventRepository, RepositoryError};
use crate::models::event::{CreateEventRequest, Event, EventDto, UpdateEventRequest};
use crate::models::settings::ApiSettings;
use crate::models::user::User;

/// [`EventRepository`] over the Canopy REST API.
pub struct HttpEventRepository {
    client: Client,
    base_url: String,
    tokens: Box<dyn TokenProvider>,
}

impl HttpEventRepository {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        tokens: Box<dyn TokenProvider>,
    ) -> Result<Self, RepositoryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| {
                RepositoryError::Network(format!("failed to build HTTP client: {}", err))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn from_settings(api: &ApiSettings) -> Result<Self, RepositoryError> {
        Self::new(
            api.resolved_base_url(),
            Duration::from_secs(api.timeout_secs),
            Box::new(StaticTokenProvider::from_env_or(api.auth_token.clone())),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, RepositoryError> {
        // Resolve the token first so a missing sign-in never hits the wire.
        let token = self.tokens.token()?;
        let url = format!("{}{}", self.base_url, path);

        Ok(self
            .client
            .request(method, url)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/json"))
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, RepositoryError> {
        let request = build(self.request(method.clone(), path)?);
        let response = request.send().map_err(|err| {
            log::warn!("API error: no response for {} {}: {}", method, path, err);
            map_transport_error(err)
        })?;

        let status = response.status();
        log::debug!("API response: {} {} -> {}", method, path, status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        log::warn!(
            "API error: {} {}{} -> {}: {}",
            method,
            self.base_url,
            path,
            status,
            body
        );

        Err(match status {
            StatusCode::UNAUTHORIZED => RepositoryError::Unauthorized,
            StatusCode::NOT_FOUND => RepositoryError::NotFound(path.to_string()),
            _ => RepositoryError::Status {
                status: status.as_u16(),
                body,
            },
        })
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<T, RepositoryError> {
        let response = self.send(method, path, build)?;
        let body = response.text().map_err(map_transport_error)?;
        serde_json::from_str(&body).map_err(|err| {
            log::warn!("Malformed API response for {}: {}", path, err);
            RepositoryError::Parse(format!("{}: {}", path, err))
        })
    }
}

impl EventRepository for HttpEventRepository {
    fn create(&self, request: &CreateEventRequest) -> Result<Event, RepositoryError> {
        let dto: EventDto =
            self.send_json(Method::POST, "/events/create", |req| req.json(request))?;
        let event = Event::try_from(dto)?;
        log::info!("Created event {:?} '{}'", event.id, event.name);
        Ok(event)
    }

    fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Event>, RepositoryError> {
        let day = date.format("%Y-%m-%d").to_string();
        let dtos: Vec<EventDto> =
            self.send_json(Method::GET, "/events", |req| req.query(&[("date", day)]))?;

        // One bad record fails the whole day rather than silently dropping it.
        let events = dtos
            .into_iter()
            .map(Event::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("Fetched {} events for {}", events.len(), date);
        Ok(events)
    }

    fn update(&self, id: i64, request: &UpdateEventRequest) -> Result<Event, RepositoryError> {
        let path = format!("/events/{}", id);
        let dto: EventDto = self.send_json(Method::PUT, &path, |req| req.json(request))?;
        let event = Event::try_from(dto)?;
        log::info!("Updated event {}", id);
        Ok(event)
    }

    fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let path = format!("/events/{}", id);
        self.send(Method::DELETE, &path, |req| req)?;
        log::info!("Deleted event {}", id);
        Ok(())
    }

    fn get_user(&self, id: i64) -> Result<User, RepositoryError> {
        self.send_json(Method::GET, &format!("/users/{}", id), |req| req)
    }
}

fn map_transport_error(err: reqwest::Error) -> RepositoryError {
    if err.is_timeout() {
        RepositoryError::Timeout
    } else {
        RepositoryError::Network(err.to_string())
    }
}
