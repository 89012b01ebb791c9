use std::env;

use super::RepositoryError;

pub const AUTH_TOKEN_ENV: &str = "CANOPY_AUTH_TOKEN";

/// Supplies the bearer token for each request.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Result<String, RepositoryError>;
}

/// Token fixed at startup from settings, with the environment taking
/// precedence.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    pub fn from_env_or(configured: Option<String>) -> Self {
        let from_env = env::var(AUTH_TOKEN_ENV).ok().filter(|t| !t.trim().is_empty());
        if from_env.is_some() {
            log::debug!("Using auth token from {}", AUTH_TOKEN_ENV);
        }
        Self::new(from_env.or(configured))
    }
}

impl TokenProvider for StaticTokenProvider {
    fn token(&self) -> Result<String, RepositoryError> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or(RepositoryError::AuthTokenUnavailable)
    }
}
