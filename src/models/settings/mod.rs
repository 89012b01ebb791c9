// Settings module
// Client configuration loaded from config.toml

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const PRODUCTION_BASE_URL: &str = "https://canopy-api-production.up.railway.app";
pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub grid: GridSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        self.api.validate()?;
        self.grid.validate()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiEnvironment {
    #[default]
    Development,
    Production,
}

impl ApiEnvironment {
    pub fn default_base_url(self) -> &'static str {
        match self {
            ApiEnvironment::Development => DEVELOPMENT_BASE_URL,
            ApiEnvironment::Production => PRODUCTION_BASE_URL,
        }
    }
}

impl FromStr for ApiEnvironment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "production" => Ok(ApiEnvironment::Production),
            "development" | "dev" | "local" => Ok(ApiEnvironment::Development),
            other => Err(format!("Unknown API environment '{}'", other)),
        }
    }
}

impl fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiEnvironment::Development => write!(f, "development"),
            ApiEnvironment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub environment: ApiEnvironment,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub auth_token: Option<String>,
    pub user_id: i64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            environment: ApiEnvironment::default(),
            base_url: None,
            timeout_secs: 10,
            auth_token: None,
            user_id: 1,
        }
    }
}

impl ApiSettings {
    /// Explicit `base_url` wins over the environment default.
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.environment.default_base_url())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("API timeout must be greater than 0 seconds".to_string());
        }

        let base_url = self.resolved_base_url();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(format!("API base URL must be http(s): {}", base_url));
        }

        Ok(())
    }
}

/// Day grid geometry, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub box_height: f32,
    pub min_visible_height: f32,
    pub visual_margin: f32,
    pub now_marker_margin: f32,
    pub refresh_interval_secs: u64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            box_height: 64.0,
            min_visible_height: 8.0,
            visual_margin: 4.0,
            now_marker_margin: 1.0,
            refresh_interval_secs: 60,
        }
    }
}

impl GridSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.box_height > 0.0) {
            return Err("Grid box height must be greater than 0".to_string());
        }

        for (name, value) in [
            ("min_visible_height", self.min_visible_height),
            ("visual_margin", self.visual_margin),
            ("now_marker_margin", self.now_marker_margin),
        ] {
            if !(0.0..self.box_height).contains(&value) {
                return Err(format!(
                    "Grid {} must be between 0 and the box height ({})",
                    name, self.box_height
                ));
            }
        }

        if self.refresh_interval_secs == 0 {
            return Err("Refresh interval must be greater than 0 seconds".to_string());
        }

        Ok(())
    }
}
