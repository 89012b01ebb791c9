use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::{ApiEnvironment, Settings};

pub const CONFIG_PATH_ENV: &str = "CANOPY_CONFIG";
pub const API_ENV_VAR: &str = "CANOPY_API_ENV";

const CONFIG_FILE_NAME: &str = "config.toml";

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "Canopy", "canopy").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

pub struct SettingsService {
    path: Option<PathBuf>,
}

impl SettingsService {
    /// Explicit path, then `CANOPY_CONFIG`, then the platform config dir.
    pub fn new(explicit: Option<PathBuf>) -> Self {
        let path = explicit
            .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(default_config_path);
        Self { path }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load settings, falling back to defaults when the file is absent.
    pub fn get(&self) -> Result<Settings> {
        let mut settings = match &self.path {
            Some(path) if path.exists() => {
                let data = fs::read_to_string(path)
                    .with_context(|| format!("failed to read settings from {}", path.display()))?;
                toml::from_str::<Settings>(&data)
                    .with_context(|| format!("failed to parse settings from {}", path.display()))?
            }
            Some(path) => {
                log::debug!("No settings file at {}, using defaults", path.display());
                Settings::default()
            }
            None => {
                log::warn!("Could not determine a config directory, using default settings");
                Settings::default()
            }
        };

        apply_env_overrides(&mut settings)?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        Ok(settings)
    }

    pub fn update(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        let path = self
            .path
            .as_ref()
            .ok_or_else(|| anyhow!("No settings path available"))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(settings).context("failed to serialize settings")?;
        fs::write(path, data)
            .with_context(|| format!("failed to write settings to {}", path.display()))?;
        Ok(())
    }
}

fn apply_env_overrides(settings: &mut Settings) -> Result<()> {
    if let Ok(value) = env::var(API_ENV_VAR) {
        if !value.trim().is_empty() {
            settings.api.environment = value
                .parse::<ApiEnvironment>()
                .map_err(|e| anyhow!("{} is invalid: {}", API_ENV_VAR, e))?;
        }
    }
    Ok(())
}
