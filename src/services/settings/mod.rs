// Settings service module
// Loads and stores config.toml

mod service;

pub use service::{default_config_path, SettingsService, API_ENV_VAR, CONFIG_PATH_ENV};
