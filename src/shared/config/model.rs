use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub store: StoreConfig,
    pub stream: Option<StreamConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub http_addr: String,
    /// Keep HTTP/1.1 connections open between requests
    #[serde(default)]
    pub keep_alive: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file; ":memory:" opens a throwaway database
    pub database_path: String,
}

#[derive(Debug, Deserialize)]
pub struct StreamConfig {
    /// Page size when the request has no `limit` (defaults to 2)
    pub default_limit: Option<u32>,
    /// Cap on client supplied limits
    pub max_limit: Option<u32>,
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("WALL_STREAM_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
