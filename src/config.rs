//! Service configuration
//!
//! Read from a YAML file when one exists, then overridden by `HOST`, `PORT`
//! and `VITALSINK_DATA_FILE` from the environment. Every setting has a
//! default, so running without any configuration at all is fine.

use serde::Deserialize;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use thiserror::Error;
use crate::api::rest::DEFAULT_BODY_LIMIT;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const CONFIG_PATH_ENV: &str = "VITALSINK_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("Invalid bind address {0}")]
    InvalidHost(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Largest request body accepted on `POST /data`
    pub max_body_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            path: "latest_sensor_data.json".to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_body_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ApiConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Load the file at `path` (defaults if it does not exist) and apply
/// environment overrides.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let mut config = load_file(path)?;
    apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

fn load_file(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn parse_config(content: &str) -> Result<Config, serde_yaml::Error> {
    // An empty document deserializes as null rather than an empty mapping
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(content)
}

fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("HOST") {
        config.api.host = host;
    }
    if let Some(port) = lookup("PORT") {
        config.api.port = port
            .parse()
            .map_err(|_| ConfigError::InvalidEnv { key: "PORT", value: port })?;
    }
    if let Some(path) = lookup("VITALSINK_DATA_FILE") {
        config.storage.path = path;
    }
    Ok(())
}
