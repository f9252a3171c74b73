use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Connection settings for the instrument hub.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Hostname or address of the hub.
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_host() -> String {
    "masthead.local".to_string()
}

impl DeviceConfig {
    /// URL of the wind socket.
    pub fn wind_url(&self) -> String {
        format!("ws://{}/ws", self.host)
    }

    /// URL of the generic data socket.
    pub fn data_url(&self) -> String {
        format!("ws://{}/ws_data", self.host)
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Common logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Instrument hub connection settings.
    #[serde(default)]
    pub device: DeviceConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the platform config directory, falling
    /// back to defaults when no file exists there.
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => load_config(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Default configuration file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("helmsight").join("config.json5"))
}

/// Load a configuration file in JSON5 format.
pub fn load_config<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&content)
}

/// Load a configuration from a JSON5 string.
pub fn parse_config<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T> {
    json5::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_app_config() {
        let json5 = r#"
        {
            device: {
                host: "192.168.4.1",
            },
            logging: {
                level: "debug",
                format: "json",
            },
        }
        "#;

        let config: AppConfig = parse_config(json5).unwrap();

        assert_eq!(config.device.host, "192.168.4.1");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_default_config() {
        let config: AppConfig = parse_config("{}").unwrap();

        assert_eq!(config.device.host, "masthead.local");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_socket_urls() {
        let device = DeviceConfig {
            host: "10.0.0.2".to_string(),
        };
        assert_eq!(device.wind_url(), "ws://10.0.0.2/ws");
        assert_eq!(device.data_url(), "ws://10.0.0.2/ws_data");
    }
}
