//! Configuration management for the demo server.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::error::Error;

/// Server configuration, read from `~/.mcp-demo/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// Default tracing level for the `mcp_demo` target (`RUST_LOG` wins).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherConfig {
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Upper bound for each outbound HTTP call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load config from `path`, or from the default location when `None`.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, Error> {
        toml::to_string_pretty(self).map_err(|e| Error::Other(e.to_string()))
    }

    /// Path to the global directory (`~/.mcp-demo/`)
    pub fn global_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mcp-demo")
    }

    /// Path to the default config file
    pub fn path() -> PathBuf {
        Self::global_dir().join("config.toml")
    }
}

/// Log filter: a valid `RUST_LOG` value wins outright; otherwise
/// `mcp_demo=<level>`.
pub fn log_filter(level: &str, rust_log: Option<&str>) -> Result<EnvFilter, Error> {
    if let Some(env) = rust_log.filter(|env| !env.trim().is_empty()) {
        match EnvFilter::try_new(env) {
            Ok(filter) => return Ok(filter),
            Err(e) => eprintln!("Ignoring invalid {}: {}", EnvFilter::DEFAULT_ENV, e),
        }
    }

    EnvFilter::try_new(format!("mcp_demo={}", level))
        .map_err(|e| Error::Other(format!("Invalid log level '{}': {}", level, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.weather.timeout_secs, 10);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather]\ntimeout_secs = 3\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.weather.timeout_secs, 3);
        assert_eq!(config.weather.forecast_url, default_forecast_url());
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather\n").unwrap();

        assert!(matches!(Config::load(Some(&path)), Err(Error::Config(_))));
    }

    #[test]
    fn test_log_filter_prefers_rust_log() {
        let filter = log_filter("info", Some("mcp_demo=debug")).unwrap();
        assert_eq!(filter.to_string(), "mcp_demo=debug");

        let filter = log_filter("info", Some("trace")).unwrap();
        assert_eq!(filter.to_string(), "trace");
    }

    #[test]
    fn test_log_filter_falls_back_to_level() {
        for env in [None, Some(""), Some("mcp_demo=loud")] {
            let filter = log_filter("warn", env).unwrap();
            assert_eq!(filter.to_string(), "mcp_demo=warn");
        }
    }

    #[test]
    fn test_log_filter_rejects_bad_level() {
        assert!(matches!(log_filter("loud", None), Err(Error::Other(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
