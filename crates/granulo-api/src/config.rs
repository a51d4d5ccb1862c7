//! Service configuration.
//!
//! Resolution order for the file: an explicit path, then `GRANULO_CONFIG`,
//! then `<config dir>/granulo/config.toml`. A missing implicit file means
//! defaults. `GRANULO_HOST`, `GRANULO_PORT` and `GRANULO_LOG` override the
//! loaded values.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Project name used for the config directory.
pub const PROJECT_NAME: &str = "granulo";

/// Environment variable holding an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "GRANULO_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Log filter settings.
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Log filter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing-subscriber` env-filter directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,granulo=debug".to_string(),
        }
    }
}

impl ApiConfig {
    /// Default location of the config file on this platform.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolves the config file path without touching the filesystem.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// Loads the configuration and applies environment overrides.
    ///
    /// An explicit path that does not exist is an error; a missing implicit
    /// file falls back to defaults.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) if explicit.is_some() => {
                return Err(ApiError::config(format!(
                    "Config file not found at {}",
                    path.display()
                )));
            }
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| ApiError::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ApiError::config(e.to_string()))
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ApiError::config(e.to_string()))
    }

    /// Applies `GRANULO_HOST`, `GRANULO_PORT` and `GRANULO_LOG` from `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("GRANULO_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("GRANULO_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ApiError::config(format!("GRANULO_PORT is not a port: '{port}'")))?;
        }
        if let Some(filter) = lookup("GRANULO_LOG") {
            self.logging.filter = filter;
        }
        Ok(())
    }

    /// Resolves the listener address without blocking the runtime.
    pub async fn socket_addr(&self) -> Result<SocketAddr> {
        tokio::net::lookup_host((self.server.host.as_str(), self.server.port))
            .await?
            .next()
            .ok_or_else(|| {
                ApiError::config(format!("Host '{}' did not resolve", self.server.host))
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.logging.filter, "info,granulo=debug");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ApiConfig::from_toml_str("[server]\nport = 8080").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = ApiConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, ApiError::Config { .. }));
    }

    #[test]
    fn test_toml_roundtrip_contains_sections() {
        let toml = ApiConfig::default().to_toml_string().unwrap();
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[logging]"));
        assert_eq!(ApiConfig::from_toml_str(&toml).unwrap(), ApiConfig::default());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nhost = \"0.0.0.0\"\nport = 9000\n").unwrap();

        let config = ApiConfig::from_file(&path).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let err = ApiConfig::load(Some(path.to_str().unwrap())).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_resolve_explicit_path_wins() {
        let path = ApiConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ApiConfig::default();
        config
            .apply_env(|key| match key {
                "GRANULO_HOST" => Some("0.0.0.0".to_string()),
                "GRANULO_PORT" => Some(" 7070 ".to_string()),
                "GRANULO_LOG" => Some("warn".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 7070);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_env_bad_port() {
        let mut config = ApiConfig::default();
        let err = config
            .apply_env(|key| (key == "GRANULO_PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("GRANULO_PORT"));
        assert_eq!(config.server.port, 5000);
    }

    #[tokio::test]
    async fn test_socket_addr() {
        let addr = ApiConfig::default().socket_addr().await.unwrap();
        assert_eq!(addr.port(), 5000);
        assert!(addr.ip().is_loopback());
    }

    #[tokio::test]
    async fn test_socket_addr_resolves_localhost() {
        let mut config = ApiConfig::default();
        config.server.host = "localhost".to_string();
        config.server.port = 0;
        let addr = config.socket_addr().await.unwrap();
        assert!(addr.ip().is_loopback());
    }
}
