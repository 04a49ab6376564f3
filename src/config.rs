//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `GISMONDI_*` environment overrides.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{Endpoints, DEFAULT_API_BASE};
use crate::auth::DEFAULT_REDIRECT_DELAY;
use crate::classify::MAX_IMAGE_BYTES;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub endpoints: Endpoints,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub mock: MockConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Clinic API connection
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Where the CLI keeps its session
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

fn default_session_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("gismondi").join("session.json"))
        .unwrap_or_else(|| PathBuf::from("./.gismondi-session.json"))
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

/// Front-end behaviour shared by the UI and CLI
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_ms: u64,

    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: u64,
}

fn default_redirect_delay() -> u64 {
    DEFAULT_REDIRECT_DELAY.as_millis() as u64
}

fn default_max_upload() -> u64 {
    MAX_IMAGE_BYTES
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: default_redirect_delay(),
            max_upload_bytes: default_max_upload(),
        }
    }
}

impl UiConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

/// Development API server
#[derive(Debug, Clone, Deserialize)]
pub struct MockConfig {
    #[serde(default = "default_mock_host")]
    pub host: String,

    #[serde(default = "default_mock_port")]
    pub port: u16,
}

fn default_mock_host() -> String {
    "127.0.0.1".to_string()
}

fn default_mock_port() -> u16 {
    8000
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            host: default_mock_host(),
            port: default_mock_port(),
        }
    }
}

impl MockConfig {
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            field: "mock.host".to_string(),
            value: raw,
        })
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("gismondi").join("config.toml")),
            Some(PathBuf::from("/etc/gismondi/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `GISMONDI_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(url) = lookup("GISMONDI_API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = lookup("GISMONDI_REQUEST_TIMEOUT").and_then(|s| s.parse().ok()) {
            self.api.request_timeout_secs = secs;
        }

        // Session overrides
        if let Some(path) = lookup("GISMONDI_SESSION_FILE") {
            self.session.path = PathBuf::from(path);
        }

        // UI overrides
        if let Some(ms) = lookup("GISMONDI_REDIRECT_DELAY_MS").and_then(|s| s.parse().ok()) {
            self.ui.redirect_delay_ms = ms;
        }

        // Mock API overrides
        if let Some(host) = lookup("GISMONDI_MOCK_HOST") {
            self.mock.host = host;
        }
        if let Some(port) = lookup("GISMONDI_MOCK_PORT").and_then(|s| s.parse().ok()) {
            self.mock.port = port;
        }

        // Logging overrides
        if let Some(level) = lookup("GISMONDI_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("GISMONDI_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {field}: {value}")]
    Invalid { field: String, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Gismondi Configuration
#
# Environment variables override these settings:
# - GISMONDI_API_URL
# - GISMONDI_REQUEST_TIMEOUT
# - GISMONDI_SESSION_FILE
# - GISMONDI_REDIRECT_DELAY_MS
# - GISMONDI_MOCK_HOST
# - GISMONDI_MOCK_PORT
# - GISMONDI_LOG_LEVEL
# - GISMONDI_LOG_FORMAT

[api]
# Base URL of the clinic API
base_url = "http://127.0.0.1:8000"

# Request timeout in seconds
request_timeout_secs = 30

[endpoints]
# Paths relative to api.base_url
login = "/api/auth/login"
register = "/api/auth/register"
classify = "/api/classify-image"
report = "/api/generate-report"
history_by_dni = "/api/medical-histories/showByDni"
diagnoses_by_patient = "/api/diagnoses/patient/:patientId"

[session]
# File holding the CLI session (token, user, profile, role)
# path = "~/.local/share/gismondi/session.json"

[ui]
# Delay before redirecting after a successful login or registration (ms)
redirect_delay_ms = 2000

# Largest image accepted for classification (bytes)
max_upload_bytes = 10485760

[mock]
# Development API bind address
host = "127.0.0.1"
port = 8000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.endpoints, Endpoints::default());
        assert_eq!(config.ui.redirect_delay(), DEFAULT_REDIRECT_DELAY);
        assert_eq!(config.ui.max_upload_bytes, MAX_IMAGE_BYTES);
        assert_eq!(config.mock.addr().unwrap().port(), 8000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("[api]\nbase_url = \"https://clinica.example\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://clinica.example");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("GISMONDI_API_URL", "http://api.local"),
            ("GISMONDI_MOCK_PORT", "9001"),
            ("GISMONDI_REDIRECT_DELAY_MS", "not-a-number"),
            ("GISMONDI_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://api.local");
        assert_eq!(config.mock.port, 9001);
        assert_eq!(config.ui.redirect_delay_ms, 2000);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_reports_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\n").unwrap();

        match Config::load(&path) {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(matches!(
            Config::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_bad_mock_host() {
        let mock = MockConfig {
            host: "not a host".into(),
            port: 1,
        };
        assert!(mock.addr().is_err());
    }
}
