//! Configuration management.
//!
//! Settings are assembled from three layers with increasing precedence:
//! built-in defaults, an optional TOML config file, and environment
//! variables. The bare `PORT` variable is honoured for the HTTP port.

use crate::storage::StoreBackendType;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default HTTP port.
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default per-operation store timeout in seconds.
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

/// Default background view-increment timeout in seconds.
pub const DEFAULT_INCREMENT_TIMEOUT_SECS: u64 = 5;

/// Origins allowed by default for browser clients.
const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:8080",
    "http://localhost:10086",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
    "http://127.0.0.1:10086",
];

/// Main configuration for promptdex.
#[derive(Debug, Clone)]
pub struct PromptdexConfig {
    /// Path to the `SQLite` database; `None` means the platform default.
    pub database_path: Option<PathBuf>,
    /// Storage backend to use.
    pub backend: StoreBackendType,
    /// Host the HTTP server binds to.
    pub http_host: String,
    /// Port the HTTP server binds to.
    pub http_port: u16,
    /// Origins allowed by the CORS layer.
    pub cors_origins: Vec<String>,
    /// Per-operation store timeout in seconds.
    pub store_timeout_secs: u64,
    /// Background view-increment timeout in seconds.
    pub increment_timeout_secs: u64,
    /// Whether `serve` seeds the store with sample data when empty.
    pub seed_on_start: bool,
    /// Observability settings.
    pub observability: ObservabilitySettings,
}

/// Observability settings.
#[derive(Debug, Clone)]
pub struct ObservabilitySettings {
    /// Log output format: `pretty` or `json`.
    pub log_format: String,
    /// Whether the Prometheus exporter is enabled.
    pub metrics_enabled: bool,
    /// Port for the Prometheus scrape listener.
    pub metrics_port: u16,
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_port: 9090,
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Database path.
    pub database_path: Option<String>,
    /// Storage backend name.
    pub backend: Option<String>,
    /// HTTP section.
    pub http: Option<ConfigFileHttp>,
    /// CORS allowed origins.
    pub cors_origins: Option<Vec<String>>,
    /// Per-operation store timeout in seconds.
    pub store_timeout_secs: Option<u64>,
    /// View-increment timeout in seconds.
    pub increment_timeout_secs: Option<u64>,
    /// Seed-on-start flag.
    pub seed_on_start: Option<bool>,
    /// Observability section.
    pub observability: Option<ConfigFileObservability>,
}

/// HTTP section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileHttp {
    /// Bind host.
    pub host: Option<String>,
    /// Bind port.
    pub port: Option<u16>,
}

/// Observability section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileObservability {
    /// Log format name.
    pub log_format: Option<String>,
    /// Metrics exporter toggle.
    pub metrics_enabled: Option<bool>,
    /// Metrics listener port.
    pub metrics_port: Option<u16>,
}

impl Default for PromptdexConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            backend: StoreBackendType::default(),
            http_host: "0.0.0.0".to_string(),
            http_port: DEFAULT_HTTP_PORT,
            cors_origins: DEFAULT_CORS_ORIGINS
                .iter()
                .map(ToString::to_string)
                .collect(),
            store_timeout_secs: DEFAULT_STORE_TIMEOUT_SECS,
            increment_timeout_secs: DEFAULT_INCREMENT_TIMEOUT_SECS,
            seed_on_start: true,
            observability: ObservabilitySettings::default(),
        }
    }
}

impl PromptdexConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Looks for `promptdex/config.toml` under the platform config
    /// directory. Returns the default configuration if no file is found or
    /// the file cannot be parsed.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let config_path = base_dirs.config_dir().join("promptdex").join("config.toml");
        if config_path.exists() {
            if let Ok(config) = Self::load_from_file(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` into a full configuration, filling gaps with
    /// defaults.
    #[must_use]
    pub fn from_config_file(file: ConfigFile) -> Self {
        let defaults = Self::default();

        let http = file.http.unwrap_or_default();
        let observability = file.observability.unwrap_or_default();

        Self {
            database_path: file.database_path.map(PathBuf::from),
            backend: file
                .backend
                .as_deref()
                .and_then(StoreBackendType::from_name)
                .unwrap_or(defaults.backend),
            http_host: http.host.unwrap_or(defaults.http_host),
            http_port: http.port.unwrap_or(defaults.http_port),
            cors_origins: file.cors_origins.unwrap_or(defaults.cors_origins),
            store_timeout_secs: file.store_timeout_secs.unwrap_or(defaults.store_timeout_secs),
            increment_timeout_secs: file
                .increment_timeout_secs
                .unwrap_or(defaults.increment_timeout_secs),
            seed_on_start: file.seed_on_start.unwrap_or(defaults.seed_on_start),
            observability: ObservabilitySettings {
                log_format: observability
                    .log_format
                    .unwrap_or(defaults.observability.log_format),
                metrics_enabled: observability
                    .metrics_enabled
                    .unwrap_or(defaults.observability.metrics_enabled),
                metrics_port: observability
                    .metrics_port
                    .unwrap_or(defaults.observability.metrics_port),
            },
        }
    }

    /// Applies environment variable overrides on top of the current values.
    ///
    /// | Variable | Setting |
    /// |----------|---------|
    /// | `PROMPTDEX_DATABASE_PATH` | database path |
    /// | `PROMPTDEX_STORAGE_BACKEND` | backend (`sqlite`/`memory`) |
    /// | `PROMPTDEX_HTTP_HOST` | bind host |
    /// | `PORT` | bind port |
    /// | `PROMPTDEX_CORS_ORIGINS` | comma-separated origin list |
    /// | `PROMPTDEX_LOG_FORMAT` | `pretty` or `json` |
    /// | `PROMPTDEX_METRICS_ENABLED` | `true`/`false` |
    /// | `PROMPTDEX_METRICS_PORT` | metrics listener port |
    ///
    /// Unparseable values are ignored and the prior setting stands.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("PROMPTDEX_DATABASE_PATH") {
            if !path.is_empty() {
                self.database_path = Some(PathBuf::from(path));
            }
        }
        if let Ok(backend) = std::env::var("PROMPTDEX_STORAGE_BACKEND") {
            if let Some(parsed) = StoreBackendType::from_name(&backend) {
                self.backend = parsed;
            }
        }
        if let Ok(host) = std::env::var("PROMPTDEX_HTTP_HOST") {
            if !host.is_empty() {
                self.http_host = host;
            }
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(parsed) = port.parse() {
                self.http_port = parsed;
            }
        }
        if let Ok(origins) = std::env::var("PROMPTDEX_CORS_ORIGINS") {
            let parsed: Vec<String> = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect();
            if !parsed.is_empty() {
                self.cors_origins = parsed;
            }
        }
        if let Ok(format) = std::env::var("PROMPTDEX_LOG_FORMAT") {
            if !format.is_empty() {
                self.observability.log_format = format;
            }
        }
        if let Ok(enabled) = std::env::var("PROMPTDEX_METRICS_ENABLED") {
            match enabled.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.observability.metrics_enabled = true,
                "0" | "false" | "no" | "off" => self.observability.metrics_enabled = false,
                _ => {}
            }
        }
        if let Ok(port) = std::env::var("PROMPTDEX_METRICS_PORT") {
            if let Ok(parsed) = port.parse() {
                self.observability.metrics_port = parsed;
            }
        }
        self
    }

    /// Sets the database path.
    #[must_use]
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// Sets the storage backend.
    #[must_use]
    pub const fn with_backend(mut self, backend: StoreBackendType) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the HTTP port.
    #[must_use]
    pub const fn with_http_port(mut self, port: u16) -> Self {
        self.http_port = port;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PromptdexConfig::default();
        assert!(config.database_path.is_none());
        assert_eq!(config.backend, StoreBackendType::Sqlite);
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.store_timeout_secs, 10);
        assert_eq!(config.increment_timeout_secs, 5);
        assert!(config.seed_on_start);
        assert!(!config.observability.metrics_enabled);
        assert!(config
            .cors_origins
            .contains(&"http://localhost:10086".to_string()));
    }

    #[test]
    fn test_from_config_file_full() {
        let toml_str = r#"
            database_path = "/tmp/catalog.db"
            backend = "memory"
            cors_origins = ["http://example.com"]
            store_timeout_secs = 3
            increment_timeout_secs = 2
            seed_on_start = false

            [http]
            host = "127.0.0.1"
            port = 9999

            [observability]
            log_format = "json"
            metrics_enabled = true
            metrics_port = 9191
        "#;
        let file: ConfigFile = toml::from_str(toml_str).unwrap();
        let config = PromptdexConfig::from_config_file(file);

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/catalog.db")));
        assert_eq!(config.backend, StoreBackendType::Memory);
        assert_eq!(config.http_host, "127.0.0.1");
        assert_eq!(config.http_port, 9999);
        assert_eq!(config.cors_origins, vec!["http://example.com".to_string()]);
        assert_eq!(config.store_timeout_secs, 3);
        assert_eq!(config.increment_timeout_secs, 2);
        assert!(!config.seed_on_start);
        assert_eq!(config.observability.log_format, "json");
        assert!(config.observability.metrics_enabled);
        assert_eq!(config.observability.metrics_port, 9191);
    }

    #[test]
    fn test_from_config_file_partial_keeps_defaults() {
        let file: ConfigFile = toml::from_str("backend = \"memory\"").unwrap();
        let config = PromptdexConfig::from_config_file(file);

        assert_eq!(config.backend, StoreBackendType::Memory);
        assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
        assert!(config.seed_on_start);
    }

    #[test]
    fn test_from_config_file_unknown_backend_falls_back() {
        let file: ConfigFile = toml::from_str("backend = \"mongodb\"").unwrap();
        let config = PromptdexConfig::from_config_file(file);
        assert_eq!(config.backend, StoreBackendType::Sqlite);
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        let result = PromptdexConfig::load_from_file(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "seed_on_start = false\n[http]\nport = 7070\n").unwrap();

        let config = PromptdexConfig::load_from_file(&path).unwrap();
        assert_eq!(config.http_port, 7070);
        assert!(!config.seed_on_start);
    }

    #[test]
    fn test_builders() {
        let config = PromptdexConfig::new()
            .with_backend(StoreBackendType::Memory)
            .with_http_port(1234)
            .with_database_path("/tmp/x.db");
        assert_eq!(config.backend, StoreBackendType::Memory);
        assert_eq!(config.http_port, 1234);
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/x.db")));
    }
}
