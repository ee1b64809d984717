//! Server configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server settings.
    pub server: ServerConfig,
    /// Dataset settings.
    pub storage: StorageConfig,
    /// Fixed query parameters used by the listing endpoints.
    pub queries: QueryConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = default_config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Save configuration to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Write {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Validate the configuration and return every problem found.
    ///
    /// This checks:
    /// - Server bind address is valid (host:port format)
    /// - Dataset path is not empty
    /// - Query timeout is within bounds (100 ms - 60 s)
    /// - Query cutoff dates are `YYYY-MM-DD`
    /// - Histogram bin count is within bounds (1 - 100)
    ///
    /// # Example
    ///
    /// ```
    /// use climate_service::Config;
    ///
    /// let config = Config::default();
    /// config.validate().expect("Default config should be valid");
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.server.validate());
        errors.extend(self.storage.validate());
        errors.extend(self.queries.validate());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load and validate configuration from a file.
    pub fn load_validated<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

impl ServerConfig {
    /// Validate server configuration.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.bind.is_empty() {
            errors.push(ValidationError {
                field: "server.bind".to_string(),
                message: "bind address cannot be empty".to_string(),
            });
            return errors;
        }

        let Some((_, port)) = self.bind.rsplit_once(':') else {
            errors.push(ValidationError {
                field: "server.bind".to_string(),
                message: format!(
                    "invalid bind address '{}': expected format 'host:port'",
                    self.bind
                ),
            });
            return errors;
        };

        match port.parse::<u16>() {
            Ok(0) => errors.push(ValidationError {
                field: "server.bind".to_string(),
                message: "port cannot be 0".to_string(),
            }),
            Err(_) => errors.push(ValidationError {
                field: "server.bind".to_string(),
                message: format!("invalid port '{}': must be a number 1-65535", port),
            }),
            Ok(_) => {}
        }

        errors
    }
}

/// Minimum query timeout in milliseconds.
pub const MIN_QUERY_TIMEOUT_MS: u64 = 100;
/// Maximum query timeout in milliseconds (1 minute).
pub const MAX_QUERY_TIMEOUT_MS: u64 = 60_000;

/// Dataset configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Dataset file path.
    pub path: PathBuf,
    /// Deadline for a single query, in milliseconds.
    pub query_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(climate_store::DEFAULT_DATASET_PATH),
            query_timeout_ms: climate_store::DEFAULT_QUERY_TIMEOUT.as_millis() as u64,
        }
    }
}

impl StorageConfig {
    /// Query deadline as a [`Duration`].
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    /// Validate storage configuration.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.path.as_os_str().is_empty() {
            errors.push(ValidationError {
                field: "storage.path".to_string(),
                message: "dataset path cannot be empty".to_string(),
            });
        }

        if !(MIN_QUERY_TIMEOUT_MS..=MAX_QUERY_TIMEOUT_MS).contains(&self.query_timeout_ms) {
            errors.push(ValidationError {
                field: "storage.query_timeout_ms".to_string(),
                message: format!(
                    "query timeout {} ms is out of range ({}-{} ms)",
                    self.query_timeout_ms, MIN_QUERY_TIMEOUT_MS, MAX_QUERY_TIMEOUT_MS
                ),
            });
        }

        errors
    }
}

/// Maximum number of histogram bins.
pub const MAX_HISTOGRAM_BINS: usize = 100;

/// Parameters for the fixed listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Lower bound (inclusive) of the precipitation listing.
    pub precipitation_since: String,
    /// Lower bound (exclusive) of the temperature listings.
    pub tobs_after: String,
    /// Default number of histogram bins.
    pub histogram_bins: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            precipitation_since: "2017-01-01".to_string(),
            tobs_after: "2017-01-01".to_string(),
            histogram_bins: 12,
        }
    }
}

impl QueryConfig {
    /// Validate query configuration.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("queries.precipitation_since", &self.precipitation_since),
            ("queries.tobs_after", &self.tobs_after),
        ] {
            if let Err(e) = climate_types::parse_date(value) {
                errors.push(ValidationError {
                    field: field.to_string(),
                    message: e.to_string(),
                });
            }
        }

        if self.histogram_bins == 0 || self.histogram_bins > MAX_HISTOGRAM_BINS {
            errors.push(ValidationError {
                field: "queries.histogram_bins".to_string(),
                message: format!(
                    "histogram bins {} is out of range (1-{})",
                    self.histogram_bins, MAX_HISTOGRAM_BINS
                ),
            });
        }

        errors
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),
    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// A single validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field path (e.g., `server.bind` or `queries.tobs_after`).
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Default configuration file path.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("climate")
        .join("server.toml")
}
