use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding `data.data_dir`.
pub const ENV_DATA_DIR: &str = "THEMEDEX_DATA_DIR";
/// Environment variable overriding `server.port`.
pub const ENV_PORT: &str = "THEMEDEX_PORT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// CORS origins; empty allows any origin.
    pub allowed_origins: Vec<String>,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding `pokemon.json`, `synonyms.json` and `tag-overrides.json`.
    pub data_dir: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5080,
            allowed_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/themedex/config.toml`.
    ///
    /// A missing file yields defaults. A file that exists but cannot be read
    /// or parsed is an error; callers decide whether to fall back.
    pub fn load() -> Result<Self> {
        Self::load_optional(&Self::config_path())
    }

    fn load_optional(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}; using defaults", path.display());
            return Ok(Self::default().with_env_overrides());
        }
        Self::load_from(path)
    }

    /// Load configuration from an explicit path; a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config.with_env_overrides())
    }

    /// Apply `THEMEDEX_*` environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            self.data.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(port) = lookup(ENV_PORT) {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(e) => log::warn!("Ignoring {ENV_PORT}={port}: {e}"),
            }
        }
        self
    }

    /// Resolved data directory (override or `./data`).
    pub fn data_dir(&self) -> PathBuf {
        self.data
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Resolved log directory (override or platform data dir).
    pub fn log_dir(&self) -> PathBuf {
        self.logging
            .log_dir
            .clone()
            .unwrap_or_else(crate::core::logging::default_log_dir)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("themedex").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
