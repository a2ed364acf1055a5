//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKROOM_LATENCY_MS=0                                             │
//! │     STOCKROOM_DATA_DIR=/tmp/stockroom                                  │
//! │     STOCKROOM_LOG=debug                                                │
//! │     STOCKROOM_SEED=false                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/stockroom/stockroom.toml (Linux)                         │
//! │     ~/Library/Application Support/com.stockroom.dashboard/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     300 ms latency, seeded mock data                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # stockroom.toml
//! latency_ms = 300
//! seed = true
//! log = "info,stockroom=debug"
//! data_dir = "/var/lib/stockroom"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stockroom_store::{StoreConfig, DEFAULT_LATENCY};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Upper bound for the simulated latency.
pub const MAX_LATENCY_MS: u64 = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Artificial delay before every store read or write.
    pub latency_ms: u64,

    /// Load the mock categories, suppliers, items, transactions and users.
    pub seed: bool,

    /// Log filter directive, used when `RUST_LOG` is unset.
    pub log: Option<String>,

    /// Where the session file and exports go. Platform data dir when unset.
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            latency_ms: DEFAULT_LATENCY.as_millis() as u64,
            seed: true,
            log: None,
            data_dir: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (stockroom.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.latency_ms > MAX_LATENCY_MS {
            return Err(ConfigError::Invalid(format!(
                "latency_ms must be at most {}, got {}",
                MAX_LATENCY_MS, self.latency_ms
            )));
        }

        if let Some(log) = &self.log {
            if log.trim().is_empty() {
                return Err(ConfigError::Invalid("log filter must not be empty".into()));
            }
        }

        if let Some(dir) = &self.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("data_dir must not be empty".into()));
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(latency) = std::env::var("STOCKROOM_LATENCY_MS") {
            match latency.trim().parse::<u64>() {
                Ok(ms) => {
                    debug!(latency_ms = ms, "Overriding latency from environment");
                    self.latency_ms = ms;
                }
                Err(_) => warn!(value = %latency, "Ignoring invalid STOCKROOM_LATENCY_MS"),
            }
        }

        if let Ok(dir) = std::env::var("STOCKROOM_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Ok(log) = std::env::var("STOCKROOM_LOG") {
            self.log = Some(log);
        }

        if let Ok(seed) = std::env::var("STOCKROOM_SEED") {
            match seed.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => self.seed = true,
                "0" | "false" | "no" => self.seed = false,
                _ => warn!(value = %seed, "Ignoring invalid STOCKROOM_SEED"),
            }
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "stockroom", "dashboard")
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("stockroom.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Store settings derived from this config.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new().latency(self.latency()).seed(self.seed)
    }

    /// The configured data dir, else the platform data dir, else
    /// `.stockroom` under the working directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from(".stockroom"))
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir().join("session.json")
    }
}
