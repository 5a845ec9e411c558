//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     NELLITO_DB_PATH=/data/nellito.db                                   │
//! │     NELLITO_CATEGORIES=Popsicle,IceCream,Topping,Cone                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, NELLITO_CONFIG, or the platform config dir        │
//! │     ~/.config/nellito/config.toml (Linux)                              │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [ledger]
//! categories = ["Popsicle", "IceCream", "Topping", "Cone"]
//! low_stock_threshold = 5
//! category_mismatch = "keep_existing"  # keep_existing | reject
//!
//! [storage]
//! database_path = "/var/lib/nellito/nellito.db"
//! ledger_key = "estoque"
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use nellito_core::LedgerSettings;
use nellito_db::DEFAULT_LEDGER_KEY;

/// Database file name inside the platform data directory.
const DATABASE_FILE: &str = "nellito.db";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine a data directory; set NELLITO_DB_PATH")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Storage Config
// =============================================================================

/// Where the ledger is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file. `None` means the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Key the ledger blob is stored under.
    #[serde(default = "default_ledger_key")]
    pub ledger_key: String,
}

fn default_ledger_key() -> String {
    DEFAULT_LEDGER_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            database_path: None,
            ledger_key: default_ledger_key(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ledger: LedgerSettings,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, `NELLITO_CONFIG`, or platform default)
    /// 3. Environment variables
    ///
    /// An explicitly named file must exist; the platform default may not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.or_else(|| std::env::var_os("NELLITO_CONFIG").map(PathBuf::from));

        let mut config = match (&explicit, Self::default_config_path()) {
            (Some(path), _) => {
                info!(?path, "Loading config from file");
                Self::from_file(path)?
            }
            (None, Some(path)) if path.exists() => {
                info!(?path, "Loading config from file");
                Self::from_file(&path)?
            }
            (None, path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `NELLITO_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("NELLITO_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("NELLITO_LEDGER_KEY") {
            self.storage.ledger_key = key;
        }

        if let Some(list) = lookup("NELLITO_CATEGORIES") {
            self.ledger.categories = list
                .split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
        }

        if let Some(raw) = lookup("NELLITO_LOW_STOCK_THRESHOLD") {
            self.ledger.low_stock_threshold =
                raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    name: "NELLITO_LOW_STOCK_THRESHOLD".to_string(),
                    value: raw.clone(),
                })?;
        }

        if let Some(raw) = lookup("NELLITO_CATEGORY_MISMATCH") {
            match raw.parse() {
                Ok(policy) => self.ledger.category_mismatch = policy,
                Err(reason) => {
                    warn!(value = %raw, %reason, "Ignoring category mismatch policy from environment");
                }
            }
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let categories = &self.ledger.categories;

        if categories.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one category is required".into(),
            ));
        }

        if categories.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::Invalid("category names must not be blank".into()));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = categories.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(ConfigError::Invalid(format!("duplicate category: {}", dup)));
        }

        if self.storage.ledger_key.trim().is_empty() {
            return Err(ConfigError::Invalid("ledger_key must not be empty".into()));
        }

        Ok(())
    }

    /// Resolves the database file, creating the data directory if needed.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(ConfigError::NoDataDir)?;
        let data_dir = dirs.data_dir();

        std::fs::create_dir_all(data_dir).map_err(|source| ConfigError::Io {
            path: data_dir.to_path_buf(),
            source,
        })?;

        Ok(data_dir.join(DATABASE_FILE))
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "nellito", "nellito")
}
