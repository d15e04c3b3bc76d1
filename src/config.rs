//! User configuration loaded from `config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::calculator::{CalculatorOptions, DEFAULT_ERROR_DISPLAY};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "ZCALC_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("could not determine a config directory")]
    NoConfigDir,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    /// Log file for the interactive UI. Defaults to the cache directory.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How long "Error" stays up after a division by zero.
    pub error_display_ms: u64,
    pub allow_input_during_error: bool,
    /// UI redraw and timer resolution.
    pub tick_ms: u64,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            error_display_ms: DEFAULT_ERROR_DISPLAY.as_millis() as u64,
            allow_input_during_error: false,
            tick_ms: 50,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load from an explicit path, `$ZCALC_CONFIG`, or the default location,
    /// in that order. A missing file yields the defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit_path {
            Some(path) => path.to_path_buf(),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => PathBuf::from(path),
                None => Self::default_path()?,
            },
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("zcalc").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn calculator_options(&self) -> CalculatorOptions {
        CalculatorOptions {
            error_display: Duration::from_millis(self.error_display_ms),
            allow_input_during_error: self.allow_input_during_error,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Where the interactive UI writes its log.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.logging
            .file
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("zcalc").join("zcalc.log")))
    }
}
