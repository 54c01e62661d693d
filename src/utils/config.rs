// Configuration utilities
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AppError, AppResult};
use crate::data::{City, CityRegistry};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub logging: LoggingConfig,
    pub viewer: ViewerConfig,
}

/// Where the city trip files live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub data_dir: String,
    /// File name per city, replacing the default name
    pub files: HashMap<City, String>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

/// Row viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub page_size: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            data_dir: ".".to_string(),
            files: HashMap::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig { page_size: 5 }
    }
}

impl Config {
    /// Load configuration from a JSON or YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let config: Config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&contents)
                .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)
                .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?,
            _ => {
                return Err(AppError::Config(format!(
                    "Unsupported config file format: {}",
                    path.display()
                )))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> AppResult<()> {
        if self.viewer.page_size == 0 {
            return Err(AppError::Config("viewer.page_size must be positive".to_string()));
        }
        Ok(())
    }

    /// Build the city registry described by this configuration
    pub fn registry(&self) -> CityRegistry {
        CityRegistry::with_overrides(&self.data.data_dir, &self.data.files)
    }

    /// Get the log level filter
    pub fn log_level_filter(&self) -> log::LevelFilter {
        parse_level(&self.logging.level)
    }
}

/// Parse a log level name, falling back to `Warn`
pub fn parse_level(level: &str) -> log::LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => log::LevelFilter::Off,
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Warn,
    }
}
