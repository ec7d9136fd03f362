//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::chart::ChartConfig;
use crate::dataset::DatasetSource;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the dataset comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// File path or http(s) URL of the JSON document
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "data/openpowerlifting.json".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
        }
    }
}

impl DataConfig {
    pub fn source(&self) -> DatasetSource {
        DatasetSource::parse(&self.source)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
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

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.chart.validate().map_err(|error| ConfigError::Invalid {
            path: path.to_path_buf(),
            error,
        })?;

        Ok(config)
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

    /// Candidate config files, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("liftchart").join("config.toml")),
            Some(PathBuf::from("./liftchart.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in Self::default_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
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

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(source) = var("LIFTCHART_DATA") {
            self.data.source = source;
        }
        if let Some(level) = var("LIFTCHART_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("LIFTCHART_LOG_FORMAT") {
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

    #[error("Invalid chart settings in {path:?}: {error}")]
    Invalid { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r##"# Liftchart Configuration
#
# Environment variables override these settings:
# - LIFTCHART_DATA
# - LIFTCHART_LOG_LEVEL
# - LIFTCHART_LOG_FORMAT

[data]
# Dataset location: a file path or an http(s) URL
source = "data/openpowerlifting.json"

[chart]
# Full x range: January 1st of start_year to December 31st of end_year
start_year = 1971
end_year = 2024

# Main chart size and margins (pixels)
width = 1000.0
height = 420.0
margin = { top = 20.0, right = 40.0, bottom = 110.0, left = 70.0 }

# Overview strip under the main chart
brush_height = 100.0
brush_margin = { top = 10.0, right = 40.0, bottom = 30.0, left = 70.0 }

# Series colors
male_color = "#1f77b4"
female_color = "#ff6fb3"
overview_color = "#4a90e2"

# Y axis: maximum is the largest visible value times y_headroom,
# or empty_y_max when nothing is visible
y_headroom = 1.06
empty_y_max = 100.0
y_ticks = 6

# Marker radius (pixels)
marker_radius = 4.0

# Federations offered by the federation selector
top_federations = 20

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_parses() {
        let file = write_config(&generate_default_config());
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.data.source, "data/openpowerlifting.json");
        assert_eq!(config.chart, ChartConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_partial_config() {
        let file = write_config(
            r#"
[chart]
start_year = 1990

[logging]
format = "json"
"#,
        );
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.chart.start_year, 1990);
        assert_eq!(config.chart.end_year, 2024);
        assert_eq!(config.data.source, "data/openpowerlifting.json");
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_invalid_chart_settings() {
        let file = write_config("[chart]\nstart_year = 2030\n");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_parse_error() {
        let file = write_config("[chart\nstart_year = ");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/liftchart.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("LIFTCHART_DATA", "https://example.org/records.json"),
            ("LIFTCHART_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(
            config.data.source(),
            DatasetSource::Url("https://example.org/records.json".to_string())
        );
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.is_json());
    }
}
