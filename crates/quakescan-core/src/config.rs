use crate::error::{QuakescanError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered search configuration: defaults < config file < environment
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Radius for proximity queries, in kilometers
    pub search_radius_km: ConfigValue<f64>,

    /// Minimum separation between deduplicated events, in kilometers
    pub dedup_radius_km: ConfigValue<f64>,

    /// Magnitude floor applied by the upstream feed collaborator.
    /// Recorded here so the whole request window is configured in one
    /// place; the search core itself does not filter by magnitude.
    pub min_magnitude: ConfigValue<f64>,
}

impl SearchConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            search_radius_km: ConfigValue::new(800.0, ConfigSource::Default),
            dedup_radius_km: ConfigValue::new(500.0, ConfigSource::Default),
            min_magnitude: ConfigValue::new(2.5, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| QuakescanError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| QuakescanError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(radius) = file_config.search_radius_km {
            self.search_radius_km.update(radius, ConfigSource::File);
        }

        if let Some(radius) = file_config.dedup_radius_km {
            self.dedup_radius_km.update(radius, ConfigSource::File);
        }

        if let Some(magnitude) = file_config.min_magnitude {
            self.min_magnitude.update(magnitude, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(raw) = env::var("QUAKESCAN_SEARCH_RADIUS_KM") {
            match raw.parse::<f64>() {
                Ok(radius) => self.search_radius_km.update(radius, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid QUAKESCAN_SEARCH_RADIUS_KM value '{}': expected a number",
                    raw
                ),
            }
        }

        if let Ok(raw) = env::var("QUAKESCAN_DEDUP_RADIUS_KM") {
            match raw.parse::<f64>() {
                Ok(radius) => self.dedup_radius_km.update(radius, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid QUAKESCAN_DEDUP_RADIUS_KM value '{}': expected a number",
                    raw
                ),
            }
        }

        if let Ok(raw) = env::var("QUAKESCAN_MIN_MAGNITUDE") {
            match raw.parse::<f64>() {
                Ok(magnitude) => self.min_magnitude.update(magnitude, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid QUAKESCAN_MIN_MAGNITUDE value '{}': expected a number",
                    raw
                ),
            }
        }

        self
    }

    /// Check that the resolved values are usable for queries
    pub fn validate(&self) -> Result<()> {
        if !self.search_radius_km.value.is_finite() || self.search_radius_km.value <= 0.0 {
            return Err(QuakescanError::ConfigInvalid {
                key: "search_radius_km".to_string(),
                reason: format!("must be positive and finite, got {}", self.search_radius_km.value),
            });
        }

        if !self.dedup_radius_km.value.is_finite() || self.dedup_radius_km.value <= 0.0 {
            return Err(QuakescanError::ConfigInvalid {
                key: "dedup_radius_km".to_string(),
                reason: format!("must be positive and finite, got {}", self.dedup_radius_km.value),
            });
        }

        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Shape of the optional TOML config file
#[derive(Debug, Deserialize)]
struct FileConfig {
    search_radius_km: Option<f64>,
    dedup_radius_km: Option<f64>,
    min_magnitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::with_defaults();
        assert_eq!(config.search_radius_km.value, 800.0);
        assert_eq!(config.search_radius_km.source, ConfigSource::Default);
        assert_eq!(config.dedup_radius_km.value, 500.0);
        assert_eq!(config.min_magnitude.value, 2.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "search_radius_km = 1000.0\ndedup_radius_km = 250.0").unwrap();

        let config = SearchConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.search_radius_km.value, 1000.0);
        assert_eq!(config.search_radius_km.source, ConfigSource::File);
        assert_eq!(config.dedup_radius_km.value, 250.0);
        // Untouched key keeps its default
        assert_eq!(config.min_magnitude.value, 2.5);
        assert_eq!(config.min_magnitude.source, ConfigSource::Default);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "search_radius_km = \"not a number\"").unwrap();

        let result = SearchConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(QuakescanError::ConfigInvalid { .. })));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "search_radius_km = 1000.0").unwrap();

        env::set_var("QUAKESCAN_SEARCH_RADIUS_KM", "1200");
        let config = SearchConfig::with_defaults()
            .load_from_file(file.path())
            .unwrap()
            .load_from_env();
        env::remove_var("QUAKESCAN_SEARCH_RADIUS_KM");

        assert_eq!(config.search_radius_km.value, 1200.0);
        assert_eq!(config.search_radius_km.source, ConfigSource::Environment);
    }

    #[test]
    #[serial]
    fn test_invalid_env_value_keeps_previous() {
        env::set_var("QUAKESCAN_DEDUP_RADIUS_KM", "five hundred");
        let config = SearchConfig::with_defaults().load_from_env();
        env::remove_var("QUAKESCAN_DEDUP_RADIUS_KM");

        assert_eq!(config.dedup_radius_km.value, 500.0);
        assert_eq!(config.dedup_radius_km.source, ConfigSource::Default);
    }

    #[test]
    fn test_validate_rejects_non_positive_radius() {
        let mut config = SearchConfig::with_defaults();
        config.search_radius_km.value = 0.0;
        assert!(config.validate().is_err());

        let mut config = SearchConfig::with_defaults();
        config.dedup_radius_km.value = -1.0;
        assert!(config.validate().is_err());
    }
}
