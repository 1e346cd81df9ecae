//! Runtime configuration for the rater.
//!
//! Stored as a JSON object on disk; every key is optional:
//! ```json
//! {
//!   "top_routes": 15,
//!   "default_delay_range": [-50.0, 200.0]
//! }
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::analyzers::aggregate::TOP_ROUTES;
use crate::filter::{DEFAULT_DELAY_RANGE, FilterSpec};

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "FLIGHT_RATER_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RaterConfig {
    /// Routes shown in the most-delayed ranking.
    pub top_routes: usize,
    /// Arrival-delay window applied when no range is given on the command line.
    pub default_delay_range: (f64, f64),
}

impl Default for RaterConfig {
    fn default() -> Self {
        RaterConfig {
            top_routes: TOP_ROUTES,
            default_delay_range: DEFAULT_DELAY_RANGE,
        }
    }
}

impl RaterConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{path}'"))?;
        Self::from_json(&content).with_context(|| format!("Invalid config file '{path}'"))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: RaterConfig = serde_json::from_str(content)?;
        let (min, max) = config.default_delay_range;
        if min > max {
            anyhow::bail!("default_delay_range minimum {min} exceeds maximum {max}");
        }
        Ok(config)
    }

    /// Loads from `path`, then from [`CONFIG_ENV`], then falls back to defaults.
    pub fn resolve(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => match std::env::var(CONFIG_ENV) {
                Ok(p) => Self::load(&p),
                Err(_) => Ok(Self::default()),
            },
        }
    }

    /// A filter with no airline or route constraint and the configured delay window.
    pub fn base_filter(&self) -> FilterSpec {
        let (min, max) = self.default_delay_range;
        FilterSpec::default().with_delay_range(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = RaterConfig::from_json("{}").unwrap();
        assert_eq!(config, RaterConfig::default());
        assert_eq!(config.top_routes, 15);
        assert_eq!(config.default_delay_range, (-50.0, 200.0));
    }

    #[test]
    fn test_partial_override() {
        let config = RaterConfig::from_json(r#"{"top_routes": 5}"#).unwrap();
        assert_eq!(config.top_routes, 5);
        assert_eq!(config.default_delay_range, DEFAULT_DELAY_RANGE);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let result = RaterConfig::from_json(r#"{"default_delay_range": [10.0, -10.0]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = format!("{}/flight_delay_rater_config.json", env::temp_dir().display());
        fs::write(&path, r#"{"default_delay_range": [-10.0, 60.0]}"#).unwrap();

        let config = RaterConfig::load(&path).unwrap();
        assert_eq!(config.base_filter().delay_range, (-10.0, 60.0));
        assert_eq!(config.base_filter().airline, "all");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(RaterConfig::load("/nonexistent/flight_delay_rater.json").is_err());
    }
}
