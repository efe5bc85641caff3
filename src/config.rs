//! Dashboard Configuration Module
//! Resolves runtime settings from defaults, an optional JSON file and the command line.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::{CleaningOptions, PricePolicy};

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "AIRBNB_DASHBOARD_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("max_price must be positive, got {0}")]
    InvalidMaxPrice(f64),
    #[error("histogram_bins must be at least 1")]
    InvalidBins,
}

/// Runtime settings for the dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub max_price: f64,
    pub histogram_bins: usize,
    pub price_policy: PricePolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("listings.csv"),
            max_price: 500.0,
            histogram_bins: 40,
            price_policy: PricePolicy::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse a config from JSON text. Missing fields keep their defaults.
    pub fn from_json(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    /// Resolve the effective config from the process environment and the
    /// working directory. See [`DashboardConfig::resolve_from`].
    pub fn resolve(cli_data_path: Option<String>) -> Result<Self, ConfigError> {
        Self::resolve_from(
            std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
            Path::new(DEFAULT_CONFIG_FILE),
            cli_data_path,
        )
    }

    /// Resolve the effective config: the `explicit` file if given (it must
    /// exist), else `default_file` when present, else defaults. A CSV path
    /// given on the command line wins over `data_path`.
    pub fn resolve_from(
        explicit: Option<PathBuf>,
        default_file: &Path,
        cli_data_path: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load(&path)?,
            None if default_file.is_file() => Self::load(default_file)?,
            None => Self::default(),
        };

        if let Some(data_path) = cli_data_path {
            config.data_path = PathBuf::from(data_path);
        }

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_price > 0.0) {
            return Err(ConfigError::InvalidMaxPrice(self.max_price));
        }
        if self.histogram_bins == 0 {
            return Err(ConfigError::InvalidBins);
        }
        Ok(())
    }

    /// Options handed to the cleaner.
    pub fn cleaning_options(&self) -> CleaningOptions {
        CleaningOptions {
            max_price: self.max_price,
            price_policy: self.price_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = DashboardConfig::from_json("{}", Path::new("t.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.max_price, 500.0);
        assert_eq!(config.histogram_bins, 40);
        assert_eq!(config.price_policy, PricePolicy::Drop);
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config = DashboardConfig::from_json(
            r#"{ "data_path": "berlin.csv", "price_policy": "reject" }"#,
            Path::new("t.json"),
        )
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("berlin.csv"));
        assert_eq!(config.price_policy, PricePolicy::Reject);
        assert_eq!(config.max_price, 500.0);

        let options = config.cleaning_options();
        assert_eq!(options.price_policy, PricePolicy::Reject);
        assert_eq!(options.max_price, 500.0);
    }

    #[test]
    fn rejects_invalid_values() {
        let err = DashboardConfig::from_json(r#"{ "max_price": 0 }"#, Path::new("t.json"));
        assert!(matches!(err, Err(ConfigError::InvalidMaxPrice(_))));

        let err = DashboardConfig::from_json(r#"{ "histogram_bins": 0 }"#, Path::new("t.json"));
        assert!(matches!(err, Err(ConfigError::InvalidBins)));

        let err = DashboardConfig::from_json("not json", Path::new("t.json"));
        assert!(matches!(err, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DashboardConfig::load(Path::new("/nonexistent/dashboard.json"));
        assert!(matches!(err, Err(ConfigError::Io { .. })));
    }

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "airbnb_dashboard_{}_{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn explicit_file_wins_over_default_file() {
        let explicit = write_config("explicit", r#"{ "histogram_bins": 12 }"#);
        let default_file = write_config("default_present", r#"{ "histogram_bins": 99 }"#);

        let config =
            DashboardConfig::resolve_from(Some(explicit.clone()), &default_file, None).unwrap();
        std::fs::remove_file(&explicit).ok();
        std::fs::remove_file(&default_file).ok();

        assert_eq!(config.histogram_bins, 12);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = DashboardConfig::resolve_from(
            Some(PathBuf::from("/nonexistent/explicit.json")),
            Path::new("/nonexistent/dashboard.json"),
            None,
        );
        assert!(matches!(err, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn default_file_used_only_when_present() {
        let default_file = write_config("default_only", r#"{ "max_price": 250.0 }"#);
        let config = DashboardConfig::resolve_from(None, &default_file, None).unwrap();
        std::fs::remove_file(&default_file).ok();
        assert_eq!(config.max_price, 250.0);

        let config =
            DashboardConfig::resolve_from(None, Path::new("/nonexistent/dashboard.json"), None)
                .unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn command_line_path_overrides_data_path() {
        let default_file = write_config("cli_override", r#"{ "data_path": "berlin.csv" }"#);
        let config = DashboardConfig::resolve_from(
            None,
            &default_file,
            Some("paris.csv".to_string()),
        )
        .unwrap();
        std::fs::remove_file(&default_file).ok();

        assert_eq!(config.data_path, PathBuf::from("paris.csv"));
        assert_eq!(config.max_price, 500.0);
    }
}
