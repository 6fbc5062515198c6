//! Configuration file handling

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// How cases are executed
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Knobs for the built-in demonstrations
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Runner settings
#[derive(Debug, Deserialize, Default)]
pub struct RunnerConfig {
    /// Per-case timeout in milliseconds, absent means cases may run forever
    pub case_timeout_ms: Option<u64>,

    /// Wrap every case so its elapsed time is logged
    #[serde(default)]
    pub timed: bool,
}

impl RunnerConfig {
    pub fn case_timeout(&self) -> Option<Duration> {
        self.case_timeout_ms.map(Duration::from_millis)
    }
}

/// Settings for the built-in demonstrations
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Attempts given to the randomly failing demonstration
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Probability that the randomly failing demonstration fails an attempt
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            retry_attempts: default_retry_attempts(),
            failure_rate: default_failure_rate(),
        }
    }
}

fn default_retry_attempts() -> u32 {
    3
}
fn default_failure_rate() -> f64 {
    0.7
}

/// Logging settings
#[derive(Debug, Deserialize, Default)]
pub struct LoggingConfig {
    /// Also write logs to the data directory
    #[serde(default)]
    pub file: bool,
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
        let config: Self =
            toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.catalog.failure_rate) {
            return Err(Error::Config(format!(
                "catalog.failure_rate must be between 0 and 1, got {}",
                self.catalog.failure_rate
            )));
        }
        if self.catalog.retry_attempts == 0 {
            return Err(Error::Config(
                "catalog.retry_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.runner.case_timeout(), None);
        assert!(!config.runner.timed);
        assert_eq!(config.catalog.retry_attempts, 3);
        assert_eq!(config.catalog.failure_rate, 0.7);
        assert!(!config.logging.file);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[runner]\ncase_timeout_ms = 250\ntimed = true\n\n[catalog]\nretry_attempts = 5"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.runner.case_timeout(), Some(Duration::from_millis(250)));
        assert!(config.runner.timed);
        assert_eq!(config.catalog.retry_attempts, 5);
        assert_eq!(config.catalog.failure_rate, 0.7);
    }

    #[test]
    fn test_invalid_failure_rate_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[catalog]\nfailure_rate = 1.5").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[runner\ncase_timeout_ms = ").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::load_from(Path::new("/nonexistent/catalog/config.toml")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
