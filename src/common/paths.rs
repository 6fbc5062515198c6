//! Configuration and log file locations
//!
//! Uses the directories crate for platform-appropriate locations:
//! - Linux: `~/.config/feature-catalog/`
//! - macOS: `~/Library/Application Support/feature-catalog/`
//! - Windows: `%APPDATA%\feature-catalog\`

use std::path::PathBuf;

/// Application name used for platform directories
const APP_NAME: &str = "feature-catalog";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the path to the log directory
pub fn log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_dir().join("logs"))
}

/// Default log file used when file logging is enabled in the config
pub fn default_log_path() -> Option<PathBuf> {
    log_dir().map(|dir| dir.join("catalog.log"))
}
