//! Configuration loading and root folder resolution
//!
//! The root folder is the directory containing the `images/` hierarchy and
//! the `progress/` store. Resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `PANO_ROOT_FOLDER` environment variable
//! 3. TOML config file `root_folder` key
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted during root folder resolution
pub const ROOT_FOLDER_ENV: &str = "PANO_ROOT_FOLDER";

/// Bootstrap configuration loaded from a TOML file
///
/// These settings cannot change during runtime; the process must restart to
/// pick up edits.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    /// Root folder containing `images/` and `progress/` (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load the TOML bootstrap configuration
///
/// A missing file is not an error: every field has a usable default. A file
/// that exists but cannot be read or parsed is a configuration error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        tracing::info!("Config file {:?} not found, using defaults", path);
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

    toml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
}

/// Resolve the root folder following the documented priority order
pub fn resolve_root_folder(cli_arg: Option<&str>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(root) = &config.root_folder {
        return root.clone();
    }

    // Priority 4: OS-dependent compiled default
    get_default_root_folder()
}

/// Get OS-dependent default root folder path
pub fn get_default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/pano (or /var/lib/pano for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("pano"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/pano"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/pano
        dirs::data_dir()
            .map(|d| d.join("pano"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/pano"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\pano
        dirs::data_local_dir()
            .map(|d| d.join("pano"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\pano"))
    } else {
        PathBuf::from("./pano_data")
    }
}

/// Initialize the global tracing subscriber from a logging config
///
/// `RUST_LOG` overrides the configured level when set. Safe to call more
/// than once: a second initialization attempt is ignored.
pub fn init_logging(config: &LoggingConfig) {
    let filter = |level: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
    };

    match &config.file {
        Some(path) => match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter(&config.level))
                    .with_writer(Arc::new(file))
                    .with_ansi(false)
                    .try_init();
            }
            Err(e) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter(&config.level))
                    .try_init();
                tracing::warn!("Failed to open log file {:?}: {}, logging to stderr", path, e);
            }
        },
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter(&config.level))
                .try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.file.is_none());
    }

    #[test]
    fn test_default_root_folder() {
        let folder = get_default_root_folder();
        assert!(!folder.as_os_str().is_empty());
    }
}
