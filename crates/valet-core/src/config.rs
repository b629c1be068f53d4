//! Shared configuration for Valet.
//!
//! Provides functions to locate Valet's state directory and common files.
//!
//! # Storage Structure
//!
//! All application data is stored under `~/.valet/`:
//!
//! ```text
//! ~/.valet/
//! ├── logs/         # Charging-state log
//! └── config/       # Secrets (.env.local)
//! ```
//!
//! # Environment Variables
//!
//! - `VALET_STATE_DIR`: Override the base state directory
//! - `VALET_LOG_DIR`: Override the log directory
//! - `VALET_CONFIG_DIR`: Override the config directory

use std::path::PathBuf;
use std::sync::OnceLock;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "VALET_STATE_DIR";

/// Environment variable for custom log directory.
pub const LOG_DIR_ENV: &str = "VALET_LOG_DIR";

/// Environment variable for custom config directory.
pub const CONFIG_DIR_ENV: &str = "VALET_CONFIG_DIR";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".valet";

// Subdirectory names
const LOGS_SUBDIR: &str = "logs";
const CONFIG_SUBDIR: &str = "config";

static STATE_DIR_CACHE: OnceLock<PathBuf> = OnceLock::new();

/// Get the Valet state directory.
///
/// The state directory is determined by:
/// 1. `VALET_STATE_DIR` environment variable if set
/// 2. `~/.valet` if home directory is available
/// 3. `.valet` in current directory as fallback
pub fn state_dir() -> PathBuf {
    STATE_DIR_CACHE
        .get_or_init(|| {
            std::env::var(STATE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    dirs::home_dir()
                        .map(|h| h.join(DEFAULT_STATE_DIR))
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
                })
        })
        .clone()
}

/// Get the logs directory.
///
/// Defaults to `~/.valet/logs/` or `VALET_LOG_DIR` env var.
pub fn logs_dir() -> PathBuf {
    std::env::var(LOG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(LOGS_SUBDIR))
}

/// Get the user config directory.
///
/// Defaults to `~/.valet/config/` or `VALET_CONFIG_DIR` env var.
pub fn config_dir() -> PathBuf {
    std::env::var(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(CONFIG_SUBDIR))
}

/// Get the .env.local file path.
///
/// Environment file for secrets (bot token, API token, allow-list).
pub fn env_file() -> PathBuf {
    config_dir().join(".env.local")
}

/// Get the charging-state log file path.
///
/// One observed charging-state sample is appended per `/info` readout.
pub fn charging_log_file() -> PathBuf {
    logs_dir().join("charging_states.log")
}

/// Ensure the state directory and all subdirectories exist.
///
/// # Errors
/// Returns an error if any directory cannot be created.
pub fn ensure_all_dirs() -> std::io::Result<()> {
    std::fs::create_dir_all(logs_dir())?;
    std::fs::create_dir_all(config_dir())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests use environment variables which can't be isolated in
    // parallel test execution, so they verify file/dir names rather than
    // full paths.

    #[test]
    fn test_state_dir_name() {
        let dir = state_dir();
        assert!(dir.is_absolute() || dir.ends_with(".valet"));
    }

    #[test]
    fn test_logs_dir_name() {
        let dir = logs_dir();
        assert!(dir.ends_with("logs") || dir.to_string_lossy().contains("logs"));
    }

    #[test]
    fn test_config_dir_name() {
        let dir = config_dir();
        assert!(dir.ends_with("config") || dir.to_string_lossy().contains("config"));
    }

    #[test]
    fn test_env_file_name() {
        let file = env_file();
        assert!(file.ends_with(".env.local"));
    }

    #[test]
    fn test_charging_log_file_name() {
        let file = charging_log_file();
        assert!(file.ends_with("charging_states.log"));
    }
}
