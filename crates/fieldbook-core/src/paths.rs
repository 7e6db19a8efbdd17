//! Filesystem locations for Fieldbook state

use std::path::PathBuf;

use crate::constants::app;

/// Root config directory (`~/.fieldbook`)
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(app::CONFIG_DIR_NAME)
}

/// Persisted login session
pub fn session_file() -> PathBuf {
    config_dir().join(app::SESSION_FILE_NAME)
}

/// SQLite database holding user preferences
pub fn database_file() -> PathBuf {
    config_dir().join(app::DATABASE_FILE_NAME)
}

/// Optional TOML config file
pub fn config_file() -> PathBuf {
    config_dir().join(app::CONFIG_FILE_NAME)
}

pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}
