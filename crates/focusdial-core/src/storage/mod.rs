mod accessor;
pub mod analytics;
pub mod backend;
mod choices;
mod config;

pub use accessor::{Storage, CHOICES_KEY, SESSION_INDEX_KEY, SESSION_TYPE_KEY, WORK_STATUS_KEY};
pub use analytics::{DailyAnalyticsRecord, DailySummary, SessionEntry, StoredAnalytics, WeekSummary};
pub use backend::{KvBackend, MemoryBackend, SqliteBackend};
pub use choices::{Choices, Theme};
pub use config::{Config, DefaultsConfig, LoggingConfig, StorageConfig, TimerConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the directory holding `config.toml` and the key-value database.
///
/// `FOCUSDIAL_DATA_DIR` wins when set. Otherwise `~/.config/focusdial[-dev]/`
/// based on `FOCUSDIAL_ENV` (set it to `dev` for a development directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("FOCUSDIAL_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("FOCUSDIAL_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusdial-dev")
            } else {
                base_dir.join("focusdial")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
