mod config;
pub mod database;
pub mod memory;

pub use config::{Config, ExportConfig, LoggingConfig, NotificationsConfig, TimerConfig};
pub use database::SqliteStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Storage keys shared by every backend.
pub mod keys {
    pub const SESSION_COUNT: &str = "sessionCount";
    pub const SESSION_LOG: &str = "sessionLog";
    pub const TASKS: &str = "tasks";
    pub const GOALS: &str = "goals";
    pub const THEME: &str = "theme";
}

/// String-keyed, string-valued durable storage.
///
/// Every model component persists through this trait. Implementations report
/// failures; callers decide how to degrade (see [`crate::Context`]).
pub trait PersistentStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Returns `~/.config/studyhub[-dev]/` based on STUDYHUB_ENV.
///
/// Set STUDYHUB_ENV=dev to use the development data directory, or
/// STUDYHUB_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("STUDYHUB_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STUDYHUB_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studyhub-dev")
            } else {
                base_dir.join("studyhub")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
