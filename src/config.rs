//! Environment-driven configuration.

use std::env;
use std::path::PathBuf;

/// Configuration for the memory engine, read from `HAPPY_DAYS_*` variables
/// with local-development defaults.
#[derive(Debug, Clone)]
pub struct HappyDaysConfig {
    /// Flat directory holding every record's artifacts.
    pub storage_dir: PathBuf,
    /// Scratch directory for in-flight recordings and uploads.
    pub scratch_dir: PathBuf,
    /// Port for the HTTP surface.
    pub port: u16,
    /// Speech-to-text service endpoint.
    pub speech_url: String,
    /// Locale hint passed to the speech service.
    pub speech_locale: String,
    /// Use the remote search index instead of the in-process one.
    pub use_remote_index: bool,
    /// Remote search index endpoint.
    pub index_url: String,
}

impl HappyDaysConfig {
    pub fn from_env() -> Self {
        Self {
            storage_dir: env::var("HAPPY_DAYS_STORAGE_DIR")
                .unwrap_or_else(|_| "memories".to_string())
                .into(),
            scratch_dir: env::var("HAPPY_DAYS_SCRATCH_DIR")
                .unwrap_or_else(|_| "scratch".to_string())
                .into(),
            port: env::var("HAPPY_DAYS_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            speech_url: env::var("HAPPY_DAYS_SPEECH_URL")
                .unwrap_or_else(|_| "http://localhost:8002/v1/transcriptions".to_string()),
            speech_locale: env::var("HAPPY_DAYS_SPEECH_LOCALE")
                .unwrap_or_else(|_| "ru-RU".to_string()),
            use_remote_index: env::var("HAPPY_DAYS_USE_REMOTE_INDEX")
                .unwrap_or_else(|_| "0".to_string())
                == "1",
            index_url: env::var("HAPPY_DAYS_INDEX_URL")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
        }
    }
}
