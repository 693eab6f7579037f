use std::env;
use std::path::PathBuf;

/// Fixed key the session record is stored under.
pub const DEFAULT_SESSION_KEY: &str = "auth-store";

/// Durable storage configuration.
///
/// # Environment Variables
///
/// - `TUTORLINK_DATA_DIR`: directory holding persisted records (default: `./.tutorlink`)
/// - `TUTORLINK_SESSION_KEY`: key of the session record (default: `auth-store`)
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub session_key: String,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("TUTORLINK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".tutorlink")),
            session_key: env::var("TUTORLINK_SESSION_KEY")
                .unwrap_or_else(|_| DEFAULT_SESSION_KEY.to_string()),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".tutorlink"),
            session_key: DEFAULT_SESSION_KEY.to_string(),
        }
    }
}
