//! # Tutorlink Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`api`]: remote API location and HTTP client settings
//! - [`storage`]: where the session record is persisted
//! - [`logging`]: log level, format and optional log directory
//!
//! # Example
//!
//! ```ignore
//! use tutorlink_config::{ApiConfig, LoggingConfig, StorageConfig};
//!
//! let api_config = ApiConfig::from_env();
//! let storage_config = StorageConfig::from_env();
//! let logging_config = LoggingConfig::from_env();
//! ```

pub mod api;
pub mod logging;
pub mod storage;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use storage::StorageConfig;
