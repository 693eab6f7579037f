//! # Tutorlink Observability
//!
//! Logging setup shared by Tutorlink binaries.

pub mod basic_logging;

pub use basic_logging::{LoggingGuard, build_env_filter, init_basic_console_logging};
