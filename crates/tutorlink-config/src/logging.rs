use std::env;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Logging configuration.
///
/// # Environment Variables
///
/// - `LOG_LEVEL`: level for the client's own targets (default: `info`)
/// - `LOG_FORMAT`: `compact` or `json` (default: `compact`)
/// - `LOG_DIR`: when set, logs are also written to a daily-rolling file there
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub log_dir: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: env::var("LOG_FORMAT")
                .map(|v| parse_format(&v))
                .unwrap_or(LogFormat::Compact),
            log_dir: env::var("LOG_DIR").ok().filter(|v| !v.is_empty()).map(PathBuf::from),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            log_dir: None,
        }
    }
}

fn parse_format(value: &str) -> LogFormat {
    if value.eq_ignore_ascii_case("json") {
        LogFormat::Json
    } else {
        LogFormat::Compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("json"), LogFormat::Json);
        assert_eq!(parse_format("JSON"), LogFormat::Json);
        assert_eq!(parse_format("pretty"), LogFormat::Compact);
    }
}
