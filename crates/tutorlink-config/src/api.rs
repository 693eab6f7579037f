use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Remote API configuration.
///
/// # Environment Variables
///
/// - `TUTORLINK_API_URL`: base URL of the API (falls back to
///   `EXPO_PUBLIC_API_URL`, then `http://localhost:8000`)
/// - `TUTORLINK_HTTP_TIMEOUT_SECS`: per-request timeout (default: `15`)
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("TUTORLINK_API_URL")
                .or_else(|_| env::var("EXPO_PUBLIC_API_URL"))
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout_secs: env::var("TUTORLINK_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),
        }
    }

    /// Config pointing at an explicit base URL, other settings defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_keeps_default_timeout() {
        let config = ApiConfig::with_base_url("http://api.test");
        assert_eq!(config.base_url, "http://api.test");
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }
}
