use reqwest::{Response, StatusCode};
use tutorlink_models::MessageResponse;
use validator::ValidationErrors;

/// Errors from calls to protected API endpoints.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("not authenticated: {message}")]
    Unauthorized { message: String },

    #[error("forbidden: {message}")]
    Forbidden { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),
}

impl ApiError {
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized { message },
            StatusCode::FORBIDDEN => ApiError::Forbidden { message },
            StatusCode::NOT_FOUND => ApiError::NotFound { message },
            _ => ApiError::Rejected {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether the server refused the credential, which the calling layer
    /// treats as session expiry.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Pull the `message` out of an error body, falling back to the status text.
pub async fn error_message(response: Response) -> String {
    let status = response.status();
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string()
    };

    match response.text().await {
        Ok(body) => serde_json::from_str::<MessageResponse>(&body)
            .ok()
            .and_then(|m| m.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(fallback),
        Err(_) => fallback(),
    }
}

/// Turn a non-success response into an [`ApiError`]; pass successes through.
pub async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = error_message(response).await;
    Err(ApiError::from_status(status, message))
}

/// Decode a JSON body, reporting shape mismatches as [`ApiError::Decode`].
pub async fn read_json<T>(response: Response) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned,
{
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(ApiError::from_status(StatusCode::UNAUTHORIZED, "x".into()).is_unauthorized());
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, "x".into()),
            ApiError::NotFound { .. }
        ));
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "Invalid data".into());
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "request rejected (400): Invalid data");
    }
}
