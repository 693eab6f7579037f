use validator::ValidationErrors;

/// Failures of the login/register exchange. Surfaced to whoever submitted
/// the credentials; the session is never touched on failure.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    AccountExists,

    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),
}
