use reqwest::{Method, Response, StatusCode};
use tracing::{info, instrument, warn};
use tutorlink_models::{LoginRequest, LoginResponse, RegisterRequest, User};
use tutorlink_session::BearerToken;
use validator::Validate;

use crate::api::ApiClient;
use crate::api::error::error_message;

use super::error::AuthError;

/// Network side of authentication.
///
/// Returns the `(token, user)` pair and leaves storing it to the caller, so
/// the session store stays the single place where the session changes.
pub struct AuthService;

impl AuthService {
    #[instrument(skip(client, request), fields(email = %request.email))]
    pub async fn login(
        client: &ApiClient,
        request: LoginRequest,
    ) -> Result<(BearerToken, User), AuthError> {
        request.validate()?;

        let response = client
            .dispatch(client.request(Method::POST, "/auth/login").json(&request))
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: LoginResponse = read_body(response).await?;
        let (token, user) = credentials_from(body)?;

        info!(user.id = %user.id, user.role = %user.role, "Login succeeded");
        Ok((token, user))
    }

    /// Create the account, then authenticate with the same credentials.
    ///
    /// If the register response already carries a usable token and user they
    /// are returned directly; otherwise a follow-up login is issued.
    #[instrument(skip(client, request), fields(email = %request.email, role = %request.role))]
    pub async fn register(
        client: &ApiClient,
        request: RegisterRequest,
    ) -> Result<(BearerToken, User), AuthError> {
        request.validate()?;

        let response = client
            .dispatch(client.request(Method::POST, "/auth/register").json(&request))
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            if is_account_exists(status, &message) {
                warn!("Registration rejected: email already registered");
                return Err(AuthError::AccountExists);
            }
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        info!("Account created");

        if let Ok(body) = read_body::<LoginResponse>(response).await {
            if body.access_token.is_some() {
                return credentials_from(body);
            }
        }

        Self::login(client, request.to_login()).await
    }
}

fn is_account_exists(status: StatusCode, message: &str) -> bool {
    if status == StatusCode::CONFLICT {
        return true;
    }
    let message = message.to_ascii_lowercase();
    status == StatusCode::BAD_REQUEST
        && (message.contains("already registered") || message.contains("already exists"))
}

async fn read_body<T>(response: Response) -> Result<T, AuthError>
where
    T: serde::de::DeserializeOwned,
{
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| AuthError::MalformedResponse(e.to_string()))
}

fn credentials_from(body: LoginResponse) -> Result<(BearerToken, User), AuthError> {
    let token = body
        .access_token
        .ok_or_else(|| AuthError::MalformedResponse("response has no access token".to_string()))
        .and_then(|raw| {
            BearerToken::new(raw)
                .map_err(|e| AuthError::MalformedResponse(format!("unusable access token: {e}")))
        })?;

    let user = body
        .user
        .ok_or_else(|| AuthError::MalformedResponse("response has no user".to_string()))?;

    Ok((token, user))
}
