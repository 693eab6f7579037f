use std::time::Instant;

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Method, Request, RequestBuilder, Response, Url};
use tracing::{debug, error, warn};
use tutorlink_config::ApiConfig;

use super::authorizer::RequestAuthorizer;
use super::error::ApiError;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// HTTP client for the tutoring API.
///
/// Calls are made in two explicit steps: [`request`](Self::request) builds a
/// request against the configured base URL, and [`dispatch`](Self::dispatch)
/// finalizes it (credential, request id) and sends it. Without an authorizer
/// every request goes out unauthenticated, which is what the auth endpoints
/// and their tests need.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    authorizer: Option<RequestAuthorizer>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|_| ApiError::InvalidBaseUrl(config.base_url.clone()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(config.base_url.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            authorizer: None,
        })
    }

    pub fn with_authorizer(mut self, authorizer: RequestAuthorizer) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.endpoint(path))
    }

    /// Finalize a request: attach the session credential and a request id.
    pub fn prepare(&self, builder: RequestBuilder) -> Result<Request, reqwest::Error> {
        let mut request = builder.build()?;

        if let Some(authorizer) = &self.authorizer {
            authorizer.authorize(&mut request);
        }

        if let Ok(value) = HeaderValue::from_str(&uuid::Uuid::new_v4().to_string()) {
            request.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        Ok(request)
    }

    /// Prepare and send. Only transport failures are errors here; status
    /// codes are interpreted by the caller.
    pub async fn dispatch(&self, builder: RequestBuilder) -> Result<Response, reqwest::Error> {
        let request = self.prepare(builder)?;

        let method = request.method().clone();
        let path = request.url().path().to_string();
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        debug!(request_id = %request_id, method = %method, path = %path, "Outgoing request");

        let start = Instant::now();
        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    error = %e,
                    "Request failed"
                );
                return Err(e);
            }
        };
        let latency = start.elapsed();
        let status = response.status();

        match status.as_u16() {
            400..=499 => warn!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Client error"
            ),
            500..=599 => error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Server error"
            ),
            _ => debug!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Request completed"
            ),
        }

        Ok(response)
    }
}
