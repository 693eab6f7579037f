//! Bearer credential injection.
//!
//! Every request built by [`ApiClient`](super::ApiClient) passes through
//! [`RequestAuthorizer::authorize`] right before dispatch. The authorizer
//! reads the store's in-memory snapshot once per request; it performs no I/O
//! and never fails the request. Without a session the request goes out
//! unchanged and any resulting 401 is left to the caller.

use reqwest::Request;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use tracing::{trace, warn};
use tutorlink_session::SessionStore;

#[derive(Clone, Debug)]
pub struct RequestAuthorizer {
    store: SessionStore,
}

impl RequestAuthorizer {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Attach `Authorization: Bearer <token>` when a session exists.
    ///
    /// Other headers are left as the caller set them. An `Authorization`
    /// header already on the request is replaced, since the store is the only
    /// holder of credentials. Returns whether a credential was attached.
    pub fn authorize(&self, request: &mut Request) -> bool {
        let Some(token) = self.store.token() else {
            trace!(url = %request.url(), "No session; sending request unauthenticated");
            return false;
        };

        match HeaderValue::from_str(&token.header_value()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
                true
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Session token is not a valid header value; sending unauthenticated"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::ACCEPT_LANGUAGE;
    use tutorlink_models::{Role, User};
    use tutorlink_session::BearerToken;

    fn request() -> Request {
        reqwest::Client::new()
            .get("http://api.test/students/me")
            .header(ACCEPT_LANGUAGE, "tr")
            .build()
            .unwrap()
    }

    fn student() -> User {
        User {
            id: "1".to_string(),
            email: "a@x.com".to_string(),
            role: Role::Student,
        }
    }

    #[tokio::test]
    async fn test_attaches_bearer_and_keeps_other_headers() {
        let store = SessionStore::in_memory().await;
        store.set_auth(BearerToken::new("abc").unwrap(), student());

        let mut req = request();
        assert!(RequestAuthorizer::new(store).authorize(&mut req));

        assert_eq!(req.headers()[AUTHORIZATION], "Bearer abc");
        assert_eq!(req.headers()[ACCEPT_LANGUAGE], "tr");
    }

    #[tokio::test]
    async fn test_leaves_request_untouched_without_session() {
        let store = SessionStore::in_memory().await;
        let mut req = request();
        let before = req.headers().clone();

        assert!(!RequestAuthorizer::new(store).authorize(&mut req));
        assert!(req.headers().get(AUTHORIZATION).is_none());
        assert_eq!(req.headers(), &before);
    }

    #[tokio::test]
    async fn test_reads_store_on_every_request() {
        let store = SessionStore::in_memory().await;
        let authorizer = RequestAuthorizer::new(store.clone());

        store.set_auth(BearerToken::new("first").unwrap(), student());
        let mut one = request();
        authorizer.authorize(&mut one);

        store.set_auth(BearerToken::new("second").unwrap(), student());
        let mut two = request();
        authorizer.authorize(&mut two);

        store.clear_auth();
        let mut three = request();
        authorizer.authorize(&mut three);

        assert_eq!(one.headers()[AUTHORIZATION], "Bearer first");
        assert_eq!(two.headers()[AUTHORIZATION], "Bearer second");
        assert!(three.headers().get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_replaces_caller_authorization() {
        let store = SessionStore::in_memory().await;
        store.set_auth(BearerToken::new("abc").unwrap(), student());

        let mut req = reqwest::Client::new()
            .get("http://api.test/availability/me")
            .header(AUTHORIZATION, "Bearer stale")
            .build()
            .unwrap();
        RequestAuthorizer::new(store).authorize(&mut req);

        let values: Vec<_> = req.headers().get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values, vec!["Bearer abc"]);
    }
}
