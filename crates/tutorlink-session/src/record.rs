//! Persisted session record.
//!
//! The session is stored as a single JSON document:
//!
//! ```json
//! {"state": {"token": "eyJ...", "user": {"id": "7", "email": "a@x.com", "role": "tutor"}}, "version": 0}
//! ```
//!
//! A cleared session is stored with both fields `null`. Decoding accepts only
//! the two consistent shapes; anything else is reported as corrupt so the
//! store can fall back to an empty session.

use serde::{Deserialize, Serialize};
use tutorlink_models::User;

use crate::session::Session;
use crate::token::BearerToken;

/// Format version written alongside the state.
pub const RECORD_VERSION: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("corrupt persisted session: {reason}")]
pub struct CorruptPersistedSession {
    pub reason: String,
}

impl CorruptPersistedSession {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Record<S> {
    state: S,
    #[serde(default)]
    version: u32,
}

#[derive(Serialize)]
struct StateOut<'a> {
    token: Option<&'a str>,
    user: Option<&'a User>,
}

// User is decoded in a second step so an unknown role is reported as such
// rather than as a generic parse failure.
#[derive(Deserialize)]
struct StateIn {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<serde_json::Value>,
}

pub fn encode(session: &Session) -> Result<String, serde_json::Error> {
    let record = Record {
        state: StateOut {
            token: session.token().map(BearerToken::as_str),
            user: session.user(),
        },
        version: RECORD_VERSION,
    };
    serde_json::to_string(&record)
}

pub fn decode(raw: &str) -> Result<Session, CorruptPersistedSession> {
    let record: Record<StateIn> = serde_json::from_str(raw)
        .map_err(|e| CorruptPersistedSession::new(format!("unreadable record: {e}")))?;

    if record.version != RECORD_VERSION {
        return Err(CorruptPersistedSession::new(format!(
            "unsupported record version {}",
            record.version
        )));
    }

    let user = record.state.user.filter(|value| !value.is_null());

    match (record.state.token, user) {
        (None, None) => Ok(Session::empty()),
        (Some(token), Some(user)) => {
            let token = BearerToken::new(token)
                .map_err(|e| CorruptPersistedSession::new(format!("invalid token: {e}")))?;
            let user: User = serde_json::from_value(user)
                .map_err(|e| CorruptPersistedSession::new(format!("invalid user: {e}")))?;
            Ok(Session::authenticated(token, user))
        }
        (Some(_), None) => Err(CorruptPersistedSession::new("token present without user")),
        (None, Some(_)) => Err(CorruptPersistedSession::new("user present without token")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutorlink_models::Role;

    fn tutor() -> User {
        User {
            id: "7".to_string(),
            email: "a@x.com".to_string(),
            role: Role::Tutor,
        }
    }

    #[test]
    fn test_encode_authenticated_shape() {
        let session = Session::authenticated(BearerToken::new("abc").unwrap(), tutor());
        let json: serde_json::Value = serde_json::from_str(&encode(&session).unwrap()).unwrap();
        assert_eq!(json["version"], 0);
        assert_eq!(json["state"]["token"], "abc");
        assert_eq!(json["state"]["user"]["role"], "tutor");
    }

    #[test]
    fn test_encode_empty_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&encode(&Session::empty()).unwrap()).unwrap();
        assert!(json["state"]["token"].is_null());
        assert!(json["state"]["user"].is_null());
    }

    #[test]
    fn test_decode_restores_encoded_session() {
        let session = Session::authenticated(BearerToken::new("abc").unwrap(), tutor());
        assert_eq!(decode(&encode(&session).unwrap()).unwrap(), session);
    }

    #[test]
    fn test_decode_cleared_record_is_empty() {
        let raw = r#"{"state":{"token":null,"user":null},"version":0}"#;
        assert_eq!(decode(raw).unwrap(), Session::empty());
    }

    #[test]
    fn test_decode_token_without_user_is_corrupt() {
        let raw = r#"{"state":{"token":"abc","user":null},"version":0}"#;
        let err = decode(raw).unwrap_err();
        assert!(err.reason.contains("without user"));
    }

    #[test]
    fn test_decode_user_without_token_is_corrupt() {
        let raw = r#"{"state":{"user":{"id":"1","email":"a@x.com","role":"student"}},"version":0}"#;
        assert!(decode(raw).is_err());
    }

    #[test]
    fn test_decode_unknown_role_is_corrupt() {
        let raw = r#"{"state":{"token":"abc","user":{"id":"1","email":"a@x.com","role":"owner"}},"version":0}"#;
        let err = decode(raw).unwrap_err();
        assert!(err.reason.contains("invalid user"));
    }

    #[test]
    fn test_decode_empty_token_is_corrupt() {
        let raw = r#"{"state":{"token":"","user":{"id":"1","email":"a@x.com","role":"student"}},"version":0}"#;
        assert!(decode(raw).is_err());
    }

    #[test]
    fn test_decode_garbage_and_wrong_version() {
        assert!(decode("not json").is_err());
        assert!(decode(r#"{"state":{"token":null,"user":null},"version":3}"#).is_err());
    }
}
