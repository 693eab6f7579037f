//! The in-memory session value.
//!
//! A session is either empty or carries both a token and a user. Holding the
//! pair in one `Option` makes a token without a user (or the reverse)
//! unrepresentable, so every consumer reading a snapshot sees a consistent
//! authentication state.

use tutorlink_models::{Role, User};

use crate::token::BearerToken;

/// Token and identity of an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: BearerToken,
    pub user: User,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    credentials: Option<Credentials>,
}

impl Session {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn authenticated(token: BearerToken, user: User) -> Self {
        Self {
            credentials: Some(Credentials { token, user }),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn token(&self) -> Option<&BearerToken> {
        self.credentials.as_ref().map(|c| &c.token)
    }

    pub fn user(&self) -> Option<&User> {
        self.credentials.as_ref().map(|c| &c.user)
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }
}
