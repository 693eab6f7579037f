//! # Tutorlink Session
//!
//! Client-side authentication state for the Tutorlink client.
//!
//! This crate provides:
//!
//! - [`token`]: the opaque [`BearerToken`] credential
//! - [`session`]: the [`Session`] value, where token and user exist together or not at all
//! - [`record`]: the persisted JSON record and its validation on rehydration
//! - [`store`]: the [`SessionStore`], single owner of the session, persisting every mutation
//! - [`route`]: the [`Route`] selector deciding which screen stack is active
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tutorlink_core::LocalFileStorage;
//! use tutorlink_session::{BearerToken, Route, SessionStore};
//!
//! let store = SessionStore::rehydrate(Arc::new(LocalFileStorage::new(".tutorlink")), "auth-store").await;
//! assert_eq!(Route::select(&store.snapshot()), Route::Unauthenticated);
//!
//! store.set_auth(BearerToken::new(token)?, user).wait().await?;
//! store.clear_auth();
//! ```

pub mod record;
pub mod route;
pub mod session;
pub mod store;
pub mod token;

// Re-export commonly used types at crate root
pub use record::CorruptPersistedSession;
pub use route::{Route, RouteWatcher, select_route};
pub use session::{Credentials, Session};
pub use store::{PersistError, PersistTicket, Rehydration, SessionStore};
pub use token::{BearerToken, TokenError};
