//! The session store.
//!
//! [`SessionStore`] is the only owner of the authentication state. Every
//! mutation follows the same two steps:
//!
//! 1. replace the in-memory [`Session`] (synchronous, visible to every reader
//!    as soon as the call returns);
//! 2. hand the encoded session to the store's writer task, which saves it
//!    under the fixed storage key.
//!
//! The writer processes saves one at a time in mutation order, so the record
//! on disk always converges to the latest in-memory state. A failed save is
//! logged and reported through the returned [`PersistTicket`]; it never rolls
//! the in-memory state back.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};
use tutorlink_core::storage::{KeyValueStorage, MemoryStorage, StorageError};
use tutorlink_models::User;

use crate::record;
use crate::session::Session;
use crate::token::{BearerToken, TokenError};

/// Error reported when a session mutation could not be made durable.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("session writer has stopped")]
    WriterClosed,
}

/// What rehydration found in durable storage at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rehydration {
    /// No record, or a cleared one.
    Empty,
    /// A valid authenticated session was restored.
    Restored,
    /// The record failed validation; the store started empty and the record
    /// was overwritten with a cleared one before `rehydrate` returned.
    Corrupt,
    /// Storage could not be read; the store started empty.
    Unreadable,
}

/// Resolves once the durable write for one mutation has finished.
///
/// Dropping the ticket does not cancel the write.
#[derive(Debug)]
pub struct PersistTicket {
    rx: oneshot::Receiver<Result<(), PersistError>>,
}

impl PersistTicket {
    pub async fn wait(self) -> Result<(), PersistError> {
        self.rx.await.unwrap_or(Err(PersistError::WriterClosed))
    }
}

struct WriteJob {
    payload: String,
    done: oneshot::Sender<Result<(), PersistError>>,
}

struct Inner {
    state: watch::Sender<Session>,
    writer: mpsc::UnboundedSender<WriteJob>,
    rehydration: Rehydration,
}

/// Single authoritative holder of the client session.
///
/// Cheap to clone; clones share the same state and writer.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.inner.state.borrow().is_authenticated())
            .field("rehydration", &self.inner.rehydration)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Build the store from durable storage. Must complete before anything
    /// reads the session.
    ///
    /// Never fails: a missing, unreadable or corrupt record yields an empty
    /// session. Must be called inside a Tokio runtime, since it spawns the
    /// writer task.
    pub async fn rehydrate(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        let key = key.into();

        let (session, rehydration) = match storage.load(&key).await {
            Ok(None) => {
                debug!(storage.key = %key, "No persisted session");
                (Session::empty(), Rehydration::Empty)
            }
            Ok(Some(raw)) => match record::decode(&raw) {
                Ok(session) if session.is_authenticated() => {
                    info!(
                        user.id = session.user().map(|u| u.id.as_str()).unwrap_or_default(),
                        user.role = ?session.role(),
                        "Session restored"
                    );
                    (session, Rehydration::Restored)
                }
                Ok(session) => (session, Rehydration::Empty),
                Err(e) => {
                    warn!(storage.key = %key, error = %e, "Discarding persisted session");
                    (Session::empty(), Rehydration::Corrupt)
                }
            },
            Err(e) => {
                error!(storage.key = %key, error = %e, "Failed to read persisted session");
                (Session::empty(), Rehydration::Unreadable)
            }
        };

        let (writer, jobs) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(storage, key, jobs));

        let (state, _) = watch::channel(session);
        let store = Self {
            inner: Arc::new(Inner {
                state,
                writer,
                rehydration,
            }),
        };

        if rehydration == Rehydration::Corrupt {
            let _ = store.persist(&Session::empty()).wait().await;
        }

        store
    }

    /// A store backed by fresh in-memory storage.
    pub async fn in_memory() -> Self {
        Self::rehydrate(Arc::new(MemoryStorage::new()), "auth-store").await
    }

    pub fn rehydration(&self) -> Rehydration {
        self.inner.rehydration
    }

    /// Replace the session with `(token, user)` and persist it.
    pub fn set_auth(&self, token: BearerToken, user: User) -> PersistTicket {
        info!(user.id = %user.id, user.role = %user.role, "Session established");

        let session = Session::authenticated(token, user);
        self.inner.state.send_replace(session.clone());
        self.persist(&session)
    }

    /// [`set_auth`](Self::set_auth) for a raw token string, rejecting empty
    /// or header-unsafe tokens before anything changes.
    pub fn set_auth_raw(
        &self,
        token: impl Into<String>,
        user: User,
    ) -> Result<PersistTicket, TokenError> {
        let token = BearerToken::new(token)?;
        Ok(self.set_auth(token, user))
    }

    /// Empty the session and persist the cleared state. Idempotent.
    pub fn clear_auth(&self) -> PersistTicket {
        let previous = self.inner.state.send_replace(Session::empty());
        if let Some(user) = previous.user() {
            info!(user.id = %user.id, "Session cleared");
        } else {
            debug!("Session already clear");
        }
        self.persist(&Session::empty())
    }

    /// Current in-memory session. No I/O.
    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Current token, if any. No I/O.
    pub fn token(&self) -> Option<BearerToken> {
        self.inner.state.borrow().token().cloned()
    }

    /// Receiver notified on every session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    fn persist(&self, session: &Session) -> PersistTicket {
        let (done, rx) = oneshot::channel();

        match record::encode(session) {
            Ok(payload) => {
                if self.inner.writer.send(WriteJob { payload, done }).is_err() {
                    error!("Session writer stopped; change kept in memory only");
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to encode session; change kept in memory only");
                let _ = done.send(Err(e.into()));
            }
        }

        PersistTicket { rx }
    }
}

async fn run_writer(
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    mut jobs: mpsc::UnboundedReceiver<WriteJob>,
) {
    while let Some(job) = jobs.recv().await {
        let result = storage
            .save(&key, &job.payload)
            .await
            .map_err(PersistError::from);

        match &result {
            Ok(()) => debug!(storage.key = %key, "Session persisted"),
            Err(e) => error!(
                storage.key = %key,
                error = %e,
                "Failed to persist session; in-memory session kept"
            ),
        }

        let _ = job.done.send(result);
    }
    debug!(storage.key = %key, "Session writer finished");
}
