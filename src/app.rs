//! Application wiring and the calling-layer flows.
//!
//! [`App`] owns the session store and an API client whose requests pass
//! through a [`RequestAuthorizer`] reading that store. It is where the
//! results of the auth operations are written into the session, and where a
//! 401 from a protected endpoint is turned into a logout.

use std::sync::Arc;

use tracing::{info, warn};
use tutorlink_config::{ApiConfig, StorageConfig};
use tutorlink_core::storage::{KeyValueStorage, LocalFileStorage};
use tutorlink_models::{
    AvailabilitySlot, AvailabilitySlotUpdate, LoginRequest, NewAvailabilitySlot, RegisterRequest,
    Role, StudentProfile, StudentProfilePayload, User,
};
use tutorlink_session::{BearerToken, PersistTicket, Route, Session, SessionStore};

use crate::api::{ApiClient, ApiError, RequestAuthorizer};
use crate::modules::auth::{AuthError, AuthService};
use crate::modules::availability::AvailabilityService;
use crate::modules::students::StudentService;

#[derive(Clone, Debug)]
pub struct App {
    store: SessionStore,
    client: ApiClient,
}

impl App {
    /// Rehydrate the session from the configured data directory and build
    /// the authorized client. Nothing should read the session before this
    /// returns.
    pub async fn bootstrap(api: &ApiConfig, storage: &StorageConfig) -> Result<Self, ApiError> {
        let backend: Arc<dyn KeyValueStorage> =
            Arc::new(LocalFileStorage::new(storage.data_dir.clone()));
        Self::with_storage(api, backend, &storage.session_key).await
    }

    pub async fn with_storage(
        api: &ApiConfig,
        storage: Arc<dyn KeyValueStorage>,
        session_key: &str,
    ) -> Result<Self, ApiError> {
        let store = SessionStore::rehydrate(storage, session_key).await;
        let client = ApiClient::new(api)?.with_authorizer(RequestAuthorizer::new(store.clone()));
        Ok(Self { store, client })
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> Session {
        self.store.snapshot()
    }

    pub fn route(&self) -> Route {
        Route::select(&self.store.snapshot())
    }

    /// Authenticate and store the resulting session.
    ///
    /// On failure the current session is left exactly as it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<Route, AuthError> {
        let (token, user) =
            AuthService::login(&self.client, LoginRequest::new(email, password)).await?;
        self.establish(token, user).await;
        Ok(self.route())
    }

    /// Create an account, authenticate with it and store the session.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Route, AuthError> {
        let (token, user) =
            AuthService::register(&self.client, RegisterRequest::new(email, password, role))
                .await?;
        self.establish(token, user).await;
        Ok(self.route())
    }

    pub async fn logout(&self) {
        settle(self.store.clear_auth()).await;
    }

    pub async fn student_profile(&self) -> Result<Option<StudentProfile>, ApiError> {
        let sent = self.store.token();
        let result = StudentService::get_profile(&self.client).await;
        self.expire_on_unauthorized(sent, result).await
    }

    pub async fn save_student_profile(
        &self,
        payload: &StudentProfilePayload,
    ) -> Result<StudentProfile, ApiError> {
        let sent = self.store.token();
        let result = StudentService::upsert_profile(&self.client, payload).await;
        self.expire_on_unauthorized(sent, result).await
    }

    pub async fn availability(&self) -> Result<Vec<AvailabilitySlot>, ApiError> {
        let sent = self.store.token();
        let result = AvailabilityService::list(&self.client).await;
        self.expire_on_unauthorized(sent, result).await
    }

    pub async fn add_availability(
        &self,
        slot: &NewAvailabilitySlot,
    ) -> Result<AvailabilitySlot, ApiError> {
        let sent = self.store.token();
        let result = AvailabilityService::create(&self.client, slot).await;
        self.expire_on_unauthorized(sent, result).await
    }

    pub async fn update_availability(
        &self,
        id: &str,
        update: &AvailabilitySlotUpdate,
    ) -> Result<AvailabilitySlot, ApiError> {
        let sent = self.store.token();
        let result = AvailabilityService::update(&self.client, id, update).await;
        self.expire_on_unauthorized(sent, result).await
    }

    pub async fn remove_availability(&self, id: &str) -> Result<(), ApiError> {
        let sent = self.store.token();
        let result = AvailabilityService::delete(&self.client, id).await;
        self.expire_on_unauthorized(sent, result).await
    }

    // A role never changes in place: an existing session is cleared first so
    // subscribers observe the pass through Unauthenticated.
    async fn establish(&self, token: BearerToken, user: User) {
        if self.store.snapshot().is_authenticated() {
            info!("Replacing existing session");
            settle(self.store.clear_auth()).await;
        }
        settle(self.store.set_auth(token, user)).await;
    }

    // Only the credential that was rejected is cleared. A session
    // established while the request was in flight stays.
    async fn expire_on_unauthorized<T>(
        &self,
        sent: Option<BearerToken>,
        result: Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        if let Err(e) = &result {
            if e.is_unauthorized() && sent.is_some() {
                if self.store.token() == sent {
                    warn!(error = %e, "Credential rejected by API; treating session as expired");
                    settle(self.store.clear_auth()).await;
                } else {
                    info!("Rejected credential was already replaced; keeping current session");
                }
            }
        }
        result
    }
}

// Write failures are already logged by the store's writer and do not affect
// the in-memory session.
async fn settle(ticket: PersistTicket) {
    let _ = ticket.wait().await;
}
