//! # Tutorlink
//!
//! Client library for the Tutorlink tutoring marketplace. Students and tutors
//! sign in, keep a profile and (for students) manage weekly availability
//! against the remote API.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── tutorlink-core/          # storage abstraction, serde helpers
//! ├── tutorlink-config/        # env-driven configuration
//! ├── tutorlink-models/        # wire DTOs
//! ├── tutorlink-session/       # session store, bearer token, route selector
//! └── tutorlink-observability/ # tracing setup
//! src/
//! ├── api/          # HTTP client, request authorizer, API errors
//! ├── modules/      # auth, students, availability operations
//! ├── app.rs        # wiring and calling-layer flows
//! └── main.rs       # command-line front end
//! ```
//!
//! ## Session lifecycle
//!
//! ```text
//! login/register ──► SessionStore::set_auth ──► persisted under "auth-store"
//!                          │
//!          ┌───────────────┴────────────────┐
//!          ▼                                ▼
//!  RequestAuthorizer                   Route::select
//!  (Authorization: Bearer …)          (AuthStack / StudentTabs / TutorTabs)
//!
//! logout or 401 ──► SessionStore::clear_auth
//! ```
//!
//! The session store is the only place holding authentication state. Every
//! other component reads a snapshot at the moment it needs one.
//!
//! ## Environment Variables
//!
//! ```bash
//! TUTORLINK_API_URL=http://localhost:8000
//! TUTORLINK_DATA_DIR=.tutorlink
//! LOG_LEVEL=info
//! ```

pub mod api;
pub mod app;
pub mod modules;

pub use app::App;

// Re-export workspace crates for convenience
pub use tutorlink_config;
pub use tutorlink_core;
pub use tutorlink_models;
pub use tutorlink_session;
