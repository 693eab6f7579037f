//! Route selection.
//!
//! Decides which top-level screen stack the presentation layer mounts. The
//! decision is a pure function of a [`Session`] snapshot; [`RouteWatcher`]
//! re-evaluates it whenever the store publishes a change.

use std::fmt;

use tokio::sync::watch;
use tutorlink_models::Role;

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Login / register screens.
    Unauthenticated,
    /// Student tabs.
    StudentSession,
    /// Tutor tabs. Every non-student role lands here, admins included.
    TutorSession,
}

impl Route {
    pub fn select(session: &Session) -> Self {
        match session.role() {
            None => Route::Unauthenticated,
            Some(Role::Student) => Route::StudentSession,
            Some(Role::Tutor | Role::Admin) => Route::TutorSession,
        }
    }

    pub fn stack(&self) -> &'static str {
        match self {
            Route::Unauthenticated => "AuthStack",
            Route::StudentSession => "StudentTabs",
            Route::TutorSession => "TutorTabs",
        }
    }

    pub fn screens(&self) -> &'static [&'static str] {
        match self {
            Route::Unauthenticated => &["Login", "Register"],
            Route::StudentSession => &["StudentHome", "StudentProfile", "StudentAvailability"],
            Route::TutorSession => &["TutorHome"],
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stack())
    }
}

impl From<&Session> for Route {
    fn from(session: &Session) -> Self {
        Route::select(session)
    }
}

pub fn select_route(session: &Session) -> Route {
    Route::select(session)
}

/// Follows a store's change feed and yields the route after each change.
#[derive(Debug)]
pub struct RouteWatcher {
    rx: watch::Receiver<Session>,
}

impl RouteWatcher {
    pub fn new(rx: watch::Receiver<Session>) -> Self {
        Self { rx }
    }

    pub fn current(&self) -> Route {
        Route::select(&self.rx.borrow())
    }

    /// Wait for the next session change. `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Route> {
        self.rx.changed().await.ok()?;
        Some(Route::select(&self.rx.borrow_and_update()))
    }
}
