//! Route decisions.
//!
//! Both functions here are pure: they look at an already-loaded session and
//! say where to go. Performing the navigation (and clearing a corrupt
//! session) is the caller's job.

use std::fmt;

use crate::profile::UserProfile;
use crate::session::SessionLoad;

/// Logical navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Entry point; forwards to `Login` or `Dashboard`.
    Landing,
    /// Phone number login form.
    Login,
    /// Protected profile view.
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/auth",
            Route::Dashboard => "/dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of the auth gate for a protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the protected route with this profile.
    Allow(UserProfile),
    /// No session: go elsewhere, render nothing.
    Redirect(Route),
    /// Corrupt session: clear it, then go elsewhere.
    ClearAndRedirect(Route),
}

/// Landing redirect: dashboard iff a session is present.
pub fn decide_route(session: &SessionLoad) -> Route {
    if session.is_present() {
        Route::Dashboard
    } else {
        Route::Login
    }
}

/// Auth gate for a protected route.
pub fn guard(session: SessionLoad) -> GateDecision {
    match session {
        SessionLoad::Present(profile) => GateDecision::Allow(profile),
        SessionLoad::Absent => GateDecision::Redirect(Route::Login),
        SessionLoad::Corrupt => GateDecision::ClearAndRedirect(Route::Login),
    }
}
