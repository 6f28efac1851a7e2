//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).

use phonegate_core::profile::UserProfile;
use phonegate_core::route::Route;

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Enter a route. The runtime reads the session and reports back with
    /// `UiEvent::RouteActivated`.
    Navigate(Route),

    /// Spawn the profile fetch for a login submission.
    FetchProfile { task: TaskId },

    /// Store the fetched profile under the session key.
    PersistSession { profile: UserProfile },

    /// Remove the session key (corrupt session recovery).
    ClearSession,

    /// Clear the session and go to the login route.
    Logout,
}
