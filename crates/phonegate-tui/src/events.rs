//! UI events consumed by the reducer.

use crossterm::event::Event;
use phonegate_core::profile::{FetchError, UserProfile};
use phonegate_core::route::Route;
use phonegate_core::session::SessionLoad;

use crate::common::TaskCompleted;

#[derive(Debug)]
pub enum UiEvent {
    /// Animation tick.
    Tick,

    /// Raw terminal input.
    Terminal(Event),

    /// A route was entered; carries the session as read at activation.
    RouteActivated { route: Route, session: SessionLoad },

    /// The profile fetch for a login submission finished.
    ProfileFetched(TaskCompleted<Result<UserProfile, FetchError>>),

    /// The runtime finished writing the fetched profile to the session store.
    SessionPersisted(Result<(), String>),

    /// Logout finished; carries the next route or the clear failure.
    LoggedOut(Result<Route, String>),
}
