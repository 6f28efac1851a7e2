//! Login screen reducer.

use crossterm::event::{KeyCode, KeyEvent};
use phonegate_core::profile::{FetchError, UserProfile};
use phonegate_core::route::Route;

use super::LoginScreen;
use crate::common::{TaskSeq, TaskState};
use crate::effects::UiEffect;

/// Handles a key press on the login screen.
///
/// Enter submits the current input; a valid number allocates a fetch task.
/// Editing keys are ignored while the flow is loading.
pub fn handle_key(
    screen: &mut LoginScreen,
    key: KeyEvent,
    task_seq: &mut TaskSeq,
    fetch: &mut TaskState,
) -> Vec<UiEffect> {
    if screen.is_loading() {
        return vec![];
    }

    if key.code == KeyCode::Enter {
        if !screen.flow.submit(screen.input.text()) {
            return vec![];
        }
        let task = task_seq.next_id();
        fetch.start(task);
        return vec![UiEffect::FetchProfile { task }];
    }

    if screen.input.input(key) {
        screen.flow.edit();
    }
    vec![]
}

/// Applies the fetch result. A successful fetch asks the runtime to persist.
pub fn handle_profile_fetched(
    screen: &mut LoginScreen,
    result: Result<UserProfile, FetchError>,
) -> Vec<UiEffect> {
    match screen.flow.resolve(result) {
        Some(profile) => vec![UiEffect::PersistSession { profile }],
        None => vec![],
    }
}

/// Navigates to the dashboard once the session is stored.
pub fn handle_session_persisted(
    screen: &mut LoginScreen,
    result: Result<(), String>,
) -> Vec<UiEffect> {
    if !screen.is_success() {
        return vec![];
    }
    match result {
        Ok(()) => vec![UiEffect::Navigate(Route::Dashboard)],
        Err(detail) => {
            screen.flow.persist_failed(detail);
            vec![]
        }
    }
}
