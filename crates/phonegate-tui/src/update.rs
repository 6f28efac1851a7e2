//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use phonegate_core::route::{GateDecision, Route, decide_route, guard};
use phonegate_core::session::SessionLoad;

use crate::dashboard::{self, DashboardScreen};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::login::{self, LoginScreen};
use crate::state::{AppState, Screen};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            if app.fetch.is_running() {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) => handle_key(app, key),
        UiEvent::Terminal(_) => vec![],
        UiEvent::RouteActivated { route, session } => activate_route(app, route, session),
        UiEvent::ProfileFetched(completed) => {
            if !app.fetch.finish_if_active(completed.id) {
                tracing::debug!(task = completed.id.0, "dropping stale profile fetch");
                return vec![];
            }
            match app.login_screen_mut() {
                Some(screen) => login::handle_profile_fetched(screen, completed.result),
                None => vec![],
            }
        }
        UiEvent::SessionPersisted(result) => match app.login_screen_mut() {
            Some(screen) => login::handle_session_persisted(screen, result),
            None => vec![],
        },
        UiEvent::LoggedOut(result) => match app.dashboard_screen_mut() {
            Some(screen) => dashboard::handle_logged_out(screen, result),
            None => vec![],
        },
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }

    let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    if key.code == KeyCode::Esc || ctrl_c {
        return vec![UiEffect::Quit];
    }

    match &mut app.screen {
        Screen::Landing => vec![],
        Screen::Login(screen) => login::handle_key(screen, key, &mut app.task_seq, &mut app.fetch),
        Screen::Dashboard(_) => dashboard::handle_key(key),
    }
}

/// Runs the route's activation logic against the session read by the runtime.
fn activate_route(app: &mut AppState, route: Route, session: SessionLoad) -> Vec<UiEffect> {
    tracing::debug!(%route, "route activated");
    app.route = route;
    // Leaving the login screen abandons any in-flight fetch.
    if route != Route::Login {
        app.fetch.clear();
    }

    match route {
        Route::Landing => {
            app.screen = Screen::Landing;
            let target = decide_route(&session);
            if session == SessionLoad::Corrupt {
                tracing::info!("clearing corrupt session");
                vec![UiEffect::ClearSession, UiEffect::Navigate(target)]
            } else {
                vec![UiEffect::Navigate(target)]
            }
        }
        Route::Login => {
            app.screen = Screen::Login(LoginScreen::new());
            vec![]
        }
        Route::Dashboard => match guard(session) {
            GateDecision::Allow(profile) => {
                app.screen = Screen::Dashboard(DashboardScreen::new(profile));
                vec![]
            }
            GateDecision::Redirect(target) => vec![UiEffect::Navigate(target)],
            GateDecision::ClearAndRedirect(target) => {
                tracing::info!("clearing corrupt session");
                vec![UiEffect::ClearSession, UiEffect::Navigate(target)]
            }
        },
    }
}
