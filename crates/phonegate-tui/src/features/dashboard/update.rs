use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use phonegate_core::route::Route;

use super::DashboardScreen;
use crate::effects::UiEffect;

/// Handles a key press on the dashboard. `l` logs out.
pub fn handle_key(key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return vec![];
    }
    match key.code {
        KeyCode::Char('l' | 'L') => vec![UiEffect::Logout],
        _ => vec![],
    }
}

/// Navigates away once the session is gone; otherwise keeps the dashboard
/// and shows why logout failed.
pub fn handle_logged_out(
    screen: &mut DashboardScreen,
    result: Result<Route, String>,
) -> Vec<UiEffect> {
    match result {
        Ok(route) => vec![UiEffect::Navigate(route)],
        Err(e) => {
            screen.logout_error = Some(e);
            vec![]
        }
    }
}
