//! Application state composition.
//!
//! ```text
//! AppState
//! ├── route: Route             (last activated route)
//! ├── screen: Screen           (what is rendered)
//! │   ├── Landing
//! │   ├── Login(LoginScreen)   (phone input + login flow)
//! │   └── Dashboard(DashboardScreen)
//! ├── task_seq: TaskSeq        (async task id generator)
//! ├── fetch: TaskState         (in-flight profile fetch)
//! ├── spinner_frame
//! └── should_quit
//! ```

use phonegate_core::route::Route;

use crate::common::{TaskSeq, TaskState};
use crate::dashboard::DashboardScreen;
use crate::login::LoginScreen;

/// The screen currently shown.
#[derive(Debug)]
pub enum Screen {
    /// Transient placeholder while the landing redirect runs.
    Landing,
    Login(LoginScreen),
    Dashboard(DashboardScreen),
}

/// Combined application state for the TUI.
#[derive(Debug)]
pub struct AppState {
    pub route: Route,
    pub screen: Screen,
    pub task_seq: TaskSeq,
    pub fetch: TaskState,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            route: Route::Landing,
            screen: Screen::Landing,
            task_seq: TaskSeq::default(),
            fetch: TaskState::default(),
            spinner_frame: 0,
            should_quit: false,
        }
    }

    pub fn login_screen(&self) -> Option<&LoginScreen> {
        match &self.screen {
            Screen::Login(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn login_screen_mut(&mut self) -> Option<&mut LoginScreen> {
        match &mut self.screen {
            Screen::Login(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn dashboard_screen(&self) -> Option<&DashboardScreen> {
        match &self.screen {
            Screen::Dashboard(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn dashboard_screen_mut(&mut self) -> Option<&mut DashboardScreen> {
        match &mut self.screen {
            Screen::Dashboard(screen) => Some(screen),
            _ => None,
        }
    }
}
