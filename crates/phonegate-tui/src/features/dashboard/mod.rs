//! Dashboard screen: the protected profile view.

mod render;
mod update;

use phonegate_core::profile::UserProfile;
pub use render::render_dashboard;
pub use update::{handle_key, handle_logged_out};

/// Dashboard state. Only constructed after the auth gate allowed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardScreen {
    pub profile: UserProfile,
    /// Set when clearing the session failed; the user is still logged in.
    pub logout_error: Option<String>,
}

impl DashboardScreen {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            logout_error: None,
        }
    }
}
