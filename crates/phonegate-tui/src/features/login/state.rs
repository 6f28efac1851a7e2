use phonegate_core::login::{LoginFlow, LoginState};

use super::PhoneInput;

pub const TITLE: &str = "Welcome Back";
pub const SUBTITLE: &str = "Please sign in to your account";
pub const INPUT_LABEL: &str = "Iranian Phone Number";
pub const PLACEHOLDER: &str = "09123456789";
pub const FOOTER_NOTE: &str = "Enter any valid Iranian phone number to continue";

/// Login screen state.
#[derive(Debug, Clone, Default)]
pub struct LoginScreen {
    pub input: PhoneInput,
    pub flow: LoginFlow,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input and submit are disabled while loading.
    pub fn is_loading(&self) -> bool {
        self.flow.is_loading()
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_loading() {
            "Signing In..."
        } else {
            "Login"
        }
    }

    /// Inline error shown under the input.
    pub fn error_message(&self) -> Option<String> {
        self.flow.error().map(ToString::to_string)
    }

    /// True once the fetched profile is waiting to be persisted.
    pub fn is_success(&self) -> bool {
        matches!(self.flow.state(), LoginState::Success(_))
    }
}
