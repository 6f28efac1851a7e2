//! Login screen: phone number form driving the login flow.

mod input;
mod render;
mod state;
mod update;

pub use input::PhoneInput;
pub use render::render_login;
pub use state::LoginScreen;
pub use update::{handle_key, handle_profile_fetched, handle_session_persisted};
