//! Login flow state machine.
//!
//! ```text
//! Idle ──submit──▶ Validating ──invalid──▶ Error
//!                      │
//!                    valid
//!                      ▼
//!                  Fetching ──fetch ok──▶ Success ──save fails──▶ Error
//!                      │
//!                 fetch failed
//!                      ▼
//!                    Error
//! ```
//!
//! `Success` and `Error` are terminal for one submission. Editing the input
//! (or submitting again) starts over from `Idle`. While `Validating` or
//! `Fetching` the flow is loading and ignores submits and edits.
//!
//! The state machine performs no I/O. Callers run the fetch when `submit`
//! asks for it and feed the result back through `resolve`; [`login`] does
//! this end-to-end for non-interactive use.

use std::fmt;

use crate::phone::{ValidationError, validate_phone};
use crate::profile::{FetchError, ProfileFetcher, UserProfile};
use crate::session::SessionContext;

/// Why a login submission failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    Validation(ValidationError),
    Fetch(FetchError),
    /// The profile was fetched but could not be stored.
    Persist(String),
    /// The flow was read before reaching a terminal state.
    Incomplete,
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::Validation(e) => write!(f, "{e}"),
            LoginError::Fetch(FetchError::Network(_)) => write!(
                f,
                "Network error. Please check your connection and try again."
            ),
            LoginError::Fetch(FetchError::EmptyResult) => {
                write!(f, "Failed to fetch user data. Please try again.")
            }
            LoginError::Persist(_) => write!(f, "Failed to save user data. Please try again."),
            LoginError::Incomplete => write!(f, "Login did not complete. Please try again."),
        }
    }
}

impl std::error::Error for LoginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoginError::Validation(e) => Some(e),
            LoginError::Fetch(e) => Some(e),
            LoginError::Persist(_) | LoginError::Incomplete => None,
        }
    }
}

/// State of one login submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginState {
    #[default]
    Idle,
    Validating {
        phone: String,
    },
    Fetching {
        phone: String,
    },
    Success(UserProfile),
    Error(LoginError),
}

/// Explicit login state machine.
#[derive(Debug, Clone, Default)]
pub struct LoginFlow {
    state: LoginState,
}

impl LoginFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    /// True while validating or waiting on the fetch.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            LoginState::Validating { .. } | LoginState::Fetching { .. }
        )
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.state, LoginState::Fetching { .. })
    }

    pub fn error(&self) -> Option<&LoginError> {
        match &self.state {
            LoginState::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Starts a submission with the current input: `Idle → Validating`.
    ///
    /// Returns false (and changes nothing) while loading.
    pub fn begin_submit(&mut self, input: &str) -> bool {
        if self.is_loading() {
            return false;
        }
        self.state = LoginState::Validating {
            phone: input.to_string(),
        };
        true
    }

    /// Leaves `Validating`: to `Error` for bad input, otherwise `Fetching`.
    ///
    /// Returns true when the caller must issue exactly one profile fetch.
    pub fn validate(&mut self) -> bool {
        let LoginState::Validating { phone } = &mut self.state else {
            return false;
        };
        match validate_phone(phone) {
            Ok(()) => {
                let phone = std::mem::take(phone);
                self.state = LoginState::Fetching { phone };
                true
            }
            Err(e) => {
                tracing::debug!(reason = ?e, "phone number rejected");
                self.state = LoginState::Error(LoginError::Validation(e));
                false
            }
        }
    }

    /// `begin_submit` followed by `validate`.
    ///
    /// Returns true when the caller must issue exactly one profile fetch.
    pub fn submit(&mut self, input: &str) -> bool {
        self.begin_submit(input) && self.validate()
    }

    /// Applies the fetch outcome. Ignored unless `Fetching`.
    ///
    /// Returns the profile the caller must persist before navigating.
    pub fn resolve(&mut self, result: Result<UserProfile, FetchError>) -> Option<UserProfile> {
        if !self.is_fetching() {
            return None;
        }
        match result {
            Ok(profile) => {
                self.state = LoginState::Success(profile.clone());
                Some(profile)
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile fetch failed");
                self.state = LoginState::Error(LoginError::Fetch(e));
                None
            }
        }
    }

    /// Records that persisting the fetched profile failed: `Success → Error`.
    pub fn persist_failed(&mut self, detail: impl Into<String>) {
        if matches!(self.state, LoginState::Success(_)) {
            let detail = detail.into();
            tracing::error!(error = %detail, "failed to persist session");
            self.state = LoginState::Error(LoginError::Persist(detail));
        }
    }

    /// The user edited the input: terminal states go back to `Idle`.
    ///
    /// Returns false while loading (edits are not accepted).
    pub fn edit(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.state = LoginState::Idle;
        true
    }

    /// Consumes the flow, yielding the profile or the error.
    pub fn finish(self) -> Result<UserProfile, LoginError> {
        match self.state {
            LoginState::Success(profile) => Ok(profile),
            LoginState::Error(e) => Err(e),
            LoginState::Idle | LoginState::Validating { .. } | LoginState::Fetching { .. } => {
                Err(LoginError::Incomplete)
            }
        }
    }
}

/// Runs one full login: validate, fetch, persist.
///
/// Invalid input never reaches the fetcher; a failed fetch leaves the
/// session untouched.
///
/// # Errors
/// Returns the `LoginError` the flow ended in.
pub async fn login<F: ProfileFetcher>(
    session: &SessionContext,
    fetcher: &F,
    input: &str,
) -> Result<UserProfile, LoginError> {
    let mut flow = LoginFlow::new();
    if flow.submit(input) {
        tracing::info!("fetching profile");
        let result = fetcher.fetch_profile().await;
        if let Some(profile) = flow.resolve(result)
            && let Err(e) = session.store().save(&profile)
        {
            flow.persist_failed(format!("{e:#}"));
        }
    }
    flow.finish()
}
