//! Effect handlers for the TUI runtime.
//!
//! Handlers perform the I/O behind an effect and return the resulting
//! `UiEvent`. They never touch `AppState`; the runtime feeds their events
//! back through the reducer.

use phonegate_core::profile::{ProfileFetcher, UserProfile};
use phonegate_core::route::Route;
use phonegate_core::session::SessionContext;

use crate::common::{TaskCompleted, TaskId};
use crate::events::UiEvent;

/// Reads the session for a route activation.
pub fn activate_route(session: &SessionContext, route: Route) -> UiEvent {
    UiEvent::RouteActivated {
        route,
        session: session.store().load(),
    }
}

/// Fetches a profile for the login task `task`.
pub async fn profile_fetch<F: ProfileFetcher>(fetcher: F, task: TaskId) -> UiEvent {
    tracing::info!(task = task.0, "fetching profile");
    let result = fetcher.fetch_profile().await;
    UiEvent::ProfileFetched(TaskCompleted { id: task, result })
}

/// Stores the fetched profile as the session.
pub fn persist_session(session: &SessionContext, profile: &UserProfile) -> UiEvent {
    UiEvent::SessionPersisted(
        session
            .store()
            .save(profile)
            .map_err(|e| format!("{e:#}")),
    )
}

/// Clears the session for a user-initiated logout.
pub fn logout(session: &SessionContext) -> UiEvent {
    UiEvent::LoggedOut(session.logout().map_err(|e| {
        tracing::error!(error = %format!("{e:#}"), "logout failed");
        format!("{e:#}")
    }))
}

/// Clears a corrupt session. Failures are logged; the redirect proceeds.
pub fn clear_session(session: &SessionContext) {
    if let Err(e) = session.store().clear() {
        tracing::error!(error = %format!("{e:#}"), "failed to clear session");
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::Arc;

    use phonegate_core::profile::{FetchError, ProfileName};
    use phonegate_core::session::{SessionLoad, Storage};

    use super::*;
    use crate::effects::UiEffect;
    use crate::state::{AppState, Screen};
    use crate::update::update;

    fn profile() -> UserProfile {
        UserProfile {
            name: ProfileName {
                first: "Leila".to_string(),
                last: "Hosseini".to_string(),
            },
            email: "leila@example.com".to_string(),
            avatar_url: "https://example.com/l.jpg".to_string(),
        }
    }

    #[derive(Clone)]
    struct StubFetcher(Result<UserProfile, FetchError>);

    impl ProfileFetcher for StubFetcher {
        fn fetch_profile(&self) -> impl Future<Output = Result<UserProfile, FetchError>> + Send {
            let result = self.0.clone();
            async move { result }
        }
    }

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }

        fn remove(&self, _key: &str) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }
    }

    /// Runs effects the way the runtime does, without a terminal.
    async fn drive(
        app: &mut AppState,
        session: &SessionContext,
        fetcher: &StubFetcher,
        effects: Vec<UiEffect>,
    ) {
        let mut queue = effects;
        while !queue.is_empty() {
            let mut next = Vec::new();
            for effect in queue {
                let event = match effect {
                    UiEffect::Quit => {
                        app.should_quit = true;
                        continue;
                    }
                    UiEffect::Navigate(route) => activate_route(session, route),
                    UiEffect::FetchProfile { task } => profile_fetch(fetcher.clone(), task).await,
                    UiEffect::PersistSession { profile } => persist_session(session, &profile),
                    UiEffect::ClearSession => {
                        clear_session(session);
                        continue;
                    }
                    UiEffect::Logout => logout(session),
                };
                next.extend(update(app, event));
            }
            queue = next;
        }
    }

    async fn submit(app: &mut AppState, session: &SessionContext, fetcher: &StubFetcher) {
        use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

        let mut effects = Vec::new();
        for code in "09123456789"
            .chars()
            .map(KeyCode::Char)
            .chain([KeyCode::Enter])
        {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            effects.extend(update(app, UiEvent::Terminal(Event::Key(key))));
        }
        drive(app, session, fetcher, effects).await;
    }

    #[tokio::test]
    async fn test_fresh_start_lands_on_login() {
        let session = SessionContext::in_memory();
        let fetcher = StubFetcher(Ok(profile()));
        let mut app = AppState::new();

        drive(&mut app, &session, &fetcher, vec![UiEffect::Navigate(Route::Landing)]).await;
        assert_eq!(app.route, Route::Login);
        assert!(app.login_screen().is_some());
    }

    #[tokio::test]
    async fn test_login_then_logout_round_trip() {
        let session = SessionContext::in_memory();
        let fetcher = StubFetcher(Ok(profile()));
        let mut app = AppState::new();
        drive(&mut app, &session, &fetcher, vec![UiEffect::Navigate(Route::Landing)]).await;

        submit(&mut app, &session, &fetcher).await;
        assert_eq!(app.route, Route::Dashboard);
        assert_eq!(app.dashboard_screen().unwrap().profile, profile());
        assert_eq!(session.store().load(), SessionLoad::Present(profile()));

        drive(&mut app, &session, &fetcher, vec![UiEffect::Logout]).await;
        assert_eq!(app.route, Route::Login);
        assert_eq!(session.store().load(), SessionLoad::Absent);
    }

    #[tokio::test]
    async fn test_existing_session_lands_on_dashboard() {
        let session = SessionContext::in_memory();
        session.store().save(&profile()).unwrap();
        let fetcher = StubFetcher(Err(FetchError::EmptyResult));
        let mut app = AppState::new();

        drive(&mut app, &session, &fetcher, vec![UiEffect::Navigate(Route::Landing)]).await;
        assert!(matches!(app.screen, Screen::Dashboard(_)));
    }

    #[tokio::test]
    async fn test_corrupt_session_is_cleared_on_dashboard_entry() {
        let storage = Arc::new(phonegate_core::session::MemoryStorage::new());
        storage
            .set(phonegate_core::session::SessionStore::SESSION_KEY, "{oops")
            .unwrap();
        let session = SessionContext::new(Arc::clone(&storage) as Arc<dyn Storage>);
        let fetcher = StubFetcher(Ok(profile()));
        let mut app = AppState::new();

        drive(&mut app, &session, &fetcher, vec![UiEffect::Navigate(Route::Dashboard)]).await;
        assert_eq!(app.route, Route::Login);
        assert_eq!(session.store().load(), SessionLoad::Absent);
    }

    #[tokio::test]
    async fn test_failed_fetch_stays_on_login() {
        let session = SessionContext::in_memory();
        let fetcher = StubFetcher(Err(FetchError::EmptyResult));
        let mut app = AppState::new();
        drive(&mut app, &session, &fetcher, vec![UiEffect::Navigate(Route::Login)]).await;

        submit(&mut app, &session, &fetcher).await;
        assert_eq!(app.route, Route::Login);
        assert_eq!(
            app.login_screen().unwrap().error_message().as_deref(),
            Some("Failed to fetch user data. Please try again.")
        );
        assert_eq!(session.store().load(), SessionLoad::Absent);
    }

    #[tokio::test]
    async fn test_persist_failure_stays_on_login() {
        let session = SessionContext::new(Arc::new(FailingStorage));
        let fetcher = StubFetcher(Ok(profile()));
        let mut app = AppState::new();
        drive(&mut app, &session, &fetcher, vec![UiEffect::Navigate(Route::Login)]).await;

        submit(&mut app, &session, &fetcher).await;
        assert_eq!(app.route, Route::Login);
        assert_eq!(
            app.login_screen().unwrap().error_message().as_deref(),
            Some("Failed to save user data. Please try again.")
        );
    }

    #[tokio::test]
    async fn test_corrupt_session_is_cleared_on_landing() {
        let storage = Arc::new(phonegate_core::session::MemoryStorage::new());
        storage
            .set(phonegate_core::session::SessionStore::SESSION_KEY, "{broken")
            .unwrap();
        let session = SessionContext::new(Arc::clone(&storage) as Arc<dyn Storage>);
        let fetcher = StubFetcher(Ok(profile()));
        let mut app = AppState::new();

        drive(&mut app, &session, &fetcher, vec![UiEffect::Navigate(Route::Landing)]).await;
        assert_eq!(app.route, Route::Login);
        assert_eq!(
            storage
                .get(phonegate_core::session::SessionStore::SESSION_KEY)
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_failed_logout_keeps_dashboard_and_shows_error() {
        let session = SessionContext::new(Arc::new(FailingStorage));
        let fetcher = StubFetcher(Ok(profile()));
        let mut app = AppState::new();
        update(
            &mut app,
            UiEvent::RouteActivated {
                route: Route::Dashboard,
                session: SessionLoad::Present(profile()),
            },
        );

        drive(&mut app, &session, &fetcher, vec![UiEffect::Logout]).await;
        assert_eq!(app.route, Route::Dashboard);
        let error = app.dashboard_screen().unwrap().logout_error.clone();
        assert!(error.unwrap().contains("disk full"));
    }
}
