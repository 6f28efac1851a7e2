//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen here. The reducer stays pure and produces
//! effects; this module executes them. Async work (the profile fetch) is
//! spawned on tokio and reports back through the inbox channel, which the
//! loop drains every frame.

mod handlers;
mod inbox;

use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use phonegate_core::profile::RandomUserClient;
use phonegate_core::route::Route;
use phonegate_core::session::SessionContext;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::AppTerminal;
use crate::{render, terminal, update};

/// Tick cadence while a fetch is in flight (spinner animation).
pub const FRAME_DURATION: Duration = Duration::from_millis(80);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(250);

/// Full-screen TUI runtime.
///
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: AppTerminal,
    pub state: AppState,
    session: SessionContext,
    client: RandomUserClient,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a runtime and takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(session: SessionContext, client: RandomUserClient) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (inbox_tx, inbox_rx) = inbox::channel();

        Ok(Self {
            terminal,
            state: AppState::new(),
            session,
            client,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the event loop starting at the landing route.
    ///
    /// # Errors
    /// Returns an error if reading terminal input or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        self.execute_effect(UiEffect::Navigate(Route::Landing));

        while !self.state.should_quit {
            self.terminal
                .draw(|frame| render::render(&self.state, frame))
                .context("Failed to draw frame")?;

            for event in self.collect_events()? {
                self.dispatch_event(event);
            }
        }

        tracing::info!("quitting");
        Ok(())
    }

    /// Collects terminal input, inbox results and ticks.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let tick_interval = if self.state.fetch.is_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler and sends its event to the inbox.
    fn spawn_effect<Fut>(&self, fut: Fut)
    where
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(fut.await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::Navigate(route) => {
                let event = handlers::activate_route(&self.session, route);
                self.dispatch_event(event);
            }
            UiEffect::FetchProfile { task } => {
                self.spawn_effect(handlers::profile_fetch(self.client.clone(), task));
            }
            UiEffect::PersistSession { profile } => {
                let event = handlers::persist_session(&self.session, &profile);
                self.dispatch_event(event);
            }
            UiEffect::ClearSession => handlers::clear_session(&self.session),
            UiEffect::Logout => {
                let event = handlers::logout(&self.session);
                self.dispatch_event(event);
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
