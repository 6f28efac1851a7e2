//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use crate::state::{AppState, Screen};
use crate::{dashboard, login};

/// Spinner frames for the loading button.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Height of the key hint line at the bottom.
const HINT_HEIGHT: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let [body, hints] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(HINT_HEIGHT)]).areas(frame.area());

    match &app.screen {
        Screen::Landing => render_landing(frame, body),
        Screen::Login(screen) => login::render_login(frame, screen, spinner(app), body),
        Screen::Dashboard(screen) => dashboard::render_dashboard(frame, screen, body),
    }

    render_hints(frame, app, hints);
}

fn spinner(app: &AppState) -> &'static str {
    SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()]
}

fn render_landing(frame: &mut Frame, area: Rect) {
    let y = area.y + area.height / 2;
    let line = Rect::new(area.x, y, area.width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled("Redirecting...", Style::default().fg(Color::Gray)))
            .alignment(Alignment::Center),
        line,
    );
}

fn render_hints(frame: &mut Frame, app: &AppState, area: Rect) {
    let text = match &app.screen {
        Screen::Landing => "Esc quit",
        Screen::Login(_) => "Enter submit · Esc quit",
        Screen::Dashboard(_) => "l logout · Esc quit",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Right),
        area,
    );
}
