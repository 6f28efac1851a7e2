//! Login screen view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::LoginScreen;
use super::state::{FOOTER_NOTE, INPUT_LABEL, PLACEHOLDER, SUBTITLE, TITLE};
use crate::common::{centered_rect, render_card};

const CARD_WIDTH: u16 = 56;
const CARD_HEIGHT: u16 = 15;

/// Renders the login card centered in `area`.
pub fn render_login(frame: &mut Frame, screen: &LoginScreen, spinner: &str, area: Rect) {
    let card = centered_rect(area, CARD_WIDTH, CARD_HEIGHT);
    let inner = render_card(frame, card, "", Color::Cyan);

    let [
        header_area,
        _,
        label_area,
        input_area,
        error_area,
        button_area,
        _,
        footer_area,
    ] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(inner);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, header_area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            INPUT_LABEL,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        label_area,
    );

    render_input(frame, screen, input_area);

    if let Some(error) = screen.error_message() {
        frame.render_widget(
            Paragraph::new(Span::styled(error, Style::default().fg(Color::Red))),
            error_area,
        );
    }

    frame.render_widget(button_line(screen, spinner), button_area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            FOOTER_NOTE,
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        footer_area,
    );
}

fn render_input(frame: &mut Frame, screen: &LoginScreen, area: Rect) {
    let border_color = if screen.is_loading() {
        Color::DarkGray
    } else if screen.error_message().is_some() {
        Color::Red
    } else {
        Color::Gray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let text = screen.input.text();
    let content = if text.is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else if screen.is_loading() {
        Span::styled(text.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(text.to_string())
    };
    frame.render_widget(Paragraph::new(content).block(block), area);

    if !screen.is_loading() {
        let column = screen.input.cursor_column() as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        let x = (area.x + 1 + column).min(max_x);
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn button_line(screen: &LoginScreen, spinner: &str) -> Paragraph<'static> {
    let label = if screen.is_loading() {
        format!(" {spinner} {} ", screen.button_label())
    } else {
        format!(" {} ", screen.button_label())
    };
    let style = if screen.is_loading() {
        Style::default().fg(Color::Black).bg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    Paragraph::new(Span::styled(label, style)).alignment(Alignment::Center)
}
