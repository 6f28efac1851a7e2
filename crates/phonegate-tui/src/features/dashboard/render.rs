//! Dashboard view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::DashboardScreen;
use crate::common::render_card;

const WELCOME: &str = "Welcome to the Dashboard";
const OVERVIEW_TITLE: &str = "Dashboard Overview";
const OVERVIEW_TEXT: &str = "You have successfully logged in! This is your personal dashboard \
                             where you can manage your account and access various features.";
const AVATAR_PLACEHOLDER: &str = "(no avatar)";
const LOGOUT_FAILED: &str = "Logout failed. Please try again.";

const TILES: [(&str, &str); 4] = [
    ("Profile", "Manage your personal information"),
    ("Settings", "Configure your preferences"),
    ("Analytics", "View your activity statistics"),
    ("Support", "Get help and contact support"),
];

pub fn render_dashboard(frame: &mut Frame, screen: &DashboardScreen, area: Rect) {
    let [header_area, overview_area, tiles_area, _] = Layout::vertical([
        Constraint::Length(8),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Min(0),
    ])
    .areas(area);

    render_header(frame, screen, header_area);

    let inner = render_card(frame, overview_area, OVERVIEW_TITLE, Color::Cyan);
    frame.render_widget(
        Paragraph::new(OVERVIEW_TEXT).wrap(Wrap { trim: true }),
        inner,
    );

    render_tiles(frame, tiles_area);
}

fn render_header(frame: &mut Frame, screen: &DashboardScreen, area: Rect) {
    let profile = &screen.profile;
    let inner = render_card(frame, area, "", Color::Cyan);

    let avatar = if profile.avatar_url.is_empty() {
        AVATAR_PLACEHOLDER
    } else {
        profile.avatar_url.as_str()
    };

    let [details_area, logout_area] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(12)]).areas(inner);

    let mut lines = vec![
        Line::from(Span::styled(
            WELCOME,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            profile.full_name(),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            profile.email.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Avatar: ", Style::default().fg(Color::DarkGray)),
            Span::styled(avatar.to_string(), Style::default().fg(Color::DarkGray)),
        ]),
    ];
    if screen.logout_error.is_some() {
        lines.push(Line::from(Span::styled(
            LOGOUT_FAILED,
            Style::default().fg(Color::Red),
        )));
    }
    frame.render_widget(Paragraph::new(lines), details_area);

    let logout = Paragraph::new(Span::styled(
        " Logout [l] ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(logout, logout_area);
}

fn render_tiles(frame: &mut Frame, area: Rect) {
    let areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for ((title, description), tile_area) in TILES.iter().zip(areas.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                format!(" {title} "),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        let tile = Paragraph::new(*description)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(tile, *tile_area);
    }
}
