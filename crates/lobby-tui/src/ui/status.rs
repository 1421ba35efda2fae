//! Status bar
//!
//! Filter state, the armed room and the latest status message.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::LobbyApp;

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &LobbyApp, area: Rect) {
    let filter = match (app.filter_enabled(), app.filter_pending()) {
        (_, true) => Span::styled("filtering...", Style::default().fg(Color::Yellow)),
        (true, false) => Span::styled(
            "filter on",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        (false, false) => Span::styled("filter off", Style::default().fg(Color::Gray)),
    };

    let armed = app
        .selected_room()
        .map_or_else(String::new, |room| format!(" | armed #{}", room.id()));

    let status_line = Line::from(vec![
        Span::raw(" "),
        filter,
        Span::raw(armed),
        Span::raw(format!(" | {}", app.status())),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
