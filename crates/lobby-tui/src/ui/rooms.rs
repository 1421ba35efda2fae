//! Room list
//!
//! Visible rooms in rank order. The cursor row is highlighted and the room
//! in the selected-room slot carries a marker.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::app::LobbyApp;

const ARMED_MARKER: &str = "* ";
const PLAIN_MARKER: &str = "  ";

/// Render the room list.
pub fn render(frame: &mut Frame, app: &LobbyApp, area: Rect) {
    let visible = app.visible();

    let items: Vec<ListItem> = visible
        .iter()
        .map(|entry| {
            let room = entry.room();
            let (marker, style) = if entry.is_selected() {
                (ARMED_MARKER, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                (PLAIN_MARKER, Style::default())
            };

            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("#{} {}", room.id(), room.name()), style),
                Span::styled(format!("  {}", room.host()), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("  [{}]", room.availability()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let title = format!(" Rooms ({}/{}) ", visible.len(), app.total());
    let block = Block::default().borders(Borders::ALL).title(title);
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.cursor()));
    }

    frame.render_stateful_widget(list, area, &mut state);
}
