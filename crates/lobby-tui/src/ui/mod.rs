//! UI rendering
//!
//! Rendering functions that turn [`LobbyApp`] state into terminal output
//! using ratatui widgets. Nothing here performs I/O.

mod input;
mod rooms;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::LobbyApp;

/// Render the whole lobby screen.
pub fn render(frame: &mut Frame, app: &LobbyApp) {
    const ROOMS_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(ROOMS_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [rooms_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    rooms::render(frame, app, *rooms_area);
    input::render(frame, app, *input_area);
    status::render(frame, app, *status_area);
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use lobby_core::{Availability, ContainerConfig, LocalRoomManager, Room};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::{app::AppEvent, input::KeyInput};

    fn lobby() -> (LobbyApp, LocalRoomManager) {
        let mut manager = LocalRoomManager::new();
        manager.add_rooms([
            Room::new(1, "chill farm", "ann"),
            Room::new(2, "tournament", "bo").with_availability(Availability::InviteOnly),
        ]);
        let config = ContainerConfig { filter_debounce: Duration::ZERO };
        let app = LobbyApp::new(config, &mut manager).unwrap();
        (app, manager)
    }

    fn draw(app: &LobbyApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        screen(terminal.backend().buffer())
    }

    fn screen(buffer: &Buffer) -> String {
        let area = buffer.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn lists_every_room_without_filter() {
        let (app, _manager) = lobby();
        let screen = draw(&app);

        assert!(screen.contains("Rooms (2/2)"));
        assert!(screen.contains("#1 chill farm"));
        assert!(screen.contains("#2 tournament"));
        assert!(screen.contains("filter off"));
    }

    #[test]
    fn armed_room_is_marked() {
        let (mut app, _manager) = lobby();
        app.handle(AppEvent::Key(KeyInput::Enter));
        let screen = draw(&app);

        assert!(screen.contains("* #1 chill farm"));
        assert!(screen.contains("armed #1"));
    }

    #[test]
    fn search_line_and_query_are_shown() {
        let (mut app, _manager) = lobby();
        for c in "chill".chars() {
            app.handle(AppEvent::Key(KeyInput::Char(c)));
        }
        app.handle(AppEvent::Tick(Instant::now()));
        let screen = draw(&app);

        assert!(screen.contains("> chill"));
        assert!(screen.contains("q=chill"));
        assert!(screen.contains("Rooms (1/2)"));
        assert!(!screen.contains("tournament"));
        assert!(screen.contains("filter on"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let (app, _manager) = lobby();
        let mut terminal = Terminal::new(TestBackend::new(4, 2)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
    }
}
