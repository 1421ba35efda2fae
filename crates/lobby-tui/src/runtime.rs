//! Async runtime
//!
//! Event loop that drives terminal I/O and the simulated lobby. Uses
//! `tokio::select!` over terminal events, the UI tick and the lobby churn.

use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use lobby_core::{ContainerConfig, ContainerError, LocalRoomManager};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::{
    app::{AppAction, AppEvent, LobbyApp},
    feed::LobbyFeed,
    input::KeyInput,
    ui,
};

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The lobby screen could not attach to the room manager.
    #[error("room list error: {0}")]
    Container(#[from] ContainerError),
}

/// Runtime settings.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Rooms opened before the first frame.
    pub rooms: usize,
    /// Seed for the simulated lobby.
    pub seed: u64,
    /// Room list settings.
    pub container: ContainerConfig,
    /// Interval between simulated lobby changes.
    pub churn: Duration,
    /// UI tick interval.
    pub tick: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            rooms: 24,
            seed: 0,
            container: ContainerConfig::default(),
            churn: Duration::from_millis(1500),
            tick: Duration::from_millis(50),
        }
    }
}

/// Async runtime for the lobby TUI.
///
/// Owns the terminal, the lobby screen and the simulated room manager.
pub struct Runtime {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: LobbyApp,
    manager: LocalRoomManager,
    feed: LobbyFeed,
    config: RuntimeConfig,
}

impl Runtime {
    /// Populate the lobby, attach the screen and take over the terminal.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let mut manager = LocalRoomManager::new();
        let mut feed = LobbyFeed::new(config.seed);
        feed.populate(&mut manager, config.rooms);

        let app = LobbyApp::new(config.container.clone(), &mut manager)?;

        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        tracing::info!("lobby ready with {} rooms, seed {}", manager.len(), config.seed);

        Ok(Self { terminal, app, manager, feed, config })
    }

    /// Run the main event loop until the user quits.
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        self.render()?;

        let mut event_stream = EventStream::new();
        let mut tick_interval = tokio::time::interval(self.config.tick);
        let mut churn_interval = tokio::time::interval(self.config.churn);
        churn_interval.reset();

        loop {
            let should_quit = tokio::select! {
                // Terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_terminal_event(event)?,
                        Some(Err(e)) => return Err(RuntimeError::Io(e)),
                        None => true,
                    }
                }

                // Periodic tick
                _ = tick_interval.tick() => {
                    let actions = self.app.handle(AppEvent::Tick(Instant::now()));
                    self.process_actions(actions)?
                }

                // Lobby churn, picked up by the next tick
                _ = churn_interval.tick() => {
                    self.feed.step(&mut self.manager);
                    false
                }
            };

            if should_quit {
                break;
            }
        }

        tracing::info!("leaving lobby after {} joins", self.app.joins().len());
        Ok(())
    }

    /// Handle a terminal event and return whether to quit.
    fn handle_terminal_event(&mut self, event: Event) -> Result<bool, RuntimeError> {
        let app_event = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match convert_key(key.code) {
                Some(key) => AppEvent::Key(key),
                None => return Ok(false),
            },
            Event::Resize(cols, rows) => AppEvent::Resize(cols, rows),
            _ => return Ok(false),
        };

        let actions = self.app.handle(app_event);
        self.process_actions(actions)
    }

    /// Process actions returned by the app. Returns true if should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, RuntimeError> {
        for action in actions {
            match action {
                AppAction::Render => self.render()?,
                AppAction::Quit => return Ok(true),
            }
        }
        Ok(false)
    }

    fn render(&mut self) -> Result<(), RuntimeError> {
        self.terminal.draw(|frame| ui::render(frame, &self.app))?;
        Ok(())
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Convert crossterm `KeyCode` to `KeyInput`.
fn convert_key(code: KeyCode) -> Option<KeyInput> {
    match code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Delete => Some(KeyInput::Delete),
        KeyCode::Tab => Some(KeyInput::Tab),
        KeyCode::Esc => Some(KeyInput::Esc),
        KeyCode::Left => Some(KeyInput::Left),
        KeyCode::Right => Some(KeyInput::Right),
        KeyCode::Up => Some(KeyInput::Up),
        KeyCode::Down => Some(KeyInput::Down),
        KeyCode::Home => Some(KeyInput::Home),
        KeyCode::End => Some(KeyInput::End),
        _ => None,
    }
}
