//! Lobby screen state machine.
//!
//! Pure state: terminal and room events in, [`AppAction`]s out. The room list
//! itself is a [`RoomsContainer`]; this layer adds the search line, a cursor
//! over the visible rooms and a status message.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use lobby_core::{
    ContainerAction, ContainerConfig, ContainerError, FilterCriteria, Room, RoomEntry,
    RoomManager, RoomsContainer, SecondaryFilter,
};
use lobby_search::SearchRequest;
use tokio::sync::watch;

use crate::input::{Edit, InputState, KeyInput};

/// Events the lobby screen reacts to.
#[derive(Debug, Clone, Copy)]
pub enum AppEvent {
    /// Key press.
    Key(KeyInput),
    /// Periodic tick carrying the current time.
    Tick(Instant),
    /// Terminal resized.
    Resize(u16, u16),
}

/// Actions for the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Redraw.
    Render,
    /// Exit.
    Quit,
}

/// Lobby screen.
pub struct LobbyApp {
    rooms: RoomsContainer,
    criteria: watch::Sender<Option<FilterCriteria>>,
    input: InputState,
    filter_enabled: bool,
    /// Index into the visible rooms.
    cursor: usize,
    status: String,
    joins: Vec<Arc<Room>>,
}

impl LobbyApp {
    /// Create the screen and attach it to `manager`. Filtering starts off.
    pub fn new<M>(config: ContainerConfig, manager: &mut M) -> Result<Self, ContainerError>
    where
        M: RoomManager + ?Sized,
    {
        let criteria = watch::Sender::new(None);
        let mut rooms: RoomsContainer = RoomsContainer::new(config, watch::Sender::new(None));
        rooms.attach(manager, Some(criteria.subscribe()))?;

        Ok(Self {
            rooms,
            criteria,
            input: InputState::new(),
            filter_enabled: false,
            cursor: 0,
            status: "type to search, Tab toggles the filter, Enter twice joins".to_owned(),
            joins: Vec::new(),
        })
    }

    /// Handle an event.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick(now) => {
                let actions = self.rooms.poll(now);
                self.clamp_cursor();
                self.container_actions(actions)
            },
            AppEvent::Resize(..) => vec![AppAction::Render],
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Esc => vec![AppAction::Quit],
            KeyInput::Tab => {
                self.filter_enabled = !self.filter_enabled;
                self.publish_criteria();
                vec![AppAction::Render]
            },
            KeyInput::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Down => {
                self.cursor = self.cursor.saturating_add(1);
                self.clamp_cursor();
                vec![AppAction::Render]
            },
            KeyInput::Enter => {
                let room = self.room_under_cursor();
                let actions = self.rooms.activate(room.as_ref());
                self.container_actions(actions)
            },
            _ => match self.input.edit(key) {
                Edit::Changed => {
                    self.filter_enabled = true;
                    self.publish_criteria();
                    vec![AppAction::Render]
                },
                Edit::Moved => vec![AppAction::Render],
                Edit::Ignored => vec![],
            },
        }
    }

    /// Publish the search line to the criteria holder. The container picks it
    /// up on its next poll and filters once typing pauses.
    fn publish_criteria(&self) {
        let criteria = self
            .filter_enabled
            .then(|| FilterCriteria::new(self.input.buffer(), SecondaryFilter::Public));
        tracing::trace!("criteria changed: {criteria:?}");
        self.criteria.send_replace(criteria);
    }

    fn container_actions(&mut self, actions: Vec<ContainerAction>) -> Vec<AppAction> {
        let mut render = false;
        for action in actions {
            match action {
                ContainerAction::Render => render = true,
                ContainerAction::JoinRequested { room } => {
                    tracing::info!("joining room {room}");
                    self.status = format!("joining {room} hosted by {}", room.host());
                    self.joins.push(room);
                    render = true;
                },
            }
        }
        if render { vec![AppAction::Render] } else { vec![] }
    }

    fn room_under_cursor(&self) -> Option<Arc<Room>> {
        self.rooms.visible().nth(self.cursor).map(|entry| Arc::clone(entry.room()))
    }

    fn clamp_cursor(&mut self) {
        let visible = self.rooms.visible().count();
        self.cursor = self.cursor.min(visible.saturating_sub(1));
    }

    /// Visible rooms in display order.
    pub fn visible(&self) -> Vec<&RoomEntry> {
        self.rooms.visible().collect()
    }

    /// Number of listed rooms, visible or not.
    pub fn total(&self) -> usize {
        self.rooms.entries().len()
    }

    /// Cursor index into [`Self::visible`].
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Search line.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Whether the public filter and search are in force.
    pub fn filter_enabled(&self) -> bool {
        self.filter_enabled
    }

    /// Whether a filter pass is waiting for typing to pause.
    pub fn filter_pending(&self) -> bool {
        self.rooms.pending_filter()
    }

    /// Time until the pending filter pass.
    pub fn filter_due_in(&self, now: Instant) -> Option<Duration> {
        self.rooms.filter_due_in(now)
    }

    /// Room in the selected-room slot.
    pub fn selected_room(&self) -> Option<Arc<Room>> {
        self.rooms.selected_room()
    }

    /// Status message.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Rooms joined so far.
    pub fn joins(&self) -> &[Arc<Room>] {
        &self.joins
    }

    /// Remote listing query equivalent to the search line.
    pub fn search_request(&self) -> SearchRequest {
        SearchRequest::new(self.input.buffer(), None)
    }
}
