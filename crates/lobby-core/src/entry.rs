//! View-side state paired with a live room.

use std::sync::Arc;

use crate::{
    filter::{self, FilterCriteria},
    room::{Position, Room},
};

/// Whether an entry is armed for joining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Not chosen.
    #[default]
    NotSelected,
    /// Chosen once; a second activation joins.
    Selected,
}

/// One row of the room list.
///
/// Holds a shared handle to its room and never mutates it. Filter and
/// selection state are written by the sync and the selection controller.
#[derive(Debug, Clone)]
pub struct RoomEntry {
    room: Arc<Room>,
    matching_filter: bool,
    state: SelectionState,
    rank: Position,
}

impl RoomEntry {
    /// Create an unselected, visible entry ranked at the room's position.
    pub fn new(room: Arc<Room>) -> Self {
        let rank = room.position();
        Self { room, matching_filter: true, state: SelectionState::NotSelected, rank }
    }

    /// Backing room.
    pub fn room(&self) -> &Arc<Room> {
        &self.room
    }

    /// Whether this entry's room is `room`.
    pub fn is_for(&self, room: &Arc<Room>) -> bool {
        Room::same(&self.room, room)
    }

    /// Result of the last filter evaluation.
    pub fn matching_filter(&self) -> bool {
        self.matching_filter
    }

    /// Selection state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Whether the entry is armed.
    pub fn is_selected(&self) -> bool {
        self.state == SelectionState::Selected
    }

    /// Rank last applied from the room's position.
    pub fn rank(&self) -> Position {
        self.rank
    }

    /// Re-evaluate the filter against this entry's room.
    pub(crate) fn refilter(&mut self, criteria: Option<&FilterCriteria>) {
        self.matching_filter = filter::matches(&self.room, criteria);
    }

    pub(crate) fn set_state(&mut self, state: SelectionState) {
        self.state = state;
    }

    /// Copy the room's current position into the rank.
    pub(crate) fn rerank(&mut self) {
        self.rank = self.room.position();
    }
}
