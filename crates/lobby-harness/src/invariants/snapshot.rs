//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of a room list at a point in time.
//! Invariants operate on snapshots rather than live state so that a check
//! sees one consistent picture.

use std::{ops::Sub, time::Duration};

use lobby_core::{
    FilterCriteria, LocalRoomManager, Position, RoomId, RoomManager, RoomsContainer, filter,
};

/// Snapshot of a room list and, optionally, its source.
#[derive(Debug, Clone, Default)]
pub struct SystemSnapshot {
    /// View entries in display order.
    pub entries: Vec<EntrySnapshot>,
    /// Ids listed by the room source. `None` if the source was not captured.
    pub source_rooms: Option<Vec<RoomId>>,
    /// Room held by the selected-room slot.
    pub selected_room: Option<RoomId>,
    /// Criteria the container last observed.
    pub criteria: Option<FilterCriteria>,
    /// No debounced filter pass is waiting.
    pub filter_settled: bool,
    /// An update signal was the last thing applied, so the view must be in
    /// rank order.
    pub ranked: bool,
}

impl SystemSnapshot {
    /// Create an empty snapshot.
    pub fn empty() -> Self {
        Self { filter_settled: true, ..Self::default() }
    }

    /// Capture the container's view.
    pub fn from_container<I>(container: &RoomsContainer<I>) -> Self
    where
        I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
    {
        let criteria = container.criteria().cloned();
        let entries = container
            .entries()
            .iter()
            .map(|entry| EntrySnapshot {
                room_id: entry.room().id(),
                rank: entry.rank(),
                matching_filter: entry.matching_filter(),
                expected_match: filter::matches(entry.room(), criteria.as_ref()),
                selected: entry.is_selected(),
            })
            .collect();

        Self {
            entries,
            source_rooms: None,
            selected_room: container.selected_room().map(|room| room.id()),
            criteria,
            filter_settled: !container.pending_filter(),
            ranked: false,
        }
    }

    /// Attach the source's membership.
    pub fn with_source(mut self, manager: &LocalRoomManager) -> Self {
        self.source_rooms = Some(manager.rooms().iter().map(|room| room.id()).collect());
        self
    }

    /// Mark whether the view must currently be in rank order.
    pub fn with_ranked(mut self, ranked: bool) -> Self {
        self.ranked = ranked;
        self
    }

    /// Ids of the entries in display order.
    pub fn entry_ids(&self) -> Vec<RoomId> {
        self.entries.iter().map(|entry| entry.room_id).collect()
    }
}

/// Snapshot of one view entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySnapshot {
    /// Backing room.
    pub room_id: RoomId,
    /// Rank captured at the last re-rank.
    pub rank: Position,
    /// Filter flag held by the entry.
    pub matching_filter: bool,
    /// Filter flag recomputed from the snapshot's criteria.
    pub expected_match: bool,
    /// Whether the entry is armed.
    pub selected: bool,
}

impl EntrySnapshot {
    /// Unselected, matching entry with rank 0.
    pub fn new(room_id: RoomId) -> Self {
        Self { room_id, rank: 0, matching_filter: true, expected_match: true, selected: false }
    }

    /// Set the selection flag.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Set the rank.
    pub fn with_rank(mut self, rank: Position) -> Self {
        self.rank = rank;
        self
    }

    /// Set both filter flags.
    pub fn with_filter(mut self, matching_filter: bool, expected_match: bool) -> Self {
        self.matching_filter = matching_filter;
        self.expected_match = expected_match;
        self
    }
}
