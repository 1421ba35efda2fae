//! Room collection synchronization.
//!
//! [`RoomCollectionSync`] keeps the ordered view in lockstep with the room
//! manager's collection:
//!
//! - Added rooms are appended and filtered immediately, so a room arriving
//!   while a filter is active is shown or hidden without waiting for the next
//!   debounced pass.
//! - Removed rooms take their entry with them and clear the selection. A
//!   removal for a room the view does not hold is ignored, which absorbs
//!   duplicate and out-of-order signals.
//! - Update signals re-rank every entry from its room's position. Ties keep
//!   their current view order, so re-ranking unchanged positions is a no-op.

use std::sync::Arc;

use crate::{entry::RoomEntry, filter::FilterCriteria, room::Room, selection::SelectionController};

/// The ordered view over the live room collection.
#[derive(Debug, Default)]
pub struct RoomCollectionSync {
    entries: Vec<RoomEntry>,
}

impl RoomCollectionSync {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial full sync: the source's current membership as one bulk add.
    pub fn bind(&mut self, rooms: &[Arc<Room>], criteria: Option<&FilterCriteria>) -> usize {
        let added = self.on_added(rooms, criteria);
        tracing::debug!("bound to room source with {added} rooms");
        added
    }

    /// Append an entry per new room and filter it against `criteria`.
    ///
    /// Rooms already in the view are skipped. Returns the number appended.
    pub fn on_added(&mut self, rooms: &[Arc<Room>], criteria: Option<&FilterCriteria>) -> usize {
        let mut added = 0;
        for room in rooms {
            if self.contains(room) {
                tracing::debug!("room {room} is already listed, ignoring duplicate add");
                continue;
            }

            let mut entry = RoomEntry::new(Arc::clone(room));
            entry.refilter(criteria);
            tracing::trace!("room {room} added, matching filter: {}", entry.matching_filter());
            self.entries.push(entry);
            added += 1;
        }
        added
    }

    /// Drop the entries of removed rooms and clear the selection.
    ///
    /// Unknown rooms are ignored. Returns the number of entries removed.
    pub fn on_removed(&mut self, rooms: &[Arc<Room>], selection: &SelectionController) -> usize {
        let mut removed = 0;
        for room in rooms {
            let Some(index) = self.position_of(room) else {
                tracing::debug!("room {room} is not listed, ignoring removal");
                continue;
            };

            // The entry is the only path from the view to the room; dropping it
            // detaches the join action.
            let entry = self.entries.remove(index);
            tracing::debug!("room {} removed", entry.room());
            selection.activate(&mut self.entries, None);
            removed += 1;
        }
        removed
    }

    /// Re-rank every entry from its room's current position.
    ///
    /// Does not filter, add or remove.
    pub fn on_updated(&mut self) {
        if self.entries.is_empty() {
            return;
        }

        for entry in &mut self.entries {
            entry.rerank();
        }
        self.entries.sort_by_key(RoomEntry::rank);
        tracing::trace!("re-ranked {} rooms", self.entries.len());
    }

    /// Evaluate `criteria` against every entry. Returns the number matching.
    pub fn apply_filter(&mut self, criteria: Option<&FilterCriteria>) -> usize {
        for entry in &mut self.entries {
            entry.refilter(criteria);
        }
        let visible = self.visible().count();
        tracing::trace!("filter applied, {visible}/{} rooms match", self.entries.len());
        visible
    }

    /// All entries in view order.
    pub fn entries(&self) -> &[RoomEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [RoomEntry] {
        &mut self.entries
    }

    /// Entries passing the current filter, in view order.
    pub fn visible(&self) -> impl Iterator<Item = &RoomEntry> {
        self.entries.iter().filter(|entry| entry.matching_filter())
    }

    /// Index of `room`'s entry.
    pub fn position_of(&self, room: &Arc<Room>) -> Option<usize> {
        self.entries.iter().position(|entry| entry.is_for(room))
    }

    /// Whether `room` has an entry.
    pub fn contains(&self, room: &Arc<Room>) -> bool {
        self.position_of(room).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the view is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
