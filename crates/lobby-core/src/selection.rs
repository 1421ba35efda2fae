//! Arm-then-confirm selection.
//!
//! # State Machine
//!
//! ```text
//!                activate(A)                     activate(A)
//! ┌─────────────┐ ─────────> ┌──────────────┐ ────────────────> JoinRequested(A)
//! │ NotSelected │            │ A Selected   │ <──────────────── (state unchanged)
//! └─────────────┘ <───────── └──────────────┘
//!                activate(None)      │ activate(B)
//!                                    ↓
//!                             ┌──────────────┐
//!                             │ B Selected   │
//!                             └──────────────┘
//! ```
//!
//! Confirmation depends only on entry state, never on timing or input device,
//! so "armed" can be queried independently of how the user interacts.

use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    entry::{RoomEntry, SelectionState},
    room::Room,
};

/// Shared "currently selected room" slot.
pub type SelectedRoom = watch::Sender<Option<Arc<Room>>>;

/// Governs which entry is armed and when activation becomes a join.
#[derive(Debug)]
pub struct SelectionController {
    slot: SelectedRoom,
}

impl SelectionController {
    /// Create a controller writing into `slot`.
    pub fn new(slot: SelectedRoom) -> Self {
        Self { slot }
    }

    /// Activate `room` (or clear with `None`).
    ///
    /// Returns the room to join when `room` was already armed. Otherwise arms
    /// the matching entry, if any, and disarms every other entry. The slot is
    /// written with `room` in every case.
    pub fn activate(&self, entries: &mut [RoomEntry], room: Option<&Arc<Room>>) -> Option<Arc<Room>> {
        let located = room.and_then(|room| entries.iter().position(|entry| entry.is_for(room)));

        let join = match located {
            Some(index) if entries[index].is_selected() => Some(Arc::clone(entries[index].room())),
            _ => {
                for (i, entry) in entries.iter_mut().enumerate() {
                    let state = if Some(i) == located {
                        SelectionState::Selected
                    } else {
                        SelectionState::NotSelected
                    };
                    entry.set_state(state);
                }
                None
            },
        };

        match (&join, room) {
            (Some(room), _) => tracing::debug!("join requested for room {room}"),
            (None, Some(room)) if located.is_some() => tracing::debug!("armed room {room}"),
            (None, Some(room)) => tracing::debug!("room {room} is not in the view, nothing armed"),
            (None, None) => tracing::trace!("selection cleared"),
        }

        self.slot.send_replace(room.cloned());
        join
    }

    /// The armed entry, if any.
    pub fn selected<'a>(&self, entries: &'a [RoomEntry]) -> Option<&'a RoomEntry> {
        entries.iter().find(|entry| entry.is_selected())
    }

    /// Current value of the selected-room slot.
    pub fn selected_room(&self) -> Option<Arc<Room>> {
        self.slot.borrow().clone()
    }

    /// Observe the selected-room slot.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Room>>> {
        self.slot.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: u64) -> Vec<RoomEntry> {
        (0..n).map(|id| RoomEntry::new(Room::new(id, format!("room {id}"), "host").into_shared())).collect()
    }

    fn controller() -> SelectionController {
        SelectionController::new(watch::Sender::new(None))
    }

    fn selected_count(entries: &[RoomEntry]) -> usize {
        entries.iter().filter(|e| e.is_selected()).count()
    }

    #[test]
    fn first_activation_arms() {
        let selection = controller();
        let mut view = entries(3);
        let room = Arc::clone(view[1].room());

        assert!(selection.activate(&mut view, Some(&room)).is_none());
        assert!(view[1].is_selected());
        assert_eq!(selected_count(&view), 1);
        assert!(selection.selected_room().is_some_and(|r| Room::same(&r, &room)));
    }

    #[test]
    fn second_activation_joins_and_keeps_selection() {
        let selection = controller();
        let mut view = entries(2);
        let room = Arc::clone(view[0].room());

        selection.activate(&mut view, Some(&room));
        let join = selection.activate(&mut view, Some(&room));

        assert!(join.is_some_and(|r| Room::same(&r, &room)));
        assert!(view[0].is_selected());
        assert!(selection.selected_room().is_some_and(|r| Room::same(&r, &room)));
    }

    #[test]
    fn switching_rooms_moves_selection() {
        let selection = controller();
        let mut view = entries(2);
        let a = Arc::clone(view[0].room());
        let b = Arc::clone(view[1].room());

        selection.activate(&mut view, Some(&a));
        assert!(selection.activate(&mut view, Some(&b)).is_none());
        assert!(!view[0].is_selected());
        assert!(view[1].is_selected());
    }

    #[test]
    fn none_clears_without_join() {
        let selection = controller();
        let mut view = entries(2);
        let a = Arc::clone(view[0].room());

        selection.activate(&mut view, Some(&a));
        assert!(selection.activate(&mut view, None).is_none());
        assert_eq!(selected_count(&view), 0);
        assert!(selection.selected_room().is_none());
    }

    #[test]
    fn unknown_room_disarms_but_fills_slot() {
        let selection = controller();
        let mut view = entries(2);
        let a = Arc::clone(view[0].room());
        let stranger = Room::new(99, "elsewhere", "host").into_shared();

        selection.activate(&mut view, Some(&a));
        assert!(selection.activate(&mut view, Some(&stranger)).is_none());
        assert_eq!(selected_count(&view), 0);
        assert!(selection.selected_room().is_some_and(|r| Room::same(&r, &stranger)));
    }

    #[test]
    fn slot_is_observable() {
        let selection = controller();
        let mut observer = selection.subscribe();
        let mut view = entries(1);
        let a = Arc::clone(view[0].room());

        selection.activate(&mut view, Some(&a));
        assert!(observer.has_changed().unwrap_or(false));
        assert!(observer.borrow_and_update().as_ref().is_some_and(|r| Room::same(r, &a)));
    }
}
