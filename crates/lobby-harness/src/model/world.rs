//! Model lobby - the reference implementation.
//!
//! A deliberately naive room list that recomputes everything from plain
//! data. It is the oracle against which [`crate::SimLobby`] is verified, so
//! it shares no logic with `lobby-core`.

use std::time::Duration;

use lobby_core::{DEFAULT_FILTER_DEBOUNCE, RoomId};

use super::operation::{Operation, wrap};

/// Observable state for oracle comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// `(room, matching filter, selected)` in view order.
    pub view: Vec<(RoomId, bool, bool)>,
    /// Room held by the selected-room slot.
    pub selected_slot: Option<RoomId>,
    /// Joins requested so far, in order.
    pub joins: Vec<RoomId>,
    /// Whether a filter pass is waiting.
    pub filter_pending: bool,
}

#[derive(Debug, Clone)]
struct ModelRoom {
    id: RoomId,
    name: String,
    host: String,
    public: bool,
    position: i64,
}

#[derive(Debug, Clone)]
struct ModelEntry {
    id: RoomId,
    rank: i64,
    matching: bool,
    selected: bool,
}

/// Reference room list.
#[derive(Debug, Clone)]
pub struct ModelLobby {
    debounce_ms: u64,
    now_ms: u64,
    next_id: RoomId,
    /// Source membership.
    rooms: Vec<ModelRoom>,
    last_closed: Option<ModelRoom>,
    view: Vec<ModelEntry>,
    /// Search string in force; `None` when filtering is off.
    criteria: Option<String>,
    /// When the pending filter pass was scheduled.
    pending_since: Option<u64>,
    slot: Option<RoomId>,
    joins: Vec<RoomId>,
}

impl Default for ModelLobby {
    fn default() -> Self {
        Self::new(DEFAULT_FILTER_DEBOUNCE)
    }
}

impl ModelLobby {
    /// Create an empty lobby filtering with the given debounce window.
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce_ms: debounce.as_millis() as u64,
            now_ms: 0,
            next_id: 1,
            rooms: Vec::new(),
            last_closed: None,
            view: Vec::new(),
            criteria: None,
            pending_since: None,
            slot: None,
            joins: Vec::new(),
        }
    }

    /// Apply an operation, then let any due filter pass run.
    pub fn apply(&mut self, op: &Operation) {
        self.apply_op(op);
        self.settle();
    }

    fn apply_op(&mut self, op: &Operation) {
        match op {
            Operation::OpenRoom { name, public, position } => {
                let room = ModelRoom {
                    id: self.next_id,
                    name: name.name().to_owned(),
                    host: name.host().to_owned(),
                    public: *public,
                    position: i64::from(*position),
                };
                self.next_id += 1;

                let matching = self.matches(&room);
                self.view.push(ModelEntry {
                    id: room.id,
                    rank: room.position,
                    matching,
                    selected: false,
                });
                self.rooms.push(room);
            },
            Operation::CloseRoom { slot } => {
                let Some(index) = wrap(*slot, self.rooms.len()) else {
                    return;
                };
                let room = self.rooms.remove(index);
                self.view.retain(|entry| entry.id != room.id);
                for entry in &mut self.view {
                    entry.selected = false;
                }
                self.slot = None;
                self.last_closed = Some(room);
            },
            Operation::MoveRoom { slot, position } => {
                let Some(index) = wrap(*slot, self.rooms.len()) else {
                    return;
                };
                self.rooms[index].position = i64::from(*position);
                for entry in &mut self.view {
                    if let Some(room) = self.rooms.iter().find(|room| room.id == entry.id) {
                        entry.rank = room.position;
                    }
                }
                self.view.sort_by_key(|entry| entry.rank);
            },
            Operation::Search { text } => self.set_criteria(Some(text.text().to_owned())),
            Operation::ClearFilter => self.set_criteria(None),
            Operation::Activate { slot } => {
                let target = slot.and_then(|slot| wrap(slot, self.view.len()));
                let id = target.map(|index| self.view[index].id);
                self.activate(id);
            },
            Operation::ActivateClosed => {
                if let Some(id) = self.last_closed.as_ref().map(|room| room.id) {
                    self.activate(Some(id));
                }
            },
            Operation::AdvanceTime { millis } => self.now_ms += u64::from(*millis),
        }
    }

    fn set_criteria(&mut self, criteria: Option<String>) {
        self.criteria = criteria;
        self.pending_since = Some(self.now_ms);
    }

    fn activate(&mut self, id: Option<RoomId>) {
        let armed = self.view.iter().any(|entry| Some(entry.id) == id && entry.selected);
        if armed {
            self.joins.extend(id);
        } else {
            for entry in &mut self.view {
                entry.selected = Some(entry.id) == id;
            }
        }
        self.slot = id;
    }

    fn settle(&mut self) {
        let due = self.pending_since.is_some_and(|since| self.now_ms - since >= self.debounce_ms);
        if !due {
            return;
        }

        self.pending_since = None;
        for index in 0..self.view.len() {
            let id = self.view[index].id;
            let matching =
                self.rooms.iter().find(|room| room.id == id).is_some_and(|room| self.matches(room));
            self.view[index].matching = matching;
        }
    }

    fn matches(&self, room: &ModelRoom) -> bool {
        let Some(needle) = &self.criteria else {
            return true;
        };
        let needle = needle.to_lowercase();
        let text = needle.is_empty()
            || room.name.to_lowercase().contains(&needle)
            || room.host.to_lowercase().contains(&needle);
        text && room.public
    }

    /// Observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState {
            view: self.view.iter().map(|entry| (entry.id, entry.matching, entry.selected)).collect(),
            selected_slot: self.slot,
            joins: self.joins.clone(),
            filter_pending: self.pending_since.is_some(),
        }
    }

    /// Number of rooms the source lists.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NameSeed, SearchSeed};

    fn open(model: &mut ModelLobby, seed: u8, public: bool) {
        model.apply(&Operation::OpenRoom { name: NameSeed(seed), public, position: 0 });
    }

    #[test]
    fn second_activation_joins() {
        let mut model = ModelLobby::default();
        open(&mut model, 0, true);

        model.apply(&Operation::Activate { slot: Some(0) });
        model.apply(&Operation::Activate { slot: Some(0) });

        let state = model.observable_state();
        assert_eq!(state.joins, [1]);
        assert_eq!(state.view, [(1, true, true)]);
    }

    #[test]
    fn search_waits_for_debounce() {
        let mut model = ModelLobby::default();
        open(&mut model, 0, true);

        // "zz"
        model.apply(&Operation::Search { text: SearchSeed(6) });
        assert!(model.observable_state().view[0].1);

        model.apply(&Operation::AdvanceTime { millis: 200 });
        assert!(!model.observable_state().view[0].1);
    }
}
