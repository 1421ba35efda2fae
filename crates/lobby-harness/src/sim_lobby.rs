//! Real room list under simulation.
//!
//! [`SimLobby`] wires a [`RoomsContainer`] to a [`LocalRoomManager`] and a
//! criteria holder on virtual time, and applies model [`Operation`]s to them
//! the way a runtime would: perform the input, then poll the container.

use std::{sync::Arc, time::Duration};

use lobby_core::{
    Availability, ContainerAction, ContainerConfig, ContainerError, FilterCriteria,
    LocalRoomManager, Room, RoomId, RoomManager, RoomsContainer, SecondaryFilter,
};
use tokio::sync::watch;

use crate::{
    clock::{SimClock, SimInstant},
    invariants::SystemSnapshot,
    model::{ObservableState, Operation, wrap},
};

/// Container, room source and criteria holder driven on virtual time.
pub struct SimLobby {
    clock: SimClock,
    manager: LocalRoomManager,
    criteria: watch::Sender<Option<FilterCriteria>>,
    container: RoomsContainer<SimInstant>,
    next_id: RoomId,
    last_closed: Option<Arc<Room>>,
    joins: Vec<RoomId>,
    ranked: bool,
}

impl SimLobby {
    /// Create an empty lobby with an attached container.
    pub fn new(config: ContainerConfig) -> Result<Self, ContainerError> {
        let mut manager = LocalRoomManager::new();
        let criteria = watch::Sender::new(None);
        let mut container: RoomsContainer<SimInstant> =
            RoomsContainer::new(config, watch::Sender::new(None));
        container.attach(&mut manager, Some(criteria.subscribe()))?;

        Ok(Self {
            clock: SimClock::new(),
            manager,
            criteria,
            container,
            next_id: 1,
            last_closed: None,
            joins: Vec::new(),
            ranked: true,
        })
    }

    /// Apply an operation, then poll the container.
    pub fn apply(&mut self, op: &Operation) {
        match op {
            Operation::OpenRoom { name, public, position } => {
                let availability =
                    if *public { Availability::Public } else { Availability::InviteOnly };
                let room = Room::new(self.next_id, name.name(), name.host())
                    .with_availability(availability)
                    .with_position(i64::from(*position));
                self.next_id += 1;
                self.manager.add_room(room);
                self.ranked = false;
            },
            Operation::CloseRoom { slot } => {
                let rooms = listed_ids(&self.manager);
                if let Some(index) = wrap(*slot, rooms.len()) {
                    self.last_closed = self.manager.remove_room(rooms[index]);
                }
            },
            Operation::MoveRoom { slot, position } => {
                let rooms = listed_ids(&self.manager);
                if let Some(index) = wrap(*slot, rooms.len()) {
                    self.manager.set_positions([(rooms[index], i64::from(*position))]);
                    self.ranked = true;
                }
            },
            Operation::Search { text } => {
                self.criteria
                    .send_replace(Some(FilterCriteria::new(text.text(), SecondaryFilter::Public)));
            },
            Operation::ClearFilter => {
                self.criteria.send_replace(None);
            },
            Operation::Activate { slot } => {
                let room = slot
                    .and_then(|slot| wrap(slot, self.container.entries().len()))
                    .map(|index| Arc::clone(self.container.entries()[index].room()));
                let actions = self.container.activate(room.as_ref());
                self.record(actions);
            },
            Operation::ActivateClosed => {
                if let Some(room) = self.last_closed.clone() {
                    let actions = self.container.activate(Some(&room));
                    self.record(actions);
                }
            },
            Operation::AdvanceTime { millis } => {
                self.clock.advance_ms(u64::from(*millis));
            },
        }

        let actions = self.container.poll(self.clock.now());
        self.record(actions);
    }

    fn record(&mut self, actions: Vec<ContainerAction>) {
        for action in actions {
            match action {
                ContainerAction::JoinRequested { room } => {
                    tracing::trace!("join requested for room {room}");
                    self.joins.push(room.id());
                },
                ContainerAction::Render => {},
            }
        }
    }

    /// Observable state for comparison with the model.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState {
            view: self
                .container
                .entries()
                .iter()
                .map(|entry| (entry.room().id(), entry.matching_filter(), entry.is_selected()))
                .collect(),
            selected_slot: self.container.selected_room().map(|room| room.id()),
            joins: self.joins.clone(),
            filter_pending: self.container.pending_filter(),
        }
    }

    /// Snapshot for invariant checking.
    pub fn snapshot(&self) -> SystemSnapshot {
        SystemSnapshot::from_container(&self.container)
            .with_source(&self.manager)
            .with_ranked(self.ranked)
    }

    /// The container under test.
    pub fn container(&self) -> &RoomsContainer<SimInstant> {
        &self.container
    }

    /// Current virtual time.
    pub fn now(&self) -> SimInstant {
        self.clock.now()
    }

    /// Time since the simulation started.
    pub fn elapsed(&self) -> Duration {
        self.clock.now().since_start()
    }
}

/// Ids listed by `manager`, in listing order.
fn listed_ids(manager: &LocalRoomManager) -> Vec<RoomId> {
    manager.rooms().iter().map(|room| room.id()).collect()
}
