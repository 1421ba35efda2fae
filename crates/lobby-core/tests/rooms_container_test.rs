//! Scenario tests for the rooms container.
//!
//! Drives a container attached to an in-memory room manager on virtual time
//! and checks the standard invariants after every step.

use std::{sync::Arc, time::Duration};

use lobby_core::{
    Availability, ContainerAction, ContainerConfig, FilterCriteria, LocalRoomManager, Room,
    RoomsContainer, SecondaryFilter,
};
use lobby_harness::{InvariantRegistry, SimClock, SimInstant, SystemSnapshot};
use tokio::sync::watch;

struct Lobby {
    clock: SimClock,
    manager: LocalRoomManager,
    criteria: watch::Sender<Option<FilterCriteria>>,
    container: RoomsContainer<SimInstant>,
    invariants: InvariantRegistry,
}

impl Lobby {
    fn new() -> Self {
        Self::with_rooms(Vec::new())
    }

    fn with_rooms(rooms: Vec<Room>) -> Self {
        let mut manager = LocalRoomManager::new();
        manager.add_rooms(rooms);
        let criteria = watch::Sender::new(None);
        let mut container: RoomsContainer<SimInstant> =
            RoomsContainer::new(ContainerConfig::default(), watch::Sender::new(None));
        container.attach(&mut manager, Some(criteria.subscribe())).unwrap();

        Self {
            clock: SimClock::new(),
            manager,
            criteria,
            container,
            invariants: InvariantRegistry::standard(),
        }
    }

    fn search(&mut self, text: &str) {
        self.criteria.send_replace(Some(FilterCriteria::new(text, SecondaryFilter::Public)));
    }

    fn poll(&mut self) -> Vec<ContainerAction> {
        let actions = self.container.poll(self.clock.now());
        self.check("after poll");
        actions
    }

    fn advance(&mut self, millis: u64) -> Vec<ContainerAction> {
        self.clock.advance_ms(millis);
        self.poll()
    }

    fn activate(&mut self, room: Option<&Arc<Room>>) -> Vec<ContainerAction> {
        let actions = self.container.activate(room);
        self.check("after activate");
        actions
    }

    fn check(&self, context: &str) {
        let snapshot = SystemSnapshot::from_container(&self.container).with_source(&self.manager);
        self.invariants.assert_all(&snapshot, context);
    }

    fn room(&self, id: u64) -> Arc<Room> {
        Arc::clone(self.manager.room(id).unwrap())
    }

    fn visible_ids(&self) -> Vec<u64> {
        self.container.visible().map(|entry| entry.room().id()).collect()
    }

    fn ids(&self) -> Vec<u64> {
        self.container.entries().iter().map(|entry| entry.room().id()).collect()
    }
}

fn joined(actions: &[ContainerAction]) -> Option<u64> {
    actions.iter().find_map(|action| match action {
        ContainerAction::JoinRequested { room } => Some(room.id()),
        ContainerAction::Render => None,
    })
}

fn room(id: u64, name: &str) -> Room {
    Room::new(id, name, "host")
}

#[test]
fn confirm_on_repeat_requests_join_once_per_repeat() {
    let mut lobby = Lobby::with_rooms(vec![room(1, "a"), room(2, "b")]);
    let a = lobby.room(1);

    assert_eq!(joined(&lobby.activate(Some(&a))), None);
    assert_eq!(joined(&lobby.activate(Some(&a))), Some(1));
    assert!(lobby.container.selected().is_some_and(|entry| entry.is_for(&a)));
    assert!(lobby.container.selected_room().is_some_and(|room| Room::same(&room, &a)));

    // Still armed, so every further activation joins again.
    assert_eq!(joined(&lobby.activate(Some(&a))), Some(1));
}

#[test]
fn arm_then_switch_never_joins() {
    let mut lobby = Lobby::with_rooms(vec![room(1, "a"), room(2, "b")]);
    let a = lobby.room(1);
    let b = lobby.room(2);

    assert_eq!(joined(&lobby.activate(Some(&a))), None);
    assert_eq!(joined(&lobby.activate(Some(&b))), None);

    let selected: Vec<_> =
        lobby.container.entries().iter().map(|entry| entry.is_selected()).collect();
    assert_eq!(selected, [false, true]);
    assert!(lobby.container.selected_room().is_some_and(|room| Room::same(&room, &b)));
}

#[test]
fn activating_nothing_clears_selection() {
    let mut lobby = Lobby::with_rooms(vec![room(1, "a")]);
    let a = lobby.room(1);

    lobby.activate(Some(&a));
    assert_eq!(joined(&lobby.activate(None)), None);
    assert!(lobby.container.selected().is_none());
    assert!(lobby.container.selected_room().is_none());
}

#[test]
fn debounce_coalesces_to_last_criteria() {
    let mut lobby = Lobby::with_rooms(vec![room(1, "alpha"), room(2, "beta"), room(3, "gamma")]);

    lobby.search("alpha");
    lobby.poll();
    lobby.advance(60);
    lobby.search("beta");
    lobby.poll();
    lobby.advance(60);
    lobby.search("gamma");
    lobby.poll();

    // Within the window of the last change: nothing applied.
    assert!(lobby.advance(199).is_empty());
    assert_eq!(lobby.visible_ids(), [1, 2, 3]);
    assert!(lobby.container.pending_filter());
    assert_eq!(lobby.container.filter_due_in(lobby.clock.now()), Some(Duration::from_millis(1)));

    // One pass, with the last criteria.
    assert!(!lobby.advance(1).is_empty());
    assert_eq!(lobby.visible_ids(), [3]);
    assert!(!lobby.container.pending_filter());

    // No second pass.
    assert!(lobby.advance(500).is_empty());
    assert_eq!(lobby.visible_ids(), [3]);
}

#[test]
fn late_join_is_filtered_immediately() {
    let mut lobby = Lobby::with_rooms(vec![room(1, "farm"), room(2, "chill")]);
    lobby.search("farm");
    lobby.poll();
    lobby.advance(200);
    assert_eq!(lobby.visible_ids(), [1]);

    lobby.manager.add_room(room(3, "chill 2"));
    lobby.manager.add_room(room(4, "Farm again"));
    lobby.poll();

    assert_eq!(lobby.ids(), [1, 2, 3, 4]);
    assert_eq!(lobby.visible_ids(), [1, 4]);
    assert!(!lobby.container.pending_filter());
}

#[test]
fn removal_clears_stale_selection() {
    let mut lobby = Lobby::with_rooms(vec![room(1, "a"), room(2, "b")]);
    let a = lobby.room(1);
    lobby.activate(Some(&a));

    lobby.manager.remove_room(1);
    lobby.poll();

    assert_eq!(lobby.ids(), [2]);
    assert!(lobby.container.selected().is_none());
    assert!(lobby.container.selected_room().is_none());
}

#[test]
fn reorder_follows_positions_and_is_idempotent() {
    let mut lobby = Lobby::with_rooms(vec![
        room(1, "a").with_position(3),
        room(2, "b").with_position(1),
        room(3, "c").with_position(2),
    ]);

    lobby.manager.notify_updated();
    lobby.poll();
    assert_eq!(lobby.ids(), [2, 3, 1]);

    lobby.manager.notify_updated();
    lobby.manager.notify_updated();
    lobby.poll();
    assert_eq!(lobby.ids(), [2, 3, 1]);

    lobby.manager.set_positions([(1, 0)]);
    lobby.poll();
    assert_eq!(lobby.ids(), [1, 2, 3]);
}

#[test]
fn empty_search_with_public_filter_shows_public_rooms() {
    let mut lobby = Lobby::with_rooms(vec![
        room(1, "open"),
        room(2, "friends").with_availability(Availability::FriendsOnly),
        room(3, "secret").with_availability(Availability::InviteOnly),
        room(4, "untagged").with_filter_terms(Vec::<String>::new()),
    ]);

    lobby.search("");
    lobby.poll();
    lobby.advance(200);

    assert_eq!(lobby.visible_ids(), [1, 4]);
}

#[test]
fn unknown_removal_and_duplicate_add_are_ignored() {
    let mut lobby = Lobby::with_rooms(vec![room(1, "a")]);
    let a = lobby.room(1);
    let ghost = room(9, "ghost").into_shared();

    assert!(lobby.container.on_removed(&[ghost]).is_empty());
    lobby.container.on_added(&[Arc::clone(&a)]);

    assert_eq!(lobby.ids(), [1]);
    lobby.check("after ignored input");
}

#[test]
fn disposal_cancels_pending_pass_and_unsubscribes() {
    let mut lobby = Lobby::with_rooms(vec![room(1, "a")]);
    lobby.search("zzz");
    lobby.poll();
    assert!(lobby.container.pending_filter());
    assert_eq!(lobby.manager.subscriber_count(), 1);

    lobby.container.dispose();
    assert!(lobby.container.is_disposed());
    assert!(!lobby.container.pending_filter());

    lobby.clock.advance_ms(1_000);
    assert!(lobby.container.poll(lobby.clock.now()).is_empty());

    lobby.manager.add_room(room(2, "b"));
    assert_eq!(lobby.manager.subscriber_count(), 0);
    assert!(lobby.container.entries().is_empty());
}

#[test]
fn dropping_container_unsubscribes() {
    let Lobby { mut manager, container, .. } = Lobby::new();
    assert_eq!(manager.subscriber_count(), 1);

    drop(container);
    manager.notify_updated();
    assert_eq!(manager.subscriber_count(), 0);
}

#[test]
fn clearing_criteria_shows_everything_after_debounce() {
    let mut lobby =
        Lobby::with_rooms(vec![room(1, "a").with_availability(Availability::InviteOnly)]);
    lobby.search("");
    lobby.poll();
    lobby.advance(200);
    assert!(lobby.visible_ids().is_empty());

    lobby.criteria.send_replace(None);
    lobby.poll();
    lobby.advance(200);
    assert_eq!(lobby.visible_ids(), [1]);
    assert!(lobby.container.criteria().is_none());
}
