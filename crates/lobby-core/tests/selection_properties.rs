//! Property-based tests for selection and debouncing.
//!
//! Tests verify that invariants hold under arbitrary input sequences.

use std::{sync::Arc, time::Duration};

use lobby_core::{
    ContainerAction, ContainerConfig, Debouncer, LocalRoomManager, Room, RoomsContainer,
};
use lobby_harness::{InvariantRegistry, SimInstant, SystemSnapshot};
use proptest::prelude::*;
use tokio::sync::watch;

/// User input against a fixed set of rooms.
#[derive(Debug, Clone)]
enum Input {
    /// Activate the room at this index, or a room outside the view.
    Activate(Option<usize>),
    /// Clear the selection.
    Clear,
    /// The source withdraws the room at this index.
    Remove(usize),
}

fn input_strategy(rooms: usize) -> impl Strategy<Value = Input> {
    prop_oneof![
        6 => prop::option::weighted(0.8, 0..rooms).prop_map(Input::Activate),
        1 => Just(Input::Clear),
        1 => (0..rooms).prop_map(Input::Remove),
    ]
}

proptest! {
    #[test]
    fn prop_at_most_one_entry_selected(inputs in prop::collection::vec(input_strategy(6), 0..60)) {
        let mut manager = LocalRoomManager::new();
        let rooms = manager.add_rooms((0..6).map(|id| Room::new(id, format!("room {id}"), "host")));
        let stranger = Room::new(99, "elsewhere", "host").into_shared();

        let mut container: RoomsContainer<SimInstant> =
            RoomsContainer::new(ContainerConfig::default(), watch::Sender::new(None));
        container.attach(&mut manager, None).unwrap();
        let invariants = InvariantRegistry::standard();

        for input in &inputs {
            let actions = match input {
                Input::Activate(Some(index)) => container.activate(Some(&rooms[*index])),
                Input::Activate(None) => container.activate(Some(&stranger)),
                Input::Clear => container.activate(None),
                Input::Remove(index) => {
                    manager.remove_room(rooms[*index].id());
                    container.poll(SimInstant::ZERO)
                },
            };

            // A join is only ever requested for the armed room.
            for action in &actions {
                if let ContainerAction::JoinRequested { room } = action {
                    prop_assert!(container.selected().is_some_and(|entry| entry.is_for(room)));
                }
            }

            let snapshot = SystemSnapshot::from_container(&container).with_source(&manager);
            prop_assert!(invariants.check_all(&snapshot).is_ok(), "after {:?}", input);
        }
    }

    #[test]
    fn prop_debounce_fires_once_with_last_action(
        gaps in prop::collection::vec(0u64..200, 1..20),
        tail in 0u64..400,
    ) {
        let delay = Duration::from_millis(200);
        let mut debouncer = Debouncer::new();
        let mut now = SimInstant::ZERO;
        let mut fired = Vec::new();

        for (i, gap) in gaps.iter().enumerate() {
            now = now.after(Duration::from_millis(*gap));
            fired.extend(debouncer.poll(now));
            debouncer.schedule(now, delay, i);
        }

        // Every gap is shorter than the window, so nothing fired yet.
        prop_assert!(fired.is_empty());

        now = now.after(Duration::from_millis(tail));
        fired.extend(debouncer.poll(now));
        fired.extend(debouncer.poll(now));

        if tail >= 200 {
            prop_assert_eq!(fired, vec![gaps.len() - 1]);
        } else {
            prop_assert!(fired.is_empty());
            prop_assert!(debouncer.is_pending());
        }
    }
}

#[test]
fn stranger_activation_disarms_but_fills_slot() {
    let mut manager = LocalRoomManager::new();
    let a = manager.add_room(Room::new(1, "a", "host"));
    let stranger = Arc::new(Room::new(2, "b", "host"));

    let mut container: RoomsContainer<SimInstant> =
        RoomsContainer::new(ContainerConfig::default(), watch::Sender::new(None));
    container.attach(&mut manager, None).unwrap();

    container.activate(Some(&a));
    let actions = container.activate(Some(&stranger));

    assert!(actions.iter().all(|action| matches!(action, ContainerAction::Render)));
    assert!(container.selected().is_none());
    assert!(container.selected_room().is_some_and(|room| Room::same(&room, &stranger)));
}
