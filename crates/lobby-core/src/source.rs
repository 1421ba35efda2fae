//! Room manager boundary.
//!
//! The room manager owns the live room collection. It publishes membership
//! deltas and "positions may have changed" signals to every subscriber, in
//! the order they happen. Subscriptions are owning handles: dropping one
//! unsubscribes, and the manager forgets closed subscribers the next time it
//! publishes.
//!
//! [`LocalRoomManager`] is an in-memory manager for simulation, tests and the
//! demo frontend. Remote-backed managers implement [`RoomManager`] on top of
//! a [`RoomPublisher`].

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::{
    error::SourceClosed,
    room::{Position, Room, RoomId},
};

/// Change notification from the room manager.
#[derive(Debug, Clone)]
pub enum RoomSourceEvent {
    /// Rooms joined the collection.
    Added(Vec<Arc<Room>>),
    /// Rooms left the collection.
    Removed(Vec<Arc<Room>>),
    /// Room positions may have changed.
    Updated,
}

/// Source of the live room collection.
pub trait RoomManager {
    /// Current membership.
    fn rooms(&self) -> Vec<Arc<Room>>;

    /// Subscribe to changes published after this call.
    fn subscribe(&mut self) -> RoomSubscription;
}

/// Receiving half of a room manager subscription.
#[derive(Debug)]
pub struct RoomSubscription {
    rx: mpsc::UnboundedReceiver<RoomSourceEvent>,
}

impl RoomSubscription {
    /// Take the next pending event without waiting.
    ///
    /// `Ok(None)` when nothing is pending.
    ///
    /// # Errors
    ///
    /// - [`SourceClosed`] once the manager is gone and the backlog is drained.
    pub fn try_next(&mut self) -> Result<Option<RoomSourceEvent>, SourceClosed> {
        match self.rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(SourceClosed),
        }
    }

    /// Wait for the next event. `None` once the manager is gone.
    pub async fn recv(&mut self) -> Option<RoomSourceEvent> {
        self.rx.recv().await
    }
}

/// Fan-out of room events to subscribers.
#[derive(Debug, Default)]
pub struct RoomPublisher {
    subscribers: Vec<mpsc::UnboundedSender<RoomSourceEvent>>,
}

impl RoomPublisher {
    /// Create a publisher with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&mut self) -> RoomSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        RoomSubscription { rx }
    }

    /// Deliver `event` to every live subscriber and forget the closed ones.
    pub fn publish(&mut self, event: &RoomSourceEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Subscribers still listening.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|tx| !tx.is_closed()).count()
    }
}

/// In-memory room manager.
#[derive(Debug, Default)]
pub struct LocalRoomManager {
    rooms: Vec<Arc<Room>>,
    publisher: RoomPublisher,
}

impl LocalRoomManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a single room.
    pub fn add_room(&mut self, room: Room) -> Arc<Room> {
        let room = room.into_shared();
        self.rooms.push(Arc::clone(&room));
        self.publisher.publish(&RoomSourceEvent::Added(vec![Arc::clone(&room)]));
        room
    }

    /// Publish several rooms as one delta.
    pub fn add_rooms(&mut self, rooms: impl IntoIterator<Item = Room>) -> Vec<Arc<Room>> {
        let added: Vec<_> = rooms.into_iter().map(Room::into_shared).collect();
        if added.is_empty() {
            return added;
        }

        self.rooms.extend(added.iter().cloned());
        self.publisher.publish(&RoomSourceEvent::Added(added.clone()));
        added
    }

    /// Withdraw the room with `id`. `None` if it is not listed.
    pub fn remove_room(&mut self, id: RoomId) -> Option<Arc<Room>> {
        let index = self.rooms.iter().position(|room| room.id() == id)?;
        let room = self.rooms.remove(index);
        self.publisher.publish(&RoomSourceEvent::Removed(vec![Arc::clone(&room)]));
        Some(room)
    }

    /// Rewrite positions, then signal an update.
    ///
    /// Unknown ids are skipped.
    pub fn set_positions(&mut self, positions: impl IntoIterator<Item = (RoomId, Position)>) {
        for (id, position) in positions {
            if let Some(room) = self.room(id) {
                room.set_position(position);
            }
        }
        self.notify_updated();
    }

    /// Signal that positions may have changed.
    pub fn notify_updated(&mut self) {
        self.publisher.publish(&RoomSourceEvent::Updated);
    }

    /// Listed room with `id`.
    pub fn room(&self, id: RoomId) -> Option<&Arc<Room>> {
        self.rooms.iter().find(|room| room.id() == id)
    }

    /// Number of listed rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether no room is listed.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Subscribers still listening.
    pub fn subscriber_count(&self) -> usize {
        self.publisher.subscriber_count()
    }
}

impl RoomManager for LocalRoomManager {
    fn rooms(&self) -> Vec<Arc<Room>> {
        self.rooms.clone()
    }

    fn subscribe(&mut self) -> RoomSubscription {
        self.publisher.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_see_deltas_in_order() {
        let mut manager = LocalRoomManager::new();
        let mut sub = manager.subscribe();

        let a = manager.add_room(Room::new(1, "a", "h"));
        manager.set_positions([(1, 5)]);
        manager.remove_room(1);

        assert!(matches!(sub.try_next(), Ok(Some(RoomSourceEvent::Added(rooms))) if Room::same(&rooms[0], &a)));
        assert!(matches!(sub.try_next(), Ok(Some(RoomSourceEvent::Updated))));
        assert!(matches!(sub.try_next(), Ok(Some(RoomSourceEvent::Removed(rooms))) if Room::same(&rooms[0], &a)));
        assert!(matches!(sub.try_next(), Ok(None)));
        assert_eq!(a.position(), 5);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let mut manager = LocalRoomManager::new();
        let sub = manager.subscribe();
        assert_eq!(manager.subscriber_count(), 1);

        drop(sub);
        manager.notify_updated();
        assert_eq!(manager.subscriber_count(), 0);
    }

    #[test]
    fn closed_manager_reports_after_backlog() {
        let mut manager = LocalRoomManager::new();
        let mut sub = manager.subscribe();
        manager.notify_updated();
        drop(manager);

        assert!(matches!(sub.try_next(), Ok(Some(RoomSourceEvent::Updated))));
        assert_eq!(sub.try_next().err(), Some(SourceClosed));
    }

    #[test]
    fn removing_unknown_room_publishes_nothing() {
        let mut manager = LocalRoomManager::new();
        let mut sub = manager.subscribe();

        assert!(manager.remove_room(42).is_none());
        assert!(matches!(sub.try_next(), Ok(None)));
    }
}
