//! Remote room records.
//!
//! A [`Room`] is owned by the room manager and shared with the view through
//! [`Arc`]. Identity is the allocation, not the value: two handles denote the
//! same room iff [`Room::same`] holds. [`RoomId`] is carried for logging and
//! display only.
//!
//! Every field is fixed at publication except the position, which the room
//! manager rewrites before signalling an update. The view only ever reads it.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
};

/// Server-assigned room identifier.
pub type RoomId = u64;

/// Server-assigned ordinal defining the canonical display order.
///
/// Opaque ordering key: negative values are valid.
pub type Position = i64;

/// Who may see and enter a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Availability {
    /// Listed for everyone.
    #[default]
    Public,
    /// Listed for friends of the host.
    FriendsOnly,
    /// Reachable by invitation only.
    InviteOnly,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Public => "public",
            Self::FriendsOnly => "friends",
            Self::InviteOnly => "invite",
        };
        f.write_str(label)
    }
}

/// A multiplayer room as published by the room manager.
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    name: String,
    host: String,
    availability: Availability,
    filter_terms: Vec<String>,
    position: AtomicI64,
}

impl Room {
    /// Create a public room at position 0.
    ///
    /// Filter terms default to the room name followed by the host name.
    pub fn new(id: RoomId, name: impl Into<String>, host: impl Into<String>) -> Self {
        let name = name.into();
        let host = host.into();
        let filter_terms = vec![name.clone(), host.clone()];
        Self {
            id,
            name,
            host,
            availability: Availability::Public,
            filter_terms,
            position: AtomicI64::new(0),
        }
    }

    /// Set the availability.
    #[must_use]
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Set the initial position.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        *self.position.get_mut() = position;
        self
    }

    /// Replace the filter terms.
    #[must_use]
    pub fn with_filter_terms<T>(mut self, terms: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<String>,
    {
        self.filter_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Wrap in a shared handle. The returned allocation is the room's identity.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Server-assigned identifier.
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host display name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Visibility attribute.
    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// Strings searched by the text filter, in order.
    pub fn filter_terms(&self) -> &[String] {
        &self.filter_terms
    }

    /// Current authoritative position.
    pub fn position(&self) -> Position {
        self.position.load(Ordering::Relaxed)
    }

    /// Rewrite the position. Room manager use only.
    ///
    /// The view does not observe the new value until the manager signals an
    /// update.
    pub fn set_position(&self, position: Position) {
        self.position.store(position, Ordering::Relaxed);
    }

    /// Whether two handles denote the same room.
    pub fn same(a: &Arc<Self>, b: &Arc<Self>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {:?}", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_the_allocation() {
        let a = Room::new(1, "lobby", "peppy").into_shared();
        let b = Room::new(1, "lobby", "peppy").into_shared();

        assert!(Room::same(&a, &Arc::clone(&a)));
        assert!(!Room::same(&a, &b));
    }

    #[test]
    fn default_terms_are_name_then_host() {
        let room = Room::new(7, "Tag Coop", "cookiezi");
        assert_eq!(room.filter_terms(), ["Tag Coop", "cookiezi"]);

        let room = room.with_filter_terms(["only"]);
        assert_eq!(room.filter_terms(), ["only"]);
    }

    #[test]
    fn position_is_shared_through_handles() {
        let room = Room::new(3, "r", "h").with_position(-4).into_shared();
        let view = Arc::clone(&room);
        assert_eq!(view.position(), -4);

        room.set_position(12);
        assert_eq!(view.position(), 12);
    }
}
