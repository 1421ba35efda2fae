//! Operations for model-based testing.
//!
//! Operations represent everything that can happen to a room list: the room
//! source churning, the user typing and clicking, time passing. They are
//! generated randomly by proptest or the fuzzer and applied to both the model
//! and the real implementation.

use arbitrary::Arbitrary;

/// Room names drawn by [`NameSeed`].
const NAMES: [&str; 8] = ["alpha", "beta", "gamma", "delta", "omega", "Lobby", "chill", "farm"];

/// Hosts drawn by [`NameSeed`].
const HOSTS: [&str; 3] = ["ann", "bo", "cy"];

/// Search strings drawn by [`SearchSeed`].
const SEARCHES: [&str; 8] = ["", "a", "al", "GA", "chill", "bo", "zz", "ta"];

/// Operations that can be applied to the system.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// The source lists a new room.
    OpenRoom {
        /// Name and host.
        name: NameSeed,
        /// Listed for everyone, otherwise invite only.
        public: bool,
        /// Initial position.
        position: i8,
    },

    /// The source withdraws a room.
    CloseRoom {
        /// Index into the source's rooms, modulo their number.
        slot: u8,
    },

    /// The source moves a room and signals an update.
    MoveRoom {
        /// Index into the source's rooms, modulo their number.
        slot: u8,
        /// New position.
        position: i8,
    },

    /// The user edits the search string. The public filter stays on.
    Search {
        /// Text searched for.
        text: SearchSeed,
    },

    /// The user turns filtering off.
    ClearFilter,

    /// The user activates an entry, or clears the selection with `None`.
    Activate {
        /// Index into the view, modulo its length.
        slot: Option<u8>,
    },

    /// The user activates the most recently closed room.
    ActivateClosed,

    /// Advance simulation time.
    AdvanceTime {
        /// Milliseconds to advance.
        millis: u16,
    },
}

/// Compact room name for generated rooms.
#[derive(Debug, Clone, Copy, Arbitrary)]
pub struct NameSeed(pub u8);

impl NameSeed {
    /// Room name.
    pub fn name(self) -> &'static str {
        NAMES[usize::from(self.0) % NAMES.len()]
    }

    /// Room host.
    pub fn host(self) -> &'static str {
        HOSTS[usize::from(self.0) % HOSTS.len()]
    }
}

/// Compact search string.
#[derive(Debug, Clone, Copy, Arbitrary)]
pub struct SearchSeed(pub u8);

impl SearchSeed {
    /// Search text.
    pub fn text(self) -> &'static str {
        SEARCHES[usize::from(self.0) % SEARCHES.len()]
    }
}

/// Index `slot` modulo `len`. `None` when `len` is zero.
pub(crate) fn wrap(slot: u8, len: usize) -> Option<usize> {
    (len > 0).then(|| usize::from(slot) % len)
}
