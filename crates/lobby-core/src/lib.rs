//! Live room list for a multiplayer lobby
//!
//! Pure state machines that keep an ordered, filterable, selectable view in
//! sync with a live collection of rooms owned by a room manager. No I/O and
//! no clock: time is passed in, so simulation tests drive the same code that
//! runs behind the terminal frontend.
//!
//! # Components
//!
//! - [`RoomsContainer`]: composition root, owns subscriptions and lifecycle
//! - [`RoomCollectionSync`]: mirrors source deltas into the ordered view
//! - [`SelectionController`]: arm-then-confirm selection
//! - [`Debouncer`]: single-slot deferred action
//! - [`filter::matches`]: the filter predicate
//! - [`RoomManager`]: boundary to whatever owns the rooms

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod container;
mod debounce;
mod entry;
mod error;
pub mod filter;
mod room;
mod selection;
mod source;
mod sync;

pub use container::{
    ContainerAction, ContainerConfig, CriteriaSource, DEFAULT_FILTER_DEBOUNCE, Lifecycle,
    RoomsContainer,
};
pub use debounce::Debouncer;
pub use entry::{RoomEntry, SelectionState};
pub use error::{ContainerError, SourceClosed};
pub use filter::{FilterCriteria, SecondaryFilter};
pub use room::{Availability, Position, Room, RoomId};
pub use selection::{SelectedRoom, SelectionController};
pub use source::{LocalRoomManager, RoomManager, RoomPublisher, RoomSourceEvent, RoomSubscription};
pub use sync::RoomCollectionSync;
