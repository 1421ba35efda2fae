//! Model-based testing support.
//!
//! [`ModelLobby`] is a reference implementation of the room list. Random
//! [`Operation`] sequences are applied to it and to a [`crate::SimLobby`]
//! wrapping the real container; their [`ObservableState`]s must agree after
//! every step.

mod operation;
mod world;

pub(crate) use operation::wrap;
pub use operation::{NameSeed, Operation, SearchSeed};
pub use world::{ModelLobby, ObservableState};
