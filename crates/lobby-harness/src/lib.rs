//! Deterministic simulation harness for the lobby room list.
//!
//! Virtual time, snapshots and a reference model so that the real
//! [`lobby_core::RoomsContainer`] can be driven through long random histories
//! reproducibly.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation for model-based
//! testing. Operations are applied to both the model and a [`SimLobby`], and
//! their observable states are compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the room list
//! invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod clock;
pub mod invariants;
pub mod model;
pub mod sim_lobby;

pub use clock::{SimClock, SimInstant};
pub use invariants::{
    EntrySnapshot, FilterConsistency, Invariant, InvariantRegistry, InvariantResult, RankOrder,
    SelectionSlotConsistency, SingleSelection, SystemSnapshot, ViewMatchesSource, Violation,
};
pub use model::{ModelLobby, NameSeed, ObservableState, Operation, SearchSeed};
pub use sim_lobby::SimLobby;
