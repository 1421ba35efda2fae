//! Terminal lobby browser
//!
//! A demo shell around [`lobby_core::RoomsContainer`]: a simulated lobby
//! opens, closes and reorders rooms while the user searches, filters and
//! joins from the keyboard.
//!
//! [`app::LobbyApp`] is the pure screen state machine, [`runtime::Runtime`]
//! owns the terminal and [`ui`] draws.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod app;
pub mod feed;
pub mod input;
pub mod runtime;
pub mod ui;

pub use app::{AppAction, AppEvent, LobbyApp};
pub use feed::LobbyFeed;
pub use input::{Edit, InputState, KeyInput};
pub use runtime::{Runtime, RuntimeConfig, RuntimeError};
