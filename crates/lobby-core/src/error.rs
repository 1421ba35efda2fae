//! Error types for the room list controller.
//!
//! The controller works on locally consistent data, so very little can fail:
//! stale or duplicate signals from the room source are ignored rather than
//! reported. What remains are lifecycle misuses and a vanished source.

use thiserror::Error;

/// Errors from [`crate::RoomsContainer`] lifecycle operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    /// The container is already bound to a room source.
    #[error("container is already attached to a room source")]
    AlreadyAttached,

    /// The container was disposed and accepts no further input.
    #[error("container has been disposed")]
    Disposed,
}

/// The room manager behind a subscription has gone away.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("room source closed")]
pub struct SourceClosed;
