//! Room list composition root.
//!
//! [`RoomsContainer`] wires the collection sync, the selection controller and
//! the filter debouncer together and owns the subscriptions to its two
//! external inputs: the room manager and the filter criteria holder.
//!
//! It follows the crate's action pattern. Inputs are method calls carrying
//! the current time where it matters; outputs are [`ContainerAction`]s for
//! the runtime to execute. The runtime calls [`RoomsContainer::poll`]
//! regularly from one task, which drains room events, notices criteria
//! changes and fires the debounced filter pass when it is due.
//!
//! # Lifecycle
//!
//! ```text
//! ┌──────────┐  attach   ┌──────────┐  dispose  ┌──────────┐
//! │ Detached │──────────>│ Attached │──────────>│ Disposed │
//! └──────────┘<──────────└──────────┘           └──────────┘
//!               source closed
//! ```
//!
//! Disposal cancels a pending filter pass and releases both subscriptions, so
//! nothing fires against a torn-down view. Dropping the container disposes it.

use std::{
    ops::Sub,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::watch;

use crate::{
    debounce::Debouncer,
    entry::RoomEntry,
    error::ContainerError,
    filter::FilterCriteria,
    room::Room,
    selection::{SelectedRoom, SelectionController},
    source::{RoomManager, RoomSourceEvent, RoomSubscription},
    sync::RoomCollectionSync,
};

/// Quiescence required after the last criteria change before filtering.
pub const DEFAULT_FILTER_DEBOUNCE: Duration = Duration::from_millis(200);

/// Observable holder of the user's filter criteria. `None` means unfiltered.
pub type CriteriaSource = watch::Receiver<Option<FilterCriteria>>;

/// Container configuration.
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Debounce window for criteria changes.
    pub filter_debounce: Duration,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self { filter_debounce: DEFAULT_FILTER_DEBOUNCE }
    }
}

/// Actions produced by the container.
#[derive(Debug, Clone)]
pub enum ContainerAction {
    /// The view changed and should be redrawn.
    Render,

    /// The user confirmed joining a room.
    JoinRequested {
        /// Room to join.
        room: Arc<Room>,
    },
}

/// Container lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Not bound to a room source.
    Detached,
    /// Receiving room events.
    Attached,
    /// Torn down; all input is ignored.
    Disposed,
}

/// Work deferred through the debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    ApplyFilter,
}

/// Live room list controller.
///
/// Generic over `Instant` to support both real time and virtual time for
/// deterministic testing.
#[derive(Debug)]
pub struct RoomsContainer<I = Instant>
where
    I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
{
    config: ContainerConfig,
    sync: RoomCollectionSync,
    selection: SelectionController,
    debouncer: Debouncer<Deferred, I>,
    /// Room manager subscription. `None` unless attached.
    rooms: Option<RoomSubscription>,
    /// Criteria holder subscription. `None` if none was given or it closed.
    criteria_source: Option<CriteriaSource>,
    /// Latest criteria observed.
    criteria: Option<FilterCriteria>,
    lifecycle: Lifecycle,
}

impl<I> RoomsContainer<I>
where
    I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
{
    /// Create a detached container writing selections into `selected_room`.
    pub fn new(config: ContainerConfig, selected_room: SelectedRoom) -> Self {
        Self {
            config,
            sync: RoomCollectionSync::new(),
            selection: SelectionController::new(selected_room),
            debouncer: Debouncer::new(),
            rooms: None,
            criteria_source: None,
            criteria: None,
            lifecycle: Lifecycle::Detached,
        }
    }

    /// Bind to a room manager and, optionally, a criteria holder.
    ///
    /// Subscribes first, then lists the manager's current rooms as one bulk
    /// add, then runs an immediate filter pass with the holder's current
    /// value. Entries left over from an earlier, closed source are dropped
    /// and the selection is cleared.
    ///
    /// # Errors
    ///
    /// - `ContainerError::AlreadyAttached` if bound already
    /// - `ContainerError::Disposed` after [`Self::dispose`]
    pub fn attach<M>(
        &mut self,
        manager: &mut M,
        criteria: Option<CriteriaSource>,
    ) -> Result<Vec<ContainerAction>, ContainerError>
    where
        M: RoomManager + ?Sized,
    {
        match self.lifecycle {
            Lifecycle::Disposed => return Err(ContainerError::Disposed),
            Lifecycle::Attached => return Err(ContainerError::AlreadyAttached),
            Lifecycle::Detached => {},
        }

        if !self.sync.is_empty() {
            self.selection.activate(self.sync.entries_mut(), None);
            self.sync = RoomCollectionSync::new();
            tracing::debug!("stale view dropped before attaching");
        }

        self.rooms = Some(manager.subscribe());
        if let Some(mut source) = criteria {
            self.criteria = source.borrow_and_update().clone();
            self.criteria_source = Some(source);
        }

        self.sync.bind(&manager.rooms(), self.criteria.as_ref());
        self.sync.apply_filter(self.criteria.as_ref());
        self.lifecycle = Lifecycle::Attached;

        Ok(vec![ContainerAction::Render])
    }

    /// Advance the container to `now`.
    ///
    /// In order: notice a criteria change and (re)schedule the filter pass,
    /// apply pending room events in receipt order, then run the filter pass if
    /// its debounce window has elapsed. The pass reads the criteria current at
    /// that moment, so only the last of several rapid changes is applied.
    pub fn poll(&mut self, now: I) -> Vec<ContainerAction> {
        if self.lifecycle == Lifecycle::Disposed {
            return vec![];
        }

        self.poll_criteria(now);
        let mut changed = self.poll_rooms();

        if let Some(Deferred::ApplyFilter) = self.debouncer.poll(now) {
            if let Some(source) = &self.criteria_source {
                self.criteria = source.borrow().clone();
            }
            self.sync.apply_filter(self.criteria.as_ref());
            changed = true;
        }

        if changed { vec![ContainerAction::Render] } else { vec![] }
    }

    /// Schedule a filter pass if the criteria holder changed.
    fn poll_criteria(&mut self, now: I) {
        let Some(source) = &mut self.criteria_source else {
            return;
        };

        match source.has_changed() {
            Ok(true) => {
                self.criteria = source.borrow_and_update().clone();
                if self.debouncer.schedule(now, self.config.filter_debounce, Deferred::ApplyFilter)
                {
                    tracing::trace!("criteria changed again, pending filter pass superseded");
                }
            },
            Ok(false) => {},
            Err(_) => {
                tracing::warn!("criteria holder closed, keeping last criteria");
                self.criteria_source = None;
            },
        }
    }

    /// Apply every pending room event. Returns whether any was applied.
    fn poll_rooms(&mut self) -> bool {
        let Some(subscription) = &mut self.rooms else {
            return false;
        };

        let mut events = Vec::new();
        let closed = loop {
            match subscription.try_next() {
                Ok(Some(event)) => events.push(event),
                Ok(None) => break false,
                Err(err) => {
                    tracing::warn!("{err}, detaching");
                    break true;
                },
            }
        };

        let applied = !events.is_empty();
        for event in events {
            self.handle_source_event(event);
        }

        if closed {
            self.rooms = None;
            self.lifecycle = Lifecycle::Detached;
        }
        applied || closed
    }

    /// Apply a single room manager event.
    pub fn handle_source_event(&mut self, event: RoomSourceEvent) -> Vec<ContainerAction> {
        match event {
            RoomSourceEvent::Added(rooms) => self.on_added(&rooms),
            RoomSourceEvent::Removed(rooms) => self.on_removed(&rooms),
            RoomSourceEvent::Updated => self.on_updated(),
        }
    }

    /// Rooms joined the source. Applied immediately, never debounced.
    pub fn on_added(&mut self, rooms: &[Arc<Room>]) -> Vec<ContainerAction> {
        if self.ignore_when_disposed("rooms added") {
            return vec![];
        }
        self.sync.on_added(rooms, self.criteria.as_ref());
        vec![ContainerAction::Render]
    }

    /// Rooms left the source. Applied immediately, never debounced.
    pub fn on_removed(&mut self, rooms: &[Arc<Room>]) -> Vec<ContainerAction> {
        if self.ignore_when_disposed("rooms removed") {
            return vec![];
        }
        if self.sync.on_removed(rooms, &self.selection) == 0 {
            return vec![];
        }
        vec![ContainerAction::Render]
    }

    /// Positions may have changed.
    pub fn on_updated(&mut self) -> Vec<ContainerAction> {
        if self.ignore_when_disposed("rooms updated") || self.sync.is_empty() {
            return vec![];
        }
        self.sync.on_updated();
        vec![ContainerAction::Render]
    }

    /// Filter every entry with `criteria` right away, bypassing the debouncer.
    ///
    /// A pending debounced pass is left in place.
    pub fn apply_filter(&mut self, criteria: Option<FilterCriteria>) -> Vec<ContainerAction> {
        if self.ignore_when_disposed("filter") {
            return vec![];
        }
        self.criteria = criteria;
        self.sync.apply_filter(self.criteria.as_ref());
        vec![ContainerAction::Render]
    }

    /// The user interacted with `room` (`None` clears the selection).
    ///
    /// The first activation arms the room; activating the armed room again
    /// yields [`ContainerAction::JoinRequested`].
    pub fn activate(&mut self, room: Option<&Arc<Room>>) -> Vec<ContainerAction> {
        if self.ignore_when_disposed("activation") {
            return vec![];
        }

        match self.selection.activate(self.sync.entries_mut(), room) {
            Some(room) => vec![ContainerAction::JoinRequested { room }, ContainerAction::Render],
            None => vec![ContainerAction::Render],
        }
    }

    /// Tear down: cancel pending work, unsubscribe and drop the view.
    ///
    /// Idempotent.
    pub fn dispose(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }

        if self.debouncer.cancel() {
            tracing::debug!("pending filter pass cancelled by disposal");
        }
        self.rooms = None;
        self.criteria_source = None;
        self.sync = RoomCollectionSync::new();
        self.lifecycle = Lifecycle::Disposed;
        tracing::debug!("rooms container disposed");
    }

    fn ignore_when_disposed(&self, input: &str) -> bool {
        let disposed = self.lifecycle == Lifecycle::Disposed;
        if disposed {
            tracing::warn!("ignoring {input} after disposal");
        }
        disposed
    }

    /// Configuration.
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether bound to a room source.
    pub fn is_attached(&self) -> bool {
        self.lifecycle == Lifecycle::Attached
    }

    /// Whether disposed.
    pub fn is_disposed(&self) -> bool {
        self.lifecycle == Lifecycle::Disposed
    }

    /// All entries in view order.
    pub fn entries(&self) -> &[RoomEntry] {
        self.sync.entries()
    }

    /// Entries passing the filter, in view order.
    pub fn visible(&self) -> impl Iterator<Item = &RoomEntry> {
        self.sync.visible()
    }

    /// Latest criteria observed. `None` if unfiltered.
    pub fn criteria(&self) -> Option<&FilterCriteria> {
        self.criteria.as_ref()
    }

    /// The armed entry.
    pub fn selected(&self) -> Option<&RoomEntry> {
        self.selection.selected(self.sync.entries())
    }

    /// Current value of the selected-room slot.
    pub fn selected_room(&self) -> Option<Arc<Room>> {
        self.selection.selected_room()
    }

    /// Whether a debounced filter pass is waiting.
    pub fn pending_filter(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Time until the pending filter pass is due. `None` if nothing pending.
    pub fn filter_due_in(&self, now: I) -> Option<Duration> {
        self.debouncer.remaining(now)
    }
}

impl<I> Drop for RoomsContainer<I>
where
    I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
{
    fn drop(&mut self) {
        self.dispose();
    }
}
