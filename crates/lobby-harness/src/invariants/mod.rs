//! Room list invariants.
//!
//! A [`SystemSnapshot`] freezes what a container shows (its entries, the
//! selected-room slot, the criteria last applied) next to what its room
//! source holds. Each [`Invariant`] inspects one such snapshot. The model
//! tests, the scenario tests and the fuzz target all run
//! [`InvariantRegistry::standard`] after every step, so a broken rule is
//! reported at the operation that broke it.
//!
//! ```ignore
//! let snapshot = SystemSnapshot::from_container(&container).with_source(&manager);
//! InvariantRegistry::standard().assert_all(&snapshot, "after removal");
//! ```

mod checks;
mod snapshot;

pub use checks::{
    FilterConsistency, RankOrder, SelectionSlotConsistency, SingleSelection, ViewMatchesSource,
};
pub use snapshot::{EntrySnapshot, SystemSnapshot};

/// Outcome of one check.
pub type InvariantResult = Result<(), Violation>;

/// A broken rule, named after the check that found it.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Check that failed.
    pub invariant: &'static str,
    /// Offending entries or slot contents.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// A rule every room list snapshot obeys.
pub trait Invariant: Send + Sync {
    /// Short name used in violation reports.
    fn name(&self) -> &'static str;

    /// Inspect `state`. Checks that need the source or a settled filter
    /// pass when the snapshot lacks them.
    fn check(&self, state: &SystemSnapshot) -> InvariantResult;
}

/// Ordered set of checks run together.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// No checks.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// The five room list checks: [`SingleSelection`],
    /// [`SelectionSlotConsistency`], [`ViewMatchesSource`],
    /// [`FilterConsistency`] and [`RankOrder`].
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(SingleSelection);
        registry.add(SelectionSlotConsistency);
        registry.add(ViewMatchesSource);
        registry.add(FilterConsistency);
        registry.add(RankOrder);
        registry
    }

    /// Append a check.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Run every check, collecting all violations rather than stopping at
    /// the first.
    pub fn check_all(&self, state: &SystemSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Run every check and panic listing each violation, prefixed by
    /// `context` (usually the operation just applied).
    #[allow(clippy::panic)]
    pub fn assert_all(&self, state: &SystemSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("room list broken {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Names of the registered checks, in run order.
    pub fn names(&self) -> Vec<&'static str> {
        self.invariants.iter().map(|inv| inv.name()).collect()
    }

    /// Number of checks.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Whether no check is registered.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_runs_selection_checks_first() {
        let registry = InvariantRegistry::standard();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.names()[..2], ["single_selection", "selection_slot_consistency"]);
    }

    #[test]
    fn empty_snapshot_passes_invariants() {
        let registry = InvariantRegistry::standard();
        let snapshot = SystemSnapshot::empty();
        assert!(registry.check_all(&snapshot).is_ok());
    }
}
