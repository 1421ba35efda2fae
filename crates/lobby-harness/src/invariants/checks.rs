//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use std::collections::HashSet;

use super::{Invariant, InvariantResult, SystemSnapshot, Violation};

/// At most one entry is armed.
pub struct SingleSelection;

impl Invariant for SingleSelection {
    fn name(&self) -> &'static str {
        "single_selection"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let selected: Vec<_> =
            state.entries.iter().filter(|entry| entry.selected).map(|entry| entry.room_id).collect();

        if selected.len() > 1 {
            return Err(Violation {
                invariant: self.name(),
                message: format!("{} entries selected: {selected:?}", selected.len()),
            });
        }
        Ok(())
    }
}

/// An armed entry's room is the one in the selected-room slot.
///
/// The converse does not hold: the slot may name a room that is not in the
/// view.
pub struct SelectionSlotConsistency;

impl Invariant for SelectionSlotConsistency {
    fn name(&self) -> &'static str {
        "selection_slot_consistency"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(armed) = state.entries.iter().find(|entry| entry.selected) else {
            return Ok(());
        };

        if state.selected_room != Some(armed.room_id) {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "room {} is armed but the slot holds {:?}",
                    armed.room_id, state.selected_room
                ),
            });
        }
        Ok(())
    }
}

/// Exactly one entry per source room and none for rooms the source dropped.
///
/// Skipped when the snapshot carries no source membership.
pub struct ViewMatchesSource;

impl Invariant for ViewMatchesSource {
    fn name(&self) -> &'static str {
        "view_matches_source"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let mut seen = HashSet::new();
        for entry in &state.entries {
            if !seen.insert(entry.room_id) {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("room {} has more than one entry", entry.room_id),
                });
            }
        }

        let Some(source) = &state.source_rooms else {
            return Ok(());
        };
        let source: HashSet<_> = source.iter().copied().collect();

        if seen != source {
            let mut missing: Vec<_> = source.difference(&seen).copied().collect();
            let mut stale: Vec<_> = seen.difference(&source).copied().collect();
            missing.sort_unstable();
            stale.sort_unstable();
            return Err(Violation {
                invariant: self.name(),
                message: format!("view is missing {missing:?} and holds stale {stale:?}"),
            });
        }
        Ok(())
    }
}

/// Once no filter pass is pending, every filter flag agrees with the criteria.
pub struct FilterConsistency;

impl Invariant for FilterConsistency {
    fn name(&self) -> &'static str {
        "filter_consistency"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        if !state.filter_settled {
            return Ok(());
        }

        for entry in &state.entries {
            if entry.matching_filter != entry.expected_match {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "room {} flagged {} under {:?}",
                        entry.room_id, entry.matching_filter, state.criteria
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Right after an update signal, entries are in non-decreasing rank order.
pub struct RankOrder;

impl Invariant for RankOrder {
    fn name(&self) -> &'static str {
        "rank_order"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        if !state.ranked {
            return Ok(());
        }

        for pair in state.entries.windows(2) {
            if pair[1].rank < pair[0].rank {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "room {} (rank {}) listed before room {} (rank {})",
                        pair[0].room_id, pair[0].rank, pair[1].room_id, pair[1].rank
                    ),
                });
            }
        }
        Ok(())
    }
}
