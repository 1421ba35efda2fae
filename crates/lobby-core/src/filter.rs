//! Room filtering.
//!
//! [`FilterCriteria`] is an immutable snapshot of what the user is searching
//! for; a change in intent replaces it wholesale. [`matches`] is the filter
//! engine: a pure predicate over a room and the current criteria.

use crate::room::{Availability, Room};

/// Predicate applied on top of the text search.
///
/// The dispatch in [`matches`] is exhaustive: a new mode must come with its
/// own predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SecondaryFilter {
    /// Only rooms listed for everyone.
    #[default]
    Public,
}

/// Search string plus secondary filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    search_string: String,
    secondary_filter: SecondaryFilter,
}

impl FilterCriteria {
    /// Create criteria from a search string and a secondary filter.
    pub fn new(search_string: impl Into<String>, secondary_filter: SecondaryFilter) -> Self {
        Self { search_string: search_string.into(), secondary_filter }
    }

    /// Text searched for in the room's filter terms. Empty matches anything.
    pub fn search_string(&self) -> &str {
        &self.search_string
    }

    /// Secondary predicate.
    pub fn secondary_filter(&self) -> SecondaryFilter {
        self.secondary_filter
    }
}

/// Whether `room` passes `criteria`.
///
/// No criteria means no filter is configured and everything matches.
/// Otherwise the room must contain the search string in at least one filter
/// term, ignoring case, and satisfy the secondary predicate. An empty search
/// string matches regardless of the terms.
pub fn matches(room: &Room, criteria: Option<&FilterCriteria>) -> bool {
    let Some(criteria) = criteria else {
        return true;
    };

    text_matches(room.filter_terms(), criteria.search_string())
        && secondary_matches(room, criteria.secondary_filter())
}

fn text_matches(terms: &[String], needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    let needle = needle.to_lowercase();
    terms.iter().any(|term| term.to_lowercase().contains(&needle))
}

fn secondary_matches(room: &Room, filter: SecondaryFilter) -> bool {
    match filter {
        SecondaryFilter::Public => room.availability() == Availability::Public,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn public(name: &str) -> Room {
        Room::new(1, name, "host")
    }

    #[test]
    fn no_criteria_matches_everything() {
        let room = public("x").with_availability(Availability::InviteOnly);
        assert!(matches(&room, None));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let criteria = FilterCriteria::new("FARM", SecondaryFilter::Public);
        assert!(matches(&public("nightly farm session"), Some(&criteria)));
        assert!(!matches(&public("ranked grind"), Some(&criteria)));
    }

    #[test]
    fn any_term_may_match() {
        let room = public("room").with_filter_terms(["alpha", "Beta"]);
        let criteria = FilterCriteria::new("bet", SecondaryFilter::Public);
        assert!(matches(&room, Some(&criteria)));
    }

    #[test]
    fn empty_search_ignores_terms() {
        let criteria = FilterCriteria::new("", SecondaryFilter::Public);
        let no_terms = public("room").with_filter_terms(Vec::<String>::new());
        assert!(matches(&no_terms, Some(&criteria)));
    }

    #[test]
    fn public_filter_rejects_other_availability() {
        let criteria = FilterCriteria::new("", SecondaryFilter::Public);
        for availability in [Availability::FriendsOnly, Availability::InviteOnly] {
            let room = public("room").with_availability(availability);
            assert!(!matches(&room, Some(&criteria)));
        }
    }

    #[test]
    fn text_and_secondary_must_both_hold() {
        let criteria = FilterCriteria::new("room", SecondaryFilter::Public);
        let hidden = public("room").with_availability(Availability::FriendsOnly);
        assert!(!matches(&hidden, Some(&criteria)));
    }
}
