//! Search request for the remote listing
//!
//! Builds the parameter list of a beatmap set search: query, ruleset, section,
//! genre, language, sort order, extras, play history and pagination cursor.
//! The parameter names, order and value grammar are what the remote service
//! expects, so they are fixed here and covered by tests.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod params;
mod request;

pub use params::{
    Category, Extra, Genre, Language, Played, SortCriteria, SortDirection, UnknownValue,
};
pub use request::{Cursor, SEARCH_TARGET, SearchRequest};
