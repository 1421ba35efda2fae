//! Search request builder.

use std::fmt;

use crate::params::{Category, Extra, Genre, Language, Played, SortCriteria, SortDirection};

/// Endpoint the parameters are sent to.
pub const SEARCH_TARGET: &str = "beatmapsets/search";

/// Opaque pagination cursor returned with a previous page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cursor {
    properties: Vec<(String, String)>,
}

impl Cursor {
    /// Empty cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property. Insertion order is kept on the wire.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.properties.push((key.into(), value.to_string()));
        self
    }

    /// Properties in insertion order.
    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    /// Whether the cursor carries no property.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Query for the remote listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    ruleset_id: Option<u32>,
    category: Category,
    sort_criteria: SortCriteria,
    sort_direction: SortDirection,
    genre: Genre,
    language: Language,
    extras: Vec<Extra>,
    played: Played,
    cursor: Option<Cursor>,
}

impl SearchRequest {
    /// Search `query`, optionally restricted to one ruleset.
    ///
    /// Everything else starts unfiltered, sorted by ranked date, newest first.
    pub fn new(query: impl Into<String>, ruleset_id: Option<u32>) -> Self {
        Self {
            query: query.into(),
            ruleset_id,
            category: Category::Any,
            sort_criteria: SortCriteria::Ranked,
            sort_direction: SortDirection::Descending,
            genre: Genre::Any,
            language: Language::Any,
            extras: Vec::new(),
            played: Played::Any,
            cursor: None,
        }
    }

    /// Restrict to a listing section.
    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Sort key and direction.
    #[must_use]
    pub fn sort(mut self, criteria: SortCriteria, direction: SortDirection) -> Self {
        self.sort_criteria = criteria;
        self.sort_direction = direction;
        self
    }

    /// Restrict to a genre.
    #[must_use]
    pub fn genre(mut self, genre: Genre) -> Self {
        self.genre = genre;
        self
    }

    /// Restrict to a language.
    #[must_use]
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Require extra content. Extras are sent in the order given, repeats
    /// included.
    #[must_use]
    pub fn extras(mut self, extras: impl IntoIterator<Item = Extra>) -> Self {
        self.extras.extend(extras);
        self
    }

    /// Filter by play history.
    #[must_use]
    pub fn played(mut self, played: Played) -> Self {
        self.played = played;
        self
    }

    /// Continue from a previous page.
    #[must_use]
    pub fn cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Raw search text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Endpoint, relative to the API root.
    pub fn target(&self) -> &'static str {
        SEARCH_TARGET
    }

    /// Parameters in wire order. Values are percent-encoded.
    ///
    /// `q`, `m` (if a ruleset is set), `s`, `g` and `l` (unless any), `sort`,
    /// `e` (if extras are required), `played` (unless any), then one
    /// `cursor[key]` per cursor property.
    pub fn parameters(&self) -> Vec<(String, String)> {
        let mut params = vec![("q".to_owned(), urlencoding::encode(&self.query).into_owned())];

        if let Some(ruleset_id) = self.ruleset_id {
            params.push(("m".to_owned(), ruleset_id.to_string()));
        }

        params.push(("s".to_owned(), self.category.name().to_owned()));

        if self.genre != Genre::Any {
            params.push(("g".to_owned(), self.genre.code().to_string()));
        }
        if self.language != Language::Any {
            params.push(("l".to_owned(), self.language.code().to_string()));
        }

        params.push((
            "sort".to_owned(),
            format!("{}_{}", self.sort_criteria.name(), self.sort_direction.name()),
        ));

        if !self.extras.is_empty() {
            let extras: Vec<_> = self.extras.iter().map(|extra| extra.name()).collect();
            params.push(("e".to_owned(), extras.join(".")));
        }

        if self.played != Played::Any {
            params.push(("played".to_owned(), self.played.name().to_owned()));
        }

        if let Some(cursor) = &self.cursor {
            for (key, value) in cursor.properties() {
                params.push((format!("cursor[{key}]"), urlencoding::encode(value).into_owned()));
            }
        }

        params
    }

    /// Parameters joined as `key=value` pairs separated by `&`.
    pub fn query_string(&self) -> String {
        let pairs: Vec<_> =
            self.parameters().into_iter().map(|(key, value)| format!("{key}={value}")).collect();
        pairs.join("&")
    }
}

impl fmt::Display for SearchRequest {
    /// `target?query_string`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?{}", self.target(), self.query_string())
    }
}
