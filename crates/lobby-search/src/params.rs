//! Search parameter vocabularies.
//!
//! Named values travel as lower-cased variant names; genre and language
//! travel as their integer codes.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// A parameter value that names no known variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownValue {
    /// Vocabulary searched.
    pub kind: &'static str,
    /// Offending input.
    pub value: String,
}

macro_rules! named_values {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal $(=> $code:literal)? ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant $(= $code)? ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Lower-cased name as sent on the wire.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            /// Parse a variant name, ignoring case.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(s))
                    .ok_or_else(|| UnknownValue { kind: $kind, value: s.to_owned() })
            }
        }
    };
}

named_values! {
    /// Listing section searched.
    Category as "category" {
        /// Every section.
        Any = "any",
        /// Sets with a leaderboard.
        Leaderboard = "leaderboard",
        /// Ranked sets.
        Ranked = "ranked",
        /// Qualified sets.
        Qualified = "qualified",
        /// Loved sets.
        Loved = "loved",
        /// The user's favourites.
        Favourites = "favourites",
        /// Pending sets.
        Pending = "pending",
        /// Graveyarded sets.
        Graveyard = "graveyard",
        /// The user's own sets.
        Mine = "mine",
    }
}

named_values! {
    /// Sort key.
    SortCriteria as "sort criteria" {
        /// Song title.
        Title = "title",
        /// Song artist.
        Artist = "artist",
        /// Difficulty rating.
        Difficulty = "difficulty",
        /// Ranked date.
        Ranked = "ranked",
        /// User rating.
        Rating = "rating",
        /// Play count.
        Plays = "plays",
        /// Favourite count.
        Favourites = "favourites",
        /// Search relevance.
        Relevance = "relevance",
    }
}

named_values! {
    /// Sort direction.
    SortDirection as "sort direction" {
        /// Smallest first.
        Ascending = "asc",
        /// Largest first.
        Descending = "desc",
    }
}

named_values! {
    /// Music genre filter, sent as its code.
    Genre as "genre" {
        /// No genre filter.
        Any = "any" => 0,
        /// Genre not set.
        Unspecified = "unspecified" => 1,
        /// Video game music.
        VideoGame = "videogame" => 2,
        /// Anime.
        Anime = "anime" => 3,
        /// Rock.
        Rock = "rock" => 4,
        /// Pop.
        Pop = "pop" => 5,
        /// Other.
        Other = "other" => 6,
        /// Novelty.
        Novelty = "novelty" => 7,
        /// Hip hop.
        HipHop = "hiphop" => 9,
        /// Electronic.
        Electronic = "electronic" => 10,
        /// Metal.
        Metal = "metal" => 11,
        /// Classical.
        Classical = "classical" => 12,
        /// Folk.
        Folk = "folk" => 13,
        /// Jazz.
        Jazz = "jazz" => 14,
    }
}

named_values! {
    /// Lyrics language filter, sent as its code.
    Language as "language" {
        /// No language filter.
        Any = "any" => 0,
        /// Language not set.
        Unspecified = "unspecified" => 1,
        /// English.
        English = "english" => 2,
        /// Japanese.
        Japanese = "japanese" => 3,
        /// Chinese.
        Chinese = "chinese" => 4,
        /// No lyrics.
        Instrumental = "instrumental" => 5,
        /// Korean.
        Korean = "korean" => 6,
        /// French.
        French = "french" => 7,
        /// German.
        German = "german" => 8,
        /// Swedish.
        Swedish = "swedish" => 9,
        /// Spanish.
        Spanish = "spanish" => 10,
        /// Italian.
        Italian = "italian" => 11,
        /// Russian.
        Russian = "russian" => 12,
        /// Polish.
        Polish = "polish" => 13,
        /// Other.
        Other = "other" => 14,
    }
}

named_values! {
    /// Required extra content.
    Extra as "extra" {
        /// Has a background video.
        Video = "video",
        /// Has a storyboard.
        Storyboard = "storyboard",
    }
}

named_values! {
    /// Play history filter.
    Played as "played filter" {
        /// No filter.
        Any = "any",
        /// Played before.
        Played = "played",
        /// Never played.
        Unplayed = "unplayed",
    }
}

impl Genre {
    /// Integer code.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Language {
    /// Integer code.
    pub fn code(self) -> u8 {
        self as u8
    }
}
