use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::likes::LikeStore;
use crate::types::quote::Quote;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest episode first; undated quotes last.
    #[default]
    Recency,
    /// Liked quotes first.
    Popularity,
    /// Speaker name, A to Z.
    Speaker,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Recency, SortKey::Popularity, SortKey::Speaker];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Recency => "Most recent",
            SortKey::Popularity => "Most liked",
            SortKey::Speaker => "Speaker (A-Z)",
        }
    }

    pub fn compare(self, a: &Quote, b: &Quote, likes: &LikeStore) -> Ordering {
        match self {
            // Reversed so that later dates and `Some` sort ahead of `None`.
            SortKey::Recency => b.episode_date.cmp(&a.episode_date),
            SortKey::Popularity => likes.is_liked(&b.id).cmp(&likes.is_liked(&a.id)),
            SortKey::Speaker => speaker_key(a).cmp(&speaker_key(b)),
        }
    }
}

/// Case-folded name used for the alphabetical ordering.
pub fn speaker_key(quote: &Quote) -> String {
    quote.speaker.to_lowercase()
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Recency => "recency",
            SortKey::Popularity => "popularity",
            SortKey::Speaker => "speaker",
        })
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recency" | "recent" => Ok(SortKey::Recency),
            "popularity" | "popular" | "liked" => Ok(SortKey::Popularity),
            "speaker" | "name" => Ok(SortKey::Speaker),
            other => Err(format!("unknown sort key '{}' (expected recency, popularity or speaker)", other)),
        }
    }
}

/// Stable in-place sort: ties keep their incoming order.
pub fn sort_quotes(quotes: &mut [&Quote], key: SortKey, likes: &LikeStore) {
    quotes.sort_by(|a, b| key.compare(a, b, likes));
}
