//! Sort strategies over notes

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Note;

/// Key a page of notes is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Byte-wise order of the raw identifier
    #[default]
    Id,

    /// Lexicographic order of the title (absent sorts as `""`)
    Title,

    /// Chronological order of the creation time (absent sorts first)
    #[serde(rename = "created_date")]
    CreatedTime,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Id => "id",
            SortBy::Title => "title",
            SortBy::CreatedTime => "created_date",
        }
    }

    /// Ascending comparison of two notes under this key
    pub fn compare(&self, a: &Note, b: &Note) -> Ordering {
        match self {
            SortBy::Id => a.id.as_bytes().cmp(b.id.as_bytes()),
            SortBy::Title => a.title().cmp(b.title()),
            SortBy::CreatedTime => a.created_time.cmp(&b.created_time),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a sort key string is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortKey(pub String);

impl fmt::Display for UnknownSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort key: {:?}", self.0)
    }
}

impl std::error::Error for UnknownSortKey {}

impl FromStr for SortBy {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(SortBy::Id),
            "title" => Ok(SortBy::Title),
            "created_date" => Ok(SortBy::CreatedTime),
            _ => Err(UnknownSortKey(s.to_string())),
        }
    }
}

/// Sort `notes` in place by `sort_by`
///
/// Ties are broken arbitrarily.
pub fn sort_notes(notes: &mut [Note], sort_by: SortBy, ascending: bool) {
    if ascending {
        notes.sort_unstable_by(|a, b| sort_by.compare(a, b));
    } else {
        notes.sort_unstable_by(|a, b| sort_by.compare(b, a));
    }
}
