//! Note record
//!
//! The entity persisted by every store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seconds since the Unix epoch of `0001-01-01T00:00:00Z`.
///
/// Legacy snapshot files write this instant for "no timestamp", so it is
/// treated as absent wherever a timestamp is set.
pub const LEGACY_ZERO_SECONDS: i64 = -62_135_596_800;

/// Whether `t` is the legacy "no timestamp" instant
pub fn is_legacy_zero(t: &DateTime<Utc>) -> bool {
    t.timestamp() == LEGACY_ZERO_SECONDS && t.timestamp_subsec_nanos() == 0
}

/// A single note
///
/// Every field except `id` is optional so that a partial update can tell
/// "leave unchanged" (`None`) apart from "clear to empty" (`Some("")`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier; `Uuid::nil()` means unassigned
    pub id: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Set once by the service when the note is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,

    /// Set by the service on every update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl Note {
    /// Create an empty note with the given id
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    // =========================================================================
    // Builder-style setters
    // =========================================================================

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the created time; the legacy zero instant is ignored
    pub fn with_created_time(mut self, t: DateTime<Utc>) -> Self {
        if !is_legacy_zero(&t) {
            self.created_time = Some(t);
        }
        self
    }

    /// Set the updated time; the legacy zero instant is ignored
    pub fn with_updated_time(mut self, t: DateTime<Utc>) -> Self {
        if !is_legacy_zero(&t) {
            self.updated_time = Some(t);
        }
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.is_favorite = Some(favorite);
        self
    }

    // =========================================================================
    // Value accessors
    // =========================================================================

    /// Title, or `""` when absent
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Content, or `""` when absent
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        self.created_time
    }

    pub fn updated_time(&self) -> Option<DateTime<Utc>> {
        self.updated_time
    }

    /// Favorite flag, or `false` when absent
    pub fn is_favorite(&self) -> bool {
        self.is_favorite.unwrap_or(false)
    }

    /// Whether the id has been assigned
    pub fn has_id(&self) -> bool {
        !self.id.is_nil()
    }

    /// Merge `incoming` into `self`
    ///
    /// Present fields of `incoming` overwrite, absent ones leave the current
    /// value alone. `updated_time` is the exception: it is always taken
    /// verbatim from `incoming`, absent included. The id never changes.
    pub fn merge(&mut self, incoming: &Note) {
        if let Some(title) = &incoming.title {
            self.title = Some(title.clone());
        }
        if let Some(content) = &incoming.content {
            self.content = Some(content.clone());
        }
        if let Some(created) = incoming.created_time {
            self.created_time = Some(created);
        }
        if let Some(favorite) = incoming.is_favorite {
            self.is_favorite = Some(favorite);
        }
        self.updated_time = incoming.updated_time;
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = |t: Option<DateTime<Utc>>| {
            t.map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".to_string())
        };
        writeln!(f, "ID:           {}", self.id)?;
        writeln!(f, "Title:        {}", self.title())?;
        writeln!(f, "Content:      {}", self.content())?;
        writeln!(f, "Created Time: {}", time(self.created_time))?;
        writeln!(f, "Updated Time: {}", time(self.updated_time))?;
        writeln!(f, "Favorite:     {}", self.is_favorite())
    }
}
