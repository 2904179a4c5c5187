//! Record schema
//!
//! The field-numbered message stored inside every frame, and its
//! conversions to and from `Note`.

use chrono::{DateTime, Utc};
use prost_types::Timestamp;
use uuid::Uuid;

use crate::error::{NoteError, Result};
use crate::note::{Note, LEGACY_ZERO_SECONDS};

/// On-disk representation of a note
///
/// ```text
/// message Note {
///   bytes id = 1;
///   optional string title = 2;
///   optional string content = 3;
///   google.protobuf.Timestamp created_time = 4;
///   google.protobuf.Timestamp updated_time = 5;
///   optional bool is_favorite = 6;
/// }
/// ```
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NoteRecord {
    /// Identifier in hyphenated text form (16 raw bytes are also accepted)
    #[prost(bytes = "vec", tag = "1")]
    pub id: Vec<u8>,

    #[prost(string, optional, tag = "2")]
    pub title: Option<String>,

    #[prost(string, optional, tag = "3")]
    pub content: Option<String>,

    #[prost(message, optional, tag = "4")]
    pub created_time: Option<Timestamp>,

    #[prost(message, optional, tag = "5")]
    pub updated_time: Option<Timestamp>,

    #[prost(bool, optional, tag = "6")]
    pub is_favorite: Option<bool>,
}

impl From<&Note> for NoteRecord {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.hyphenated().to_string().into_bytes(),
            title: note.title.clone(),
            content: note.content.clone(),
            created_time: note.created_time.as_ref().map(to_timestamp),
            updated_time: note.updated_time.as_ref().map(to_timestamp),
            is_favorite: note.is_favorite,
        }
    }
}

impl TryFrom<NoteRecord> for Note {
    type Error = NoteError;

    fn try_from(record: NoteRecord) -> Result<Self> {
        Ok(Note {
            id: parse_id(&record.id)?,
            title: record.title,
            content: record.content,
            created_time: record.created_time.map(from_timestamp).transpose()?.flatten(),
            updated_time: record.updated_time.map(from_timestamp).transpose()?.flatten(),
            is_favorite: record.is_favorite,
        })
    }
}

fn parse_id(bytes: &[u8]) -> Result<Uuid> {
    if bytes.len() == 16 {
        return Uuid::from_slice(bytes).map_err(|e| NoteError::InvalidId(e.to_string()));
    }
    let text = std::str::from_utf8(bytes).map_err(|e| NoteError::InvalidId(e.to_string()))?;
    Uuid::parse_str(text).map_err(|e| NoteError::InvalidId(format!("{text:?}: {e}")))
}

fn to_timestamp(t: &DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: t.timestamp(),
        nanos: t.timestamp_subsec_nanos() as i32,
    }
}

/// `Ok(None)` for the legacy zero instant
fn from_timestamp(ts: Timestamp) -> Result<Option<DateTime<Utc>>> {
    if ts.seconds == LEGACY_ZERO_SECONDS && ts.nanos == 0 {
        return Ok(None);
    }
    let nanos = u32::try_from(ts.nanos)
        .map_err(|_| NoteError::InvalidTimestamp(format!("negative nanos {}", ts.nanos)))?;
    DateTime::from_timestamp(ts.seconds, nanos)
        .map(Some)
        .ok_or_else(|| NoteError::InvalidTimestamp(format!("{}s {}ns", ts.seconds, ts.nanos)))
}
