//! Note table
//!
//! BTreeMap-based record table with RwLock for concurrency. Both stores
//! run their read/write logic through this type.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockWriteGuard};
use uuid::Uuid;

use crate::error::{NoteError, Result};
use crate::note::{sort_notes, Note, Pagination};

use super::NotePage;

/// Records keyed by id, kept in id order
pub type NoteMap = BTreeMap<Uuid, Note>;

/// Shared, lock-guarded record table
///
/// ## Concurrency:
/// - `get`/`fetch` take the read lock
/// - `insert`/`update`/`delete` take the write lock
/// - Records never leave the table by reference; every read clones
#[derive(Clone, Default)]
pub struct NoteTable {
    notes: Arc<RwLock<NoteMap>>,
}

impl NoteTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.notes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.read().is_empty()
    }

    /// Store a copy of `note`
    pub fn insert(&self, note: &Note) -> Result<()> {
        require_id(note.id)?;
        insert_into(&mut self.notes.write(), note)
    }

    /// Copy of the record with `id`
    pub fn get(&self, id: Uuid) -> Result<Note> {
        require_id(id)?;
        self.notes.read().get(&id).cloned().ok_or(NoteError::NotFound)
    }

    /// Merge `note` into its stored record, returning a copy of the result
    pub fn update(&self, note: &Note) -> Result<Note> {
        require_id(note.id)?;
        update_in(&mut self.notes.write(), note)
    }

    /// Remove the record with `id`; returns whether one was present
    pub fn delete(&self, id: Uuid) -> Result<bool> {
        require_id(id)?;
        Ok(remove_from(&mut self.notes.write(), id))
    }

    /// Sort every record and window out one page
    pub fn fetch(&self, pagination: &Pagination) -> NotePage {
        let pagination = pagination.normalize();

        let mut notes: Vec<Note> = self.notes.read().values().cloned().collect();
        sort_notes(&mut notes, pagination.sort_by, pagination.ascending);

        let total_count = notes.len() as u64;
        let start = pagination.offset().min(total_count) as usize;
        let stop = pagination
            .offset()
            .saturating_add(pagination.size)
            .min(total_count) as usize;

        let window = notes.drain(start..stop).collect();

        NotePage::new(
            Arc::clone(&self.notes),
            window,
            total_count,
            pagination.page_count(total_count),
        )
    }

    /// Copies of every record in id order
    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.read().values().cloned().collect()
    }

    /// Exclusive access for callers that must persist before unlocking
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, NoteMap> {
        self.notes.write()
    }
}

pub(crate) fn require_id(id: Uuid) -> Result<()> {
    if id.is_nil() {
        return Err(NoteError::NilId);
    }
    Ok(())
}

pub(crate) fn insert_into(notes: &mut NoteMap, note: &Note) -> Result<()> {
    if notes.contains_key(&note.id) {
        return Err(NoteError::Exists);
    }
    notes.insert(note.id, note.clone());
    Ok(())
}

pub(crate) fn update_in(notes: &mut NoteMap, note: &Note) -> Result<Note> {
    let existing = notes.get_mut(&note.id).ok_or(NoteError::NotFound)?;
    existing.merge(note);
    Ok(existing.clone())
}

/// What `update_in` would store, without touching the map
pub(crate) fn merged_from(notes: &NoteMap, note: &Note) -> Result<Note> {
    let mut merged = notes.get(&note.id).cloned().ok_or(NoteError::NotFound)?;
    merged.merge(note);
    Ok(merged)
}

pub(crate) fn remove_from(notes: &mut NoteMap, id: Uuid) -> bool {
    notes.remove(&id).is_some()
}
