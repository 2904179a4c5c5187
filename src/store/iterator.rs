//! Page iterator
//!
//! Single-pass cursor over one fetched page of notes.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{NoteError, Result};
use crate::note::Note;

use super::table::NoteMap;

/// Cursor over the result of a fetch
///
/// ## States
/// - ready: `advance()` moved onto a record, `note()` returns it
/// - exhausted: `advance()` returned false; the cursor does not restart
pub trait NoteIterator {
    /// Move to the next record; false once the page is exhausted
    fn advance(&mut self) -> bool;

    /// Copy of the record under the cursor
    fn note(&self) -> Option<Note>;

    /// Number of records in the whole result, before windowing
    fn total_count(&self) -> u64;

    /// Number of pages in the whole result
    fn total_page(&self) -> u64;

    /// Release any resources held by the iterator
    fn close(&mut self) -> Result<()>;

    /// Last error hit while iterating
    fn error(&self) -> Option<&NoteError>;

    /// Advance through the remaining records, collecting copies
    fn drain(&mut self) -> Vec<Note> {
        let mut notes = Vec::new();
        while self.advance() {
            if let Some(note) = self.note() {
                notes.push(note);
            }
        }
        notes
    }
}

/// Iterator returned by both the memory and file stores
///
/// Holds a handle on the table it was fetched from. Reading a record takes
/// the table's read lock and returns the currently stored version, so an
/// update made after the fetch is visible. A record deleted after the fetch
/// is returned as it was fetched.
pub struct NotePage {
    notes: Arc<RwLock<NoteMap>>,
    window: Vec<Note>,
    /// Number of successful `advance()` calls; the cursor is `position - 1`
    position: usize,
    total_count: u64,
    total_page: u64,
}

impl NotePage {
    pub(crate) fn new(
        notes: Arc<RwLock<NoteMap>>,
        window: Vec<Note>,
        total_count: u64,
        total_page: u64,
    ) -> Self {
        Self {
            notes,
            window,
            position: 0,
            total_count,
            total_page,
        }
    }

    /// Number of records in this page
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

impl NoteIterator for NotePage {
    fn advance(&mut self) -> bool {
        if self.position >= self.window.len() {
            return false;
        }
        self.position += 1;
        true
    }

    fn note(&self) -> Option<Note> {
        let fetched = self.window.get(self.position.checked_sub(1)?)?;
        let notes = self.notes.read();
        Some(notes.get(&fetched.id).unwrap_or(fetched).clone())
    }

    fn total_count(&self) -> u64 {
        self.total_count
    }

    fn total_page(&self) -> u64 {
        self.total_page
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn error(&self) -> Option<&NoteError> {
        None
    }
}
