//! In-memory store
//!
//! A note table with the cancellation checkpoint in front of it. Nothing is
//! ever written to durable storage.

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::Result;
use crate::note::{Note, Pagination};

use super::{
    checkpoint, NoteDeleter, NoteFetcher, NoteGetter, NoteInserter, NotePage, NoteTable,
    NoteUpdater,
};

/// Store backed only by process memory. Safe for concurrent use.
#[derive(Clone, Default)]
pub struct MemoryStore {
    table: NoteTable,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notes
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl NoteInserter for MemoryStore {
    fn insert(&self, token: &CancellationToken, note: &Note) -> Result<()> {
        checkpoint(token)?;
        self.table.insert(note)
    }
}

impl NoteGetter for MemoryStore {
    fn get(&self, token: &CancellationToken, id: Uuid) -> Result<Note> {
        checkpoint(token)?;
        self.table.get(id)
    }
}

impl NoteUpdater for MemoryStore {
    fn update(&self, token: &CancellationToken, note: &Note) -> Result<Note> {
        checkpoint(token)?;
        self.table.update(note)
    }
}

impl NoteDeleter for MemoryStore {
    fn delete(&self, token: &CancellationToken, id: Uuid) -> Result<()> {
        checkpoint(token)?;
        self.table.delete(id).map(|_| ())
    }
}

impl NoteFetcher for MemoryStore {
    type Iter = NotePage;

    fn fetch(&self, token: &CancellationToken, pagination: &Pagination) -> Result<NotePage> {
        checkpoint(token)?;
        Ok(self.table.fetch(pagination))
    }
}
