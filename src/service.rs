//! Note service
//!
//! Business rules layered over any store: identifier assignment,
//! timestamps, existence checks and pagination defaults.

use chrono::{DateTime, SubsecRound, Utc};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use crate::error::{NoteError, Result};
use crate::note::{Note, Pagination};
use crate::store::{NoteDeleter, NoteFetcher, NoteGetter, NoteInserter, NoteUpdater};

/// Current time in UTC, truncated to whole seconds
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Service over a store `S`
///
/// Each operation only asks `S` for the capabilities it uses.
pub struct NoteService<S> {
    store: S,
}

impl<S> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The wrapped store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Create a note, assigning an id when it has none
    ///
    /// `created_time` is always set here, overriding any caller value.
    pub fn create(&self, token: &CancellationToken, mut note: Note) -> Result<Note>
    where
        S: NoteInserter + NoteGetter,
    {
        if note.has_id() {
            if self.exists(token, note.id)? {
                return Err(NoteError::Exists);
            }
        } else {
            note.id = Uuid::new_v4();
        }

        note.created_time = Some(timestamp_now());
        self.store.insert(token, &note)?;

        debug!(id = %note.id, "created note");
        Ok(note)
    }

    /// Apply a partial update, stamping `updated_time`
    pub fn update(&self, token: &CancellationToken, mut note: Note) -> Result<Note>
    where
        S: NoteUpdater + NoteGetter,
    {
        if !note.has_id() {
            return Err(NoteError::NilId);
        }
        if !self.exists(token, note.id)? {
            return Err(NoteError::NotFound);
        }

        note.updated_time = Some(timestamp_now());
        let updated = self.store.update(token, &note)?;

        debug!(id = %updated.id, "updated note");
        Ok(updated)
    }

    pub fn delete(&self, token: &CancellationToken, id: Uuid) -> Result<()>
    where
        S: NoteDeleter,
    {
        if id.is_nil() {
            return Err(NoteError::NilId);
        }
        self.store.delete(token, id)
    }

    pub fn get(&self, token: &CancellationToken, id: Uuid) -> Result<Note>
    where
        S: NoteGetter,
    {
        if id.is_nil() {
            return Err(NoteError::NilId);
        }
        self.store.get(token, id)
    }

    /// Fetch one page, filling in pagination defaults
    pub fn fetch(&self, token: &CancellationToken, pagination: Pagination) -> Result<S::Iter>
    where
        S: NoteFetcher,
    {
        self.store.fetch(token, &pagination.normalize())
    }

    fn exists(&self, token: &CancellationToken, id: Uuid) -> Result<bool>
    where
        S: NoteGetter,
    {
        match self.store.get(token, id) {
            Ok(_) => Ok(true),
            Err(NoteError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
