//! File-backed store
//!
//! Keeps the same note table as the memory store, mirrored to a backing
//! stream.
//!
//! ## Lifecycle
//! 1. The first operation hydrates the table from the stream (once)
//! 2. Reads are served from the table
//! 3. Every insert/update/delete rewrites the whole snapshot:
//!    encode every frame in id order → truncate → seek to start → write → sync
//!
//! A note too large to frame is rejected before the table changes, so the
//! snapshot can always be encoded. Encoding happens before the stream is
//! truncated.
//!
//! ## Lock order
//! table write lock → file mutex. The file is only touched with the table
//! write lock held.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Seek, SeekFrom, Write};
use std::path::Path;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::codec;
use crate::error::{NoteError, Result};
use crate::note::{Note, Pagination};

use super::table::{insert_into, merged_from, remove_from, require_id, NoteMap};
use super::{
    checkpoint, BackingFile, NoteDeleter, NoteFetcher, NoteGetter, NoteInserter, NotePage,
    NoteTable, NoteUpdater,
};

/// Store whose records survive the process in a snapshot file
///
/// A failed snapshot rewrite leaves the mutation applied in memory and
/// reports `NoteError::Persist`; there is no rollback.
pub struct FileStore<F: BackingFile> {
    table: NoteTable,
    file: Mutex<F>,
    hydrated: OnceCell<()>,
}

impl FileStore<File> {
    /// Open (creating if missing) the snapshot file at `path`
    ///
    /// Existing content is left alone until the first operation loads it.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        debug!(path = %path.display(), "opened note snapshot file");
        Ok(Self::new(file))
    }
}

impl<F: BackingFile> FileStore<F> {
    /// Wrap a backing stream; nothing is read until the first operation
    pub fn new(file: F) -> Self {
        Self {
            table: NoteTable::new(),
            file: Mutex::new(file),
            hydrated: OnceCell::new(),
        }
    }

    /// Whether the table has been loaded from the stream yet
    pub fn is_hydrated(&self) -> bool {
        self.hydrated.get().is_some()
    }

    /// Give back the backing stream
    pub fn into_inner(self) -> F {
        self.file.into_inner()
    }

    /// Load the table on first use
    ///
    /// A failure is returned to the calling operation and the next
    /// operation tries again; the stream is never rewritten before a
    /// successful load.
    fn ensure_hydrated(&self) -> Result<()> {
        self.hydrated.get_or_try_init(|| self.hydrate()).map(|_| ())
    }

    fn hydrate(&self) -> Result<()> {
        let mut notes = self.table.write();
        let mut file = self.file.lock();

        file.seek(SeekFrom::Start(0))?;
        let loaded = codec::read_notes(&mut BufReader::new(&mut *file))?;
        let frames = loaded.len();

        notes.clear();
        for note in loaded {
            if !note.has_id() {
                warn!("skipping snapshot frame with nil id");
                continue;
            }
            notes.insert(note.id, note);
        }

        info!(frames, records = notes.len(), "hydrated note table from snapshot");
        Ok(())
    }

    /// Rewrite the snapshot from `notes` (caller holds the table write lock)
    fn persist(&self, notes: &NoteMap) -> Result<()> {
        let mut file = self.file.lock();
        rewrite(&mut *file, notes).map_err(|e| {
            warn!(error = %e, "snapshot rewrite failed, file is behind memory");
            NoteError::Persist(Box::new(e))
        })
    }
}

fn rewrite<F: BackingFile>(file: &mut F, notes: &NoteMap) -> Result<()> {
    let mut snapshot = Vec::new();
    let written = codec::write_notes(&mut snapshot, notes.values())?;

    file.truncate(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(&snapshot)?;
    file.flush()?;
    file.sync()?;
    debug!(records = written, "rewrote note snapshot");
    Ok(())
}

impl<F: BackingFile> NoteInserter for FileStore<F> {
    fn insert(&self, token: &CancellationToken, note: &Note) -> Result<()> {
        checkpoint(token)?;
        self.ensure_hydrated()?;
        require_id(note.id)?;
        codec::check_frame_size(note)?;

        let mut notes = self.table.write();
        insert_into(&mut notes, note)?;
        self.persist(&notes)
    }
}

impl<F: BackingFile> NoteGetter for FileStore<F> {
    fn get(&self, token: &CancellationToken, id: Uuid) -> Result<Note> {
        checkpoint(token)?;
        self.ensure_hydrated()?;
        self.table.get(id)
    }
}

impl<F: BackingFile> NoteUpdater for FileStore<F> {
    fn update(&self, token: &CancellationToken, note: &Note) -> Result<Note> {
        checkpoint(token)?;
        self.ensure_hydrated()?;
        require_id(note.id)?;

        let mut notes = self.table.write();
        let updated = merged_from(&notes, note)?;
        codec::check_frame_size(&updated)?;
        notes.insert(updated.id, updated.clone());
        self.persist(&notes)?;
        Ok(updated)
    }
}

impl<F: BackingFile> NoteDeleter for FileStore<F> {
    fn delete(&self, token: &CancellationToken, id: Uuid) -> Result<()> {
        checkpoint(token)?;
        self.ensure_hydrated()?;
        require_id(id)?;

        let mut notes = self.table.write();
        if !remove_from(&mut notes, id) {
            debug!(%id, "delete of absent note");
        }
        self.persist(&notes)
    }
}

impl<F: BackingFile> NoteFetcher for FileStore<F> {
    type Iter = NotePage;

    fn fetch(&self, token: &CancellationToken, pagination: &Pagination) -> Result<NotePage> {
        checkpoint(token)?;
        self.ensure_hydrated()?;
        Ok(self.table.fetch(pagination))
    }
}
