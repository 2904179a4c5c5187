//! Store selected by configuration

use std::fs::File;

use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::config::{Backend, Config};
use crate::error::Result;
use crate::note::{Note, Pagination};

use super::{
    FileStore, MemoryStore, NoteDeleter, NoteFetcher, NoteGetter, NoteInserter, NotePage,
    NoteUpdater,
};

/// Either backend behind one type
pub enum AnyStore {
    Memory(MemoryStore),
    File(FileStore<File>),
}

/// Build the backend named by `config`
pub fn open_store(config: &Config) -> Result<AnyStore> {
    match config.backend {
        Backend::Memory => {
            info!("using in-memory note store");
            Ok(AnyStore::Memory(MemoryStore::new()))
        }
        Backend::File => {
            let path = config.store_path();
            info!(path = %path.display(), "using file-backed note store");
            Ok(AnyStore::File(FileStore::open(&path)?))
        }
    }
}

impl NoteInserter for AnyStore {
    fn insert(&self, token: &CancellationToken, note: &Note) -> Result<()> {
        match self {
            AnyStore::Memory(s) => s.insert(token, note),
            AnyStore::File(s) => s.insert(token, note),
        }
    }
}

impl NoteGetter for AnyStore {
    fn get(&self, token: &CancellationToken, id: Uuid) -> Result<Note> {
        match self {
            AnyStore::Memory(s) => s.get(token, id),
            AnyStore::File(s) => s.get(token, id),
        }
    }
}

impl NoteUpdater for AnyStore {
    fn update(&self, token: &CancellationToken, note: &Note) -> Result<Note> {
        match self {
            AnyStore::Memory(s) => s.update(token, note),
            AnyStore::File(s) => s.update(token, note),
        }
    }
}

impl NoteDeleter for AnyStore {
    fn delete(&self, token: &CancellationToken, id: Uuid) -> Result<()> {
        match self {
            AnyStore::Memory(s) => s.delete(token, id),
            AnyStore::File(s) => s.delete(token, id),
        }
    }
}

impl NoteFetcher for AnyStore {
    type Iter = NotePage;

    fn fetch(&self, token: &CancellationToken, pagination: &Pagination) -> Result<NotePage> {
        match self {
            AnyStore::Memory(s) => s.fetch(token, pagination),
            AnyStore::File(s) => s.fetch(token, pagination),
        }
    }
}
