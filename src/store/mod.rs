//! Store Module
//!
//! The record-store contract and its two implementations.
//!
//! ## Responsibilities
//! - Define one narrow trait per operation so callers depend only on
//!   what they use
//! - Observe the caller's cancellation token before touching shared state
//! - Serve reads and writes from one lock-guarded note table
//!
//! ## Cancellation Contract
//! Every operation checks its `CancellationToken` exactly once, before any
//! lock is taken. A cancelled token yields `NoteError::Cancelled` and the
//! table is left untouched. A cancellation that arrives after the check is
//! not observed: critical sections are never preempted.
//!
//! ## Implementations
//! ```text
//!   ┌─────────────┐        ┌─────────────────────────┐
//!   │ MemoryStore │        │      FileStore<F>       │
//!   └──────┬──────┘        └──────┬─────────┬────────┘
//!          │                      │         │ hydrate once /
//!          ▼                      ▼         ▼ rewrite on mutation
//!   ┌──────────────────────────────────┐  ┌──────────────┐
//!   │     NoteTable (RwLock<BTreeMap>) │  │ BackingFile  │
//!   └──────────────────────────────────┘  └──────────────┘
//! ```

mod table;
mod iterator;
mod backing;
mod memory;
mod file;
mod any;

pub use table::{NoteMap, NoteTable};
pub use iterator::{NoteIterator, NotePage};
pub use backing::BackingFile;
pub use memory::MemoryStore;
pub use file::FileStore;
pub use any::{open_store, AnyStore};

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::{NoteError, Result};
use crate::note::{Note, Pagination};

/// Inserts new notes
pub trait NoteInserter {
    /// Store a copy of `note`
    ///
    /// Errors: `Cancelled`, `NilId`, `Exists`
    fn insert(&self, token: &CancellationToken, note: &Note) -> Result<()>;
}

/// Looks up single notes
pub trait NoteGetter {
    /// Copy of the note with `id`
    ///
    /// Errors: `Cancelled`, `NilId`, `NotFound`
    fn get(&self, token: &CancellationToken, id: Uuid) -> Result<Note>;
}

/// Applies partial updates
pub trait NoteUpdater {
    /// Merge the present fields of `note` into the stored note and return a
    /// copy of the result. `updated_time` is always taken from `note`.
    ///
    /// Errors: `Cancelled`, `NilId`, `NotFound`
    fn update(&self, token: &CancellationToken, note: &Note) -> Result<Note>;
}

/// Removes notes
pub trait NoteDeleter {
    /// Remove the note with `id`; removing an absent note is not an error
    ///
    /// Errors: `Cancelled`, `NilId`
    fn delete(&self, token: &CancellationToken, id: Uuid) -> Result<()>;
}

/// Lists notes a page at a time
pub trait NoteFetcher {
    type Iter: NoteIterator;

    /// One sorted page of notes
    ///
    /// Errors: `Cancelled`
    fn fetch(&self, token: &CancellationToken, pagination: &Pagination) -> Result<Self::Iter>;
}

/// The full record-store contract
pub trait Store: NoteInserter + NoteGetter + NoteUpdater + NoteDeleter + NoteFetcher {}

impl<T> Store for T where T: NoteInserter + NoteGetter + NoteUpdater + NoteDeleter + NoteFetcher {}

/// The single cancellation checkpoint every operation passes first
pub(crate) fn checkpoint(token: &CancellationToken) -> Result<()> {
    if token.is_cancelled() {
        return Err(NoteError::Cancelled);
    }
    Ok(())
}
