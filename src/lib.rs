//! # notestore
//!
//! A note record store with:
//! - Point lookups, existence-checked inserts, partial updates and deletes
//! - Paginated, sortable listing
//! - Single-writer/multi-reader concurrency over one shared table
//! - Cancellation observed before every critical section
//! - Optional persistence as a length-prefixed protobuf snapshot
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       NoteService                           │
//! │          (ids, timestamps, existence checks)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  Store traits
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ MemoryStore │          │  FileStore  │──────┐
//!   └──────┬──────┘          └──────┬──────┘      │ snapshot
//!          │                        │             ▼
//!          ▼                        ▼      ┌─────────────┐
//!   ┌─────────────────────────────────┐    │    Codec    │
//!   │      NoteTable (RwLock)         │    │  (frames)   │
//!   └─────────────────────────────────┘    └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod note;
pub mod codec;
pub mod store;
pub mod service;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{NoteError, Result};
pub use config::{Backend, Config};
pub use note::{Note, Pagination, SortBy};
pub use store::{
    open_store, AnyStore, FileStore, MemoryStore, NoteDeleter, NoteFetcher, NoteGetter,
    NoteInserter, NoteIterator, NoteUpdater, Store,
};
pub use service::NoteService;

pub use tokio_util::sync::CancellationToken;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of notestore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
