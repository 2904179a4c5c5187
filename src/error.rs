//! Error types for notestore
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using NoteError
pub type Result<T> = std::result::Result<T, NoteError>;

/// Unified error type for notestore operations
#[derive(Debug, Error)]
pub enum NoteError {
    // -------------------------------------------------------------------------
    // Domain Sentinels
    // -------------------------------------------------------------------------
    #[error("note: note id must not be the nil value")]
    NilId,

    #[error("note: note already exists")]
    Exists,

    #[error("note: note not found")]
    NotFound,

    #[error("note: operation cancelled")]
    Cancelled,

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot rewrite failed after the in-memory mutation was applied.
    /// The table is ahead of the backing file until the next successful rewrite.
    #[error("snapshot rewrite failed, in-memory state is ahead of disk: {0}")]
    Persist(#[source] Box<NoteError>),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("record decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("record encode error: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error("truncated frame: expected {expected} bytes, got {got}")]
    TruncatedFrame { expected: usize, got: usize },

    #[error("frame too large: {0} bytes")]
    FrameTooLarge(u32),

    #[error("invalid note id: {0}")]
    InvalidId(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl NoteError {
    /// Whether this is one of the caller-recoverable domain conditions
    /// (`NilId`, `Exists`, `NotFound`, `Cancelled`) as opposed to an opaque
    /// codec or I/O failure.
    pub fn is_sentinel(&self) -> bool {
        matches!(
            self,
            NoteError::NilId | NoteError::Exists | NoteError::NotFound | NoteError::Cancelled
        )
    }
}
