//! Codec Module
//!
//! Binary encoding of the note snapshot file.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Frame 1                                 │
//! │ ┌────────────┬────────────────────────┐ │
//! │ │ Len (4 LE) │ NoteRecord (protobuf)  │ │
//! │ └────────────┴────────────────────────┘ │
//! ├─────────────────────────────────────────┤
//! │ Frame 2                                 │
//! │ ┌────────────┬────────────────────────┐ │
//! │ │ Len (4 LE) │ NoteRecord (protobuf)  │ │
//! │ └────────────┴────────────────────────┘ │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Protobuf messages are not self-delimiting, hence the length prefix.
//! A stream that stops inside a frame is an error, never a silent
//! truncation.

mod record;
mod frame;

pub use record::NoteRecord;
pub use frame::{
    check_frame_size, encode_frame, read_note, read_notes, write_note, write_notes,
    LENGTH_PREFIX_SIZE, MAX_FRAME_SIZE,
};
