//! Frame codec
//!
//! Reading and writing length-prefixed note records.
//!
//! ## Wire Format
//! ```text
//! ┌──────────────┬──────────────────────────────┐
//! │ Len (4, LE)  │   NoteRecord (Len bytes)     │
//! └──────────────┴──────────────────────────────┘
//! ```
//! Frames are written back-to-back. The stream ends cleanly only on a
//! frame boundary.

use std::io::{ErrorKind, Read, Write};

use bytes::{BufMut, BytesMut};
use prost::Message;

use crate::error::{NoteError, Result};
use crate::note::Note;

use super::NoteRecord;

/// Size of the little-endian length prefix
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Maximum record payload size (16 MB)
pub const MAX_FRAME_SIZE: u32 = 16 * 1024 * 1024;

// =============================================================================
// Encoding
// =============================================================================

/// Payload length of `record`, or `FrameTooLarge` past `MAX_FRAME_SIZE`
fn checked_len(record: &NoteRecord) -> Result<u32> {
    let len = u32::try_from(record.encoded_len()).unwrap_or(u32::MAX);
    if len > MAX_FRAME_SIZE {
        return Err(NoteError::FrameTooLarge(len));
    }
    Ok(len)
}

/// Fail with `FrameTooLarge` if `note` could not be written as a frame
pub fn check_frame_size(note: &Note) -> Result<()> {
    checked_len(&NoteRecord::from(note)).map(|_| ())
}

/// Encode one note into a complete frame
pub fn encode_frame(note: &Note) -> Result<BytesMut> {
    let record = NoteRecord::from(note);
    let len = checked_len(&record)?;

    let mut frame = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + len as usize);
    frame.put_u32_le(len);
    record.encode(&mut frame)?;

    Ok(frame)
}

/// Write one note as a frame
pub fn write_note<W: Write>(writer: &mut W, note: &Note) -> Result<()> {
    let frame = encode_frame(note)?;
    writer.write_all(&frame)?;
    Ok(())
}

/// Write every note back-to-back, then flush
pub fn write_notes<'a, W, I>(writer: &mut W, notes: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Note>,
{
    let mut written = 0;
    for note in notes {
        write_note(writer, note)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

// =============================================================================
// Decoding
// =============================================================================

/// Read the next note
///
/// Returns:
/// - `Ok(Some(note))`: a complete frame was read
/// - `Ok(None)`: the stream ended exactly on a frame boundary
/// - `Err(TruncatedFrame)`: the stream ended inside a frame
pub fn read_note<R: Read>(reader: &mut R) -> Result<Option<Note>> {
    let Some(prefix) = read_length_prefix(reader)? else {
        return Ok(None);
    };

    let len = u32::from_le_bytes(prefix);
    if len > MAX_FRAME_SIZE {
        return Err(NoteError::FrameTooLarge(len));
    }

    let expected = len as usize;
    let mut payload = Vec::with_capacity(expected);
    reader.by_ref().take(len as u64).read_to_end(&mut payload)?;
    if payload.len() != expected {
        return Err(NoteError::TruncatedFrame {
            expected,
            got: payload.len(),
        });
    }

    let record = NoteRecord::decode(payload.as_slice())?;
    Note::try_from(record).map(Some)
}

/// Read notes until the stream ends on a frame boundary
pub fn read_notes<R: Read>(reader: &mut R) -> Result<Vec<Note>> {
    let mut notes = Vec::new();
    while let Some(note) = read_note(reader)? {
        notes.push(note);
    }
    Ok(notes)
}

/// Fill the 4-byte prefix, telling a clean end (no bytes) from a short one
fn read_length_prefix<R: Read>(reader: &mut R) -> Result<Option<[u8; LENGTH_PREFIX_SIZE]>> {
    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    let mut filled = 0;

    while filled < LENGTH_PREFIX_SIZE {
        match reader.read(&mut prefix[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    match filled {
        0 => Ok(None),
        LENGTH_PREFIX_SIZE => Ok(Some(prefix)),
        got => Err(NoteError::TruncatedFrame {
            expected: LENGTH_PREFIX_SIZE,
            got,
        }),
    }
}
