//! Backing stream for the file store

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, Write};

/// A seekable byte stream that can be cut short and synced
pub trait BackingFile: Read + Write + Seek + Send {
    /// Cut the stream down to `len` bytes
    fn truncate(&mut self, len: u64) -> io::Result<()>;

    /// Push written bytes to durable storage
    fn sync(&mut self) -> io::Result<()>;
}

impl BackingFile for File {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

/// In-memory stream, mostly for tests
impl BackingFile for Cursor<Vec<u8>> {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        let len = usize::try_from(len)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "length overflows usize"))?;
        self.get_mut().truncate(len);
        Ok(())
    }

    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}
