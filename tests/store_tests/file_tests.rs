//! File Store Tests
//!
//! Runs the shared store suite against `FileStore`, then checks:
//! - The snapshot reflects every mutation, in id order
//! - A fresh store over the same bytes sees the same notes
//! - Corrupt snapshots and failed rewrites are reported

mod common;

use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

use notestore::codec::{read_notes, write_notes, MAX_FRAME_SIZE};
use notestore::note::{sort_notes, Note, Pagination, SortBy};
use notestore::store::BackingFile;
use notestore::{
    CancellationToken, FileStore, NoteDeleter, NoteError, NoteFetcher, NoteGetter, NoteInserter,
    NoteIterator, NoteUpdater,
};
use tempfile::TempDir;
use uuid::Uuid;

use common::*;

// =============================================================================
// Helper Functions
// =============================================================================

fn new_store() -> FileStore<Cursor<Vec<u8>>> {
    FileStore::new(Cursor::new(Vec::new()))
}

fn store_over(notes: &[Note]) -> FileStore<Cursor<Vec<u8>>> {
    let mut bytes = Vec::new();
    write_notes(&mut bytes, notes).unwrap();
    FileStore::new(Cursor::new(bytes))
}

/// Decode what the store last wrote
fn snapshot_of(store: FileStore<Cursor<Vec<u8>>>) -> Vec<Note> {
    let bytes = store.into_inner().into_inner();
    read_notes(&mut Cursor::new(bytes)).unwrap()
}

fn oversized_content() -> String {
    "x".repeat(MAX_FRAME_SIZE as usize + 1)
}

fn reopen(store: FileStore<Cursor<Vec<u8>>>) -> FileStore<Cursor<Vec<u8>>> {
    let mut cursor = store.into_inner();
    cursor.set_position(0);
    FileStore::new(cursor)
}

/// Stream that reads normally but refuses every write
struct FailingFile {
    inner: Cursor<Vec<u8>>,
}

impl Read for FailingFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for FailingFile {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for FailingFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl BackingFile for FailingFile {
    fn truncate(&mut self, _len: u64) -> io::Result<()> {
        Ok(())
    }

    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Shared Suite
// =============================================================================

#[test]
fn test_insert_then_get() {
    check_insert_then_get(&new_store());
}

#[test]
fn test_insert_duplicate() {
    check_insert_duplicate(&new_store());
}

#[test]
fn test_insert_nil_id() {
    check_insert_nil_id(&new_store());
}

#[test]
fn test_insert_copies_input() {
    check_insert_copies_input(&new_store());
}

#[test]
fn test_get_returns_copy() {
    check_get_returns_copy(&new_store());
}

#[test]
fn test_get_missing() {
    check_get_missing(&new_store());
}

#[test]
fn test_update_merges() {
    check_update_merges(&new_store());
}

#[test]
fn test_update_missing() {
    check_update_missing(&new_store());
}

#[test]
fn test_delete() {
    check_delete(&new_store());
}

#[test]
fn test_cancelled() {
    check_cancelled(&new_store());
}

#[test]
fn test_fetch_partitions() {
    check_fetch_partitions(&new_store());
}

#[test]
fn test_fetch_orderings() {
    check_fetch_orderings(&new_store());
}

#[test]
fn test_fetch_partial_last_page() {
    check_fetch_partial_last_page(&new_store());
}

#[test]
fn test_fetch_past_end() {
    check_fetch_past_end(&new_store());
}

#[test]
fn test_fetch_defaults() {
    check_fetch_defaults(&new_store());
}

#[test]
fn test_iterator_is_single_pass() {
    check_iterator_is_single_pass(&new_store());
}

#[test]
fn test_iterator_reads_latest() {
    check_iterator_reads_latest(&new_store());
}

#[test]
fn test_concurrent_inserts() {
    check_concurrent_inserts(&new_store());
}

#[test]
fn test_concurrent_duplicate_insert() {
    check_concurrent_duplicate_insert(&new_store());
}

#[test]
fn test_concurrent_readers_and_writers() {
    check_concurrent_readers_and_writers(&new_store());
}

// =============================================================================
// Snapshot Tests
// =============================================================================

#[test]
fn test_insert_is_persisted_in_id_order() {
    let store = new_store();
    let mut notes = insert_many(&store, 6);
    sort_notes(&mut notes, SortBy::Id, true);

    assert_eq!(snapshot_of(store), notes);
}

#[test]
fn test_update_is_persisted() {
    let store = new_store();
    let token = CancellationToken::new();
    let note = insert_many(&store, 1).remove(0);

    let patch = Note::new(note.id).with_title("Persisted title");
    let updated = store.update(&token, &patch).unwrap();

    assert_eq!(snapshot_of(store), vec![updated]);
}

#[test]
fn test_delete_is_persisted() {
    let store = new_store();
    let token = CancellationToken::new();
    let notes = insert_many(&store, 3);

    store.delete(&token, notes[1].id).unwrap();

    let remaining = snapshot_of(store);
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|n| n.id != notes[1].id));
}

#[test]
fn test_delete_of_absent_note_keeps_snapshot() {
    let notes: Vec<Note> = (0..3).map(note_factory).collect();
    let store = store_over(&notes);
    let token = CancellationToken::new();

    store.delete(&token, Uuid::new_v4()).unwrap();

    let mut want = notes.clone();
    sort_notes(&mut want, SortBy::Id, true);
    assert_eq!(snapshot_of(store), want);
}

#[test]
fn test_shrinking_snapshot_leaves_no_tail() {
    let store = new_store();
    let token = CancellationToken::new();
    let notes = insert_many(&store, 5);

    for note in &notes[1..] {
        store.delete(&token, note.id).unwrap();
    }

    assert_eq!(snapshot_of(store), vec![notes[0].clone()]);
}

// =============================================================================
// Hydration Tests
// =============================================================================

#[test]
fn test_loads_existing_snapshot() {
    let notes: Vec<Note> = (0..20).map(note_factory).collect();
    let store = store_over(&notes);
    let token = CancellationToken::new();

    let mut iter = store
        .fetch(&token, &Pagination::new(1, 100).sorted_by(SortBy::Title, true))
        .unwrap();

    assert_eq!(iter.total_count(), 20);
    assert_eq!(iter.drain(), notes);
}

#[test]
fn test_later_frame_wins_on_load() {
    let first = note_factory(0);
    let second = first.clone().with_title("Rewritten");
    let store = store_over(&[first.clone(), second.clone()]);
    let token = CancellationToken::new();

    assert_eq!(store.get(&token, first.id).unwrap(), second);
    assert_eq!(fetch_all(&store).len(), 1);
}

#[test]
fn test_nil_id_frame_skipped_on_load() {
    let kept = note_factory(0);
    let nil = note_factory(1).with_id(Uuid::nil());
    let store = store_over(&[nil, kept.clone()]);
    let token = CancellationToken::new();

    assert_eq!(fetch_all(&store), vec![kept.clone()]);

    // The next rewrite drops it from disk as well
    let added = note_factory(2);
    store.insert(&token, &added).unwrap();

    let on_disk = snapshot_of(store);
    assert_eq!(on_disk.len(), 2);
    assert!(on_disk.iter().all(Note::has_id));
}

#[test]
fn test_insert_of_note_already_on_disk() {
    let notes: Vec<Note> = (0..2).map(note_factory).collect();
    let store = store_over(&notes);
    let token = CancellationToken::new();

    assert!(matches!(store.insert(&token, &notes[0]), Err(NoteError::Exists)));
}

#[test]
fn test_reopen_sees_every_mutation() {
    let store = new_store();
    let token = CancellationToken::new();
    let notes = insert_many(&store, 3);

    let patch = Note::new(notes[0].id).with_favorite(true);
    let updated = store.update(&token, &patch).unwrap();
    store.delete(&token, notes[2].id).unwrap();

    let store = reopen(store);

    assert_eq!(store.get(&token, notes[0].id).unwrap(), updated);
    assert_eq!(store.get(&token, notes[1].id).unwrap(), notes[1]);
    assert!(matches!(store.get(&token, notes[2].id), Err(NoteError::NotFound)));
}

#[test]
fn test_truncated_snapshot_fails_hydration() {
    let notes: Vec<Note> = (0..3).map(note_factory).collect();
    let mut bytes = Vec::new();
    write_notes(&mut bytes, &notes).unwrap();
    bytes.truncate(bytes.len() - 1);

    let store = FileStore::new(Cursor::new(bytes));
    let token = CancellationToken::new();

    let err = store.get(&token, notes[0].id).unwrap_err();

    assert!(matches!(err, NoteError::TruncatedFrame { .. }));
    assert!(!err.is_sentinel());
    assert!(!store.is_hydrated());
}

// =============================================================================
// On-disk Tests
// =============================================================================

#[test]
fn test_open_creates_file_and_reopens() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("notes.pb");
    let token = CancellationToken::new();

    let notes = {
        let store = FileStore::open(&path).unwrap();
        insert_many(&store, 4)
    };
    assert!(path.exists());

    let store = FileStore::open(&path).unwrap();
    for note in &notes {
        assert_eq!(&store.get(&token, note.id).unwrap(), note);
    }
}

#[test]
fn test_open_does_not_clobber_before_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.pb");

    let notes: Vec<Note> = (0..2).map(note_factory).collect();
    let mut bytes = Vec::new();
    write_notes(&mut bytes, &notes).unwrap();
    std::fs::write(&path, &bytes).unwrap();

    let store = FileStore::open(&path).unwrap();
    drop(store);

    assert_eq!(std::fs::read(&path).unwrap(), bytes);
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_failed_rewrite_reports_persist() {
    let store = FileStore::new(FailingFile {
        inner: Cursor::new(Vec::new()),
    });
    let token = CancellationToken::new();
    let note = note_factory(0);

    let err = store.insert(&token, &note).unwrap_err();
    assert!(matches!(err, NoteError::Persist(_)));
    assert!(!err.is_sentinel());

    // Memory is ahead of the file
    assert_eq!(store.get(&token, note.id).unwrap(), note);
}

#[test]
fn test_oversized_insert_rejected_before_table_changes() {
    let store = new_store();
    let token = CancellationToken::new();
    let mut notes = insert_many(&store, 3);

    let big = note_factory(3).with_content(oversized_content());
    let err = store.insert(&token, &big).unwrap_err();
    assert!(matches!(err, NoteError::FrameTooLarge(len) if len > MAX_FRAME_SIZE));
    assert!(matches!(store.get(&token, big.id), Err(NoteError::NotFound)));

    // Later writes still persist, and nothing already on disk was lost
    let small = note_factory(4);
    store.insert(&token, &small).unwrap();
    notes.push(small);
    sort_notes(&mut notes, SortBy::Id, true);

    assert_eq!(snapshot_of(store), notes);
}

#[test]
fn test_oversized_update_rejected_before_table_changes() {
    let store = new_store();
    let token = CancellationToken::new();
    let mut notes = insert_many(&store, 3);

    let patch = Note::new(notes[1].id).with_content(oversized_content());
    let err = store.update(&token, &patch).unwrap_err();
    assert!(matches!(err, NoteError::FrameTooLarge(_)));
    assert_eq!(store.get(&token, notes[1].id).unwrap(), notes[1]);

    let patch = Note::new(notes[0].id).with_title("Still persisted");
    notes[0] = store.update(&token, &patch).unwrap();
    sort_notes(&mut notes, SortBy::Id, true);

    assert_eq!(snapshot_of(store), notes);
}
