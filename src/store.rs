use std::{
    collections::{BTreeMap, btree_map::Entry},
    path::{Path, PathBuf},
};

use crate::{
    error::StoreError,
    persistence::{self, LoadSummary},
    record::Record,
};

/// An in-memory keyed collection mirrored to one flat file
///
/// Records are kept in ascending id order, which is also the order they are
/// written back in.
#[derive(Debug)]
pub struct RecordStore<R> {
    /// Backing file
    path: PathBuf,
    /// Records keyed by id
    records: BTreeMap<u32, R>,
}

impl<R: Record> RecordStore<R> {
    /// Create an empty store backed by `path` without touching the file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), records: BTreeMap::new() }
    }

    /// Open the store, loading whatever the backing file holds
    ///
    /// # Errors
    ///
    /// Returns a `StoreError::Io` if the file cannot be created or read.
    pub fn open(path: impl Into<PathBuf>) -> Result<(Self, LoadSummary), StoreError> {
        let mut store = Self::new(path);
        let summary = store.load()?;
        Ok((store, summary))
    }

    /// Replace the in-memory contents with the backing file
    ///
    /// A missing file is created empty. When several lines share an id the
    /// first one is kept and the rest are logged and counted as skipped.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError::Io` if the file cannot be created or read. The
    /// in-memory contents are left untouched in that case.
    pub fn load(&mut self) -> Result<LoadSummary, StoreError> {
        let (records, mut summary) = persistence::read_records_from_path::<R>(&self.path)?;

        let mut by_id = BTreeMap::new();
        for record in records {
            match by_id.entry(record.id()) {
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
                Entry::Occupied(slot) => {
                    tracing::warn!(
                        file = %self.path.display(),
                        id = *slot.key(),
                        "skipping record with repeated id"
                    );
                    summary.loaded = summary.loaded.saturating_sub(1);
                    summary.skipped = summary.skipped.saturating_add(1);
                }
            }
        }
        self.records = by_id;
        tracing::debug!(
            file = %self.path.display(),
            loaded = summary.loaded,
            skipped = summary.skipped,
            "loaded records"
        );
        Ok(summary)
    }

    /// Rewrite the backing file with every record
    ///
    /// # Errors
    ///
    /// Returns a `StoreError::Io` if the file cannot be written.
    pub fn save(&self) -> Result<(), StoreError> {
        persistence::write_records_to_path(&self.path, self.records.values())
    }

    /// Insert a record, replacing any record with the same id
    pub fn upsert(&mut self, record: R) -> Option<R> {
        self.records.insert(record.id(), record)
    }

    /// Look a record up by id
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&R> {
        self.records.get(&id)
    }

    /// Mutable lookup, for operations that persist afterwards
    pub(crate) fn get_mut(&mut self, id: u32) -> Option<&mut R> {
        self.records.get_mut(&id)
    }

    /// Whether a record with this id exists
    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.records.contains_key(&id)
    }

    /// Iterate over all records in ascending id order
    pub fn records(&self) -> impl Iterator<Item = &R> {
        self.records.values()
    }

    /// Number of records held
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{
        book_state::BookState,
        record::{Book, Member},
    };

    #[test]
    fn test_books_survive_save_and_load() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("temp dir should be creatable");
        };
        let path = dir.path().join("books.txt");

        let mut store = RecordStore::<Book>::new(&path);
        store.upsert(Book::new(2, "Emma", "Jane Austen", "Classic"));
        store.upsert(Book::new(1, "Dune", "Frank Herbert", "SciFi"));
        if let Some(book) = store.get_mut(2) {
            book.set_state(BookState::Issued);
        }
        assert!(store.save().is_ok());

        let Ok((reloaded, summary)) = RecordStore::<Book>::open(&path) else {
            panic!("saved store should reload");
        };
        assert_eq!(summary, LoadSummary { loaded: 2, skipped: 0 });
        let before: Vec<&Book> = store.records().collect();
        let after: Vec<&Book> = reloaded.records().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_save_overwrites_whole_file() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("temp dir should be creatable");
        };
        let path = dir.path().join("members.txt");
        assert!(fs::write(&path, "9,Old,old@example.org,[]\n").is_ok());

        let mut store = RecordStore::<Member>::new(&path);
        store.upsert(Member::new(1, "Ada", "ada@example.org"));
        assert!(store.save().is_ok());

        assert_eq!(fs::read_to_string(&path).ok().as_deref(), Some("1,Ada,ada@example.org,[]\n"));
    }

    #[test]
    fn test_repeated_id_in_file_keeps_first_line() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("temp dir should be creatable");
        };
        let path = dir.path().join("books.txt");
        let lines = "1,Dune,Frank Herbert,SciFi,true\n\
                     2,Emma,Jane Austen,Classic,false\n\
                     1,Dune Messiah,Frank Herbert,SciFi,false\n";
        assert!(fs::write(&path, lines).is_ok());

        let Ok((store, summary)) = RecordStore::<Book>::open(&path) else {
            panic!("file with a repeated id should still load");
        };
        assert_eq!(summary, LoadSummary { loaded: 2, skipped: 1 });
        assert_eq!(store.len(), 2);
        assert!(matches!(store.get(1), Some(b) if b.title == "Dune" && b.is_issued()));
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let mut store = RecordStore::<Book>::new("unused.txt");
        assert!(store.upsert(Book::new(1, "Dune", "Frank Herbert", "SciFi")).is_none());

        let previous = store.upsert(Book::new(1, "Dune Messiah", "Frank Herbert", "SciFi"));
        assert!(matches!(previous, Some(ref b) if b.title == "Dune"));
        assert_eq!(store.len(), 1);
        assert!(matches!(store.get(1), Some(b) if b.title == "Dune Messiah"));
        assert!(store.get(2).is_none());
    }
}
