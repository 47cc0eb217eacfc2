//! JSON file-based bookmark storage.
//!
//! The file holds a plain JSON array of bookmarks in insertion order. Writes go
//! to a temporary sibling first and are then renamed over the target, so a
//! crash mid-write leaves the previous list intact.
//!
//! # File Format
//!
//! ```json
//! [
//!   {
//!     "id": "abc123",
//!     "title": "Dune",
//!     "authors": ["Frank Herbert"],
//!     "thumbnail": "http://books.google.com/books/content?id=abc123",
//!     "saved_at": 1718000000
//!   }
//! ]
//! ```

use crate::domain::error::{LibrisError, Result};
use crate::domain::{BookRecord, Bookmark};
use crate::storage::backend::BookmarkStorage;
use std::path::{Path, PathBuf};

/// JSON file bookmark store.
///
/// Designed for the single plugin thread: `Send` but not shared.
#[derive(Debug)]
pub struct JsonBookmarkStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy of the list, authoritative between writes.
    bookmarks: Vec<Bookmark>,
}

impl JsonBookmarkStore {
    /// Creates a store backed by `file_path`.
    ///
    /// Nothing is read until [`BookmarkStorage::load`] is called, and parent
    /// directories are only created on the first write.
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            bookmarks: Vec::new(),
        }
    }

    /// Reads and parses the backing file.
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Io`] if the file cannot be read and
    /// [`LibrisError::MalformedStorage`] if it is not a bookmark list.
    fn read_from_file(path: &Path) -> Result<Vec<Bookmark>> {
        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let bookmarks: Vec<Bookmark> = serde_json::from_str(&contents)
            .map_err(|e| LibrisError::MalformedStorage(e.to_string()))?;

        Ok(dedupe(bookmarks))
    }

    /// Writes the full list to disk atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the
    /// temporary file cannot be written, or the rename fails.
    fn save_to_file(&self) -> Result<()> {
        tracing::debug!(path = ?self.file_path, count = self.bookmarks.len(), "saving bookmarks");

        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.bookmarks)
            .map_err(|e| LibrisError::Storage(format!("failed to serialize bookmarks: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("bookmarks saved");
        Ok(())
    }
}

/// Drops later entries whose id already appeared earlier in the list.
fn dedupe(bookmarks: Vec<Bookmark>) -> Vec<Bookmark> {
    let mut seen = std::collections::HashSet::new();
    bookmarks
        .into_iter()
        .filter(|b| seen.insert(b.book.id.clone()))
        .collect()
}

impl BookmarkStorage for JsonBookmarkStore {
    fn load(&mut self) -> Vec<Bookmark> {
        let _span = tracing::debug_span!("json_load_bookmarks", path = ?self.file_path).entered();

        if !self.file_path.exists() {
            tracing::debug!("no bookmark file yet, starting empty");
            self.bookmarks.clear();
            return Vec::new();
        }

        self.bookmarks = match Self::read_from_file(&self.file_path) {
            Ok(bookmarks) => bookmarks,
            Err(e) => {
                tracing::warn!(error = %e, "could not load bookmarks, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = self.bookmarks.len(), "bookmarks loaded");
        self.bookmarks.clone()
    }

    fn add(&mut self, record: BookRecord) -> Result<&[Bookmark]> {
        let _span = tracing::debug_span!("json_add_bookmark", id = %record.id).entered();

        if self.contains(&record.id) {
            tracing::debug!("already bookmarked, skipping write");
            return Ok(&self.bookmarks);
        }

        self.bookmarks.push(Bookmark::new(record));
        if let Err(e) = self.save_to_file() {
            self.bookmarks.pop();
            return Err(e);
        }

        Ok(&self.bookmarks)
    }

    fn remove(&mut self, id: &str) -> Result<&[Bookmark]> {
        let _span = tracing::debug_span!("json_remove_bookmark", id = %id).entered();

        let Some(position) = self.bookmarks.iter().position(|b| b.book.id == id) else {
            tracing::debug!("bookmark not found, skipping write");
            return Ok(&self.bookmarks);
        };

        let removed = self.bookmarks.remove(position);
        if let Err(e) = self.save_to_file() {
            self.bookmarks.insert(position, removed);
            return Err(e);
        }

        Ok(&self.bookmarks)
    }

    fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> BookRecord {
        BookRecord::new(id, format!("Book {id}"), vec!["Someone".to_string()], Some("http://t".to_string()))
    }

    fn store_in(dir: &tempfile::TempDir) -> JsonBookmarkStore {
        JsonBookmarkStore::new(dir.path().join("nested").join("bookmarks.json"))
    }

    #[test]
    fn load_without_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        assert!(store.load().is_empty());
    }

    #[test]
    fn add_survives_a_fresh_session() {
        let dir = tempfile::tempdir().unwrap();

        let mut first = store_in(&dir);
        first.load();
        first.add(record("abc123")).unwrap();

        let mut second = store_in(&dir);
        let loaded = second.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].book.id, "abc123");
        assert!(loaded[0].saved_at > 0);
    }

    #[test]
    fn remove_survives_a_fresh_session() {
        let dir = tempfile::tempdir().unwrap();

        let mut first = store_in(&dir);
        first.add(record("a")).unwrap();
        first.add(record("b")).unwrap();
        let remaining = first.remove("a").unwrap();
        assert_eq!(remaining.len(), 1);

        let mut second = store_in(&dir);
        let ids: Vec<String> = second.load().into_iter().map(|b| b.book.id).collect();
        assert_eq!(ids, vec!["b".to_string()]);
    }

    #[test]
    fn adding_twice_keeps_one_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.add(record("abc123")).unwrap();
        let list = store.add(record("abc123")).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        for id in ["z", "a", "m"] {
            store.add(record(id)).unwrap();
        }

        let mut reloaded = store_in(&dir);
        let ids: Vec<String> = reloaded.load().into_iter().map(|b| b.book.id).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn malformed_file_loads_as_empty_and_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = JsonBookmarkStore::new(path.clone());
        assert!(store.load().is_empty());

        store.add(record("fresh")).unwrap();
        let mut reloaded = JsonBookmarkStore::new(path);
        assert_eq!(reloaded.load().len(), 1);
    }

    #[test]
    fn duplicate_ids_on_disk_are_collapsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");
        std::fs::write(
            &path,
            r#"[{"id":"x","title":"One"},{"id":"x","title":"Two"},{"id":"y","title":"Three"}]"#,
        )
        .unwrap();

        let mut store = JsonBookmarkStore::new(path);
        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].book.title, "One");
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let mut store = JsonBookmarkStore::new(blocker.join("bookmarks.json"));
        assert!(store.add(record("a")).is_err());
        assert!(store.bookmarks().is_empty());
    }

    #[test]
    fn removing_unknown_id_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.remove("missing").unwrap();
        assert!(!dir.path().join("nested").join("bookmarks.json").exists());
    }
}
