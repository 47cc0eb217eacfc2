//! Bookmark storage abstraction.
//!
//! The [`BookmarkStorage`] trait is the contract the application layer talks
//! to. Each method maps to one user action; there is no query language.

use crate::domain::error::Result;
use crate::domain::{BookRecord, Bookmark};

/// Abstraction over durable bookmark backends.
///
/// Implementations keep the current list in memory and persist the complete
/// list synchronously on every mutation.
///
/// # Implementations
///
/// - [`JsonBookmarkStore`](crate::storage::JsonBookmarkStore): JSON file with atomic writes
pub trait BookmarkStorage: Send + std::fmt::Debug {
    /// Reads the persisted list, replacing the in-memory one.
    ///
    /// Missing or malformed data yields an empty list; this never fails.
    fn load(&mut self) -> Vec<Bookmark>;

    /// Adds `record` at the end of the list and persists the list.
    ///
    /// Records whose id is already bookmarked are not added a second time and
    /// nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be written. The in-memory list is
    /// then left as it was before the call.
    fn add(&mut self, record: BookRecord) -> Result<&[Bookmark]>;

    /// Removes the bookmark with `id` and persists the list.
    ///
    /// Unknown ids are ignored and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be written; the bookmark stays.
    fn remove(&mut self, id: &str) -> Result<&[Bookmark]>;

    /// Current bookmarks in insertion order.
    fn bookmarks(&self) -> &[Bookmark];

    /// Whether a bookmark with `id` exists.
    fn contains(&self, id: &str) -> bool {
        self.bookmarks().iter().any(|b| b.book.id == id)
    }
}
