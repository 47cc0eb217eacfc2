//! Storage layer for persistent bookmarks.
//!
//! Bookmarks live in a single JSON file that holds the full ordered list. The
//! list is read once at startup and rewritten wholesale after every change.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation

pub mod backend;
pub mod json;

pub use backend::BookmarkStorage;
pub use json::JsonBookmarkStore;
