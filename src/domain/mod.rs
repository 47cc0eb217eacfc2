//! Domain layer for the Libris plugin.
//!
//! Core types shared by every other layer: the book record returned by the
//! search API, the bookmark entry kept on disk, and the error types. Nothing in
//! here knows about Zellij or the filesystem.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Book record and bookmark models
//!
//! # Examples
//!
//! ```
//! use libris::domain::{BookRecord, Bookmark};
//!
//! let book = BookRecord::new("abc123", "Dune", vec!["Frank Herbert".to_string()], None);
//! let bookmark = Bookmark::new(book);
//! assert_eq!(bookmark.book.id, "abc123");
//! ```

pub mod book;
pub mod error;

pub use book::{BookRecord, Bookmark};
pub use error::{LibrisError, Result, SearchError};
