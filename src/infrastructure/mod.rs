//! Infrastructure layer for filesystem and environment interactions.
//!
//! Zellij runs plugins in a sandbox where the host filesystem is mounted under
//! `/host`. Everything that needs to know about that mapping lives here.

pub mod paths;

pub use paths::{bookmarks_file, expand_tilde, get_data_dir};
