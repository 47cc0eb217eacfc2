//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox `/host` points at the directory Zellij was started from
//! (usually the user's home), so user-facing `~` paths are rewritten onto it.

use std::path::PathBuf;

/// File name of the bookmark list inside the data directory.
pub const BOOKMARKS_FILE_NAME: &str = "bookmarks.json";

/// Returns the data directory for Libris files.
///
/// Resolves to `/host/.local/share/zellij/libris`, which is
/// `~/.local/share/zellij/libris` on the host when Zellij was started from the
/// home directory. Bookmarks and trace files are kept here.
///
/// # Examples
///
/// ```
/// use libris::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/libris"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("libris")
}

/// Resolves the bookmark file location.
///
/// A configured path wins (with `~` expanded); otherwise the file sits in the
/// data directory.
///
/// # Examples
///
/// ```
/// use libris::infrastructure::bookmarks_file;
///
/// assert_eq!(
///     bookmarks_file(Some("~/books/saved.json")).to_str(),
///     Some("/host/books/saved.json")
/// );
/// assert!(bookmarks_file(None).ends_with("libris/bookmarks.json"));
/// ```
#[must_use]
pub fn bookmarks_file(configured: Option<&str>) -> PathBuf {
    configured
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map_or_else(
            || get_data_dir().join(BOOKMARKS_FILE_NAME),
            |p| PathBuf::from(expand_tilde(p)),
        )
}

/// Expands tilde paths to use the `/host` prefix for the Zellij sandbox.
///
/// # Examples
///
/// ```
/// use libris::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
