//! Error types for the Libris plugin.
//!
//! Two error families live here. [`SearchError`] is what the search controller
//! reports to the user; its `Display` output is the exact message shown in the
//! status line. [`LibrisError`] covers everything else (storage, I/O and
//! themes) and is mostly logged rather than displayed.

use thiserror::Error;

/// Failure of a single search or page action.
///
/// Every variant is terminal for the action that produced it only; the next
/// submit or page action starts from a clean slate.
///
/// # Examples
///
/// ```
/// use libris::domain::SearchError;
///
/// assert_eq!(SearchError::Validation.to_string(), "Please enter a search query.");
/// assert_eq!(SearchError::EmptyResult.to_string(), "No results found.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The submitted query was empty. No request is made.
    #[error("Please enter a search query.")]
    Validation,

    /// The request failed, returned a non-success status, or the body could
    /// not be parsed.
    ///
    /// `status` is `None` when the failure happened before a status was known
    /// (for example a body that is not JSON at all is still reported with its
    /// status). `reason` is kept for the logs only.
    #[error("Failed to fetch data.")]
    Transport {
        /// HTTP status code reported by the runtime, if any.
        status: Option<u16>,
        /// Diagnostic detail, never shown to the user.
        reason: String,
    },

    /// The request succeeded but no displayable items came back.
    #[error("No results found.")]
    EmptyResult,
}

impl SearchError {
    /// Builds a transport error from a status code and a reason.
    #[must_use]
    pub fn transport(status: Option<u16>, reason: impl Into<String>) -> Self {
        Self::Transport {
            status,
            reason: reason.into(),
        }
    }
}

/// The main error type for Libris operations outside the search flow.
#[derive(Debug, Error)]
pub enum LibrisError {
    /// Writing or reading the bookmark file failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The bookmark file exists but does not contain a bookmark list.
    ///
    /// Recovered locally by starting from an empty list.
    #[error("Malformed bookmark storage: {0}")]
    MalformedStorage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A search action failed.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// A specialized `Result` type for Libris operations.
pub type Result<T> = std::result::Result<T, LibrisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_hides_reason_from_display() {
        let err = SearchError::transport(Some(503), "upstream unavailable");
        assert_eq!(err.to_string(), "Failed to fetch data.");
        assert_ne!(err, SearchError::EmptyResult);
    }

    #[test]
    fn search_error_converts_into_crate_error() {
        let err: LibrisError = SearchError::EmptyResult.into();
        assert_eq!(err.to_string(), "No results found.");
    }
}
