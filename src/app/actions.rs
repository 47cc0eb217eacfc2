//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij directly. It returns a list of
//! [`Action`]s and the plugin shim in `main.rs` turns each into the matching
//! host call.
//!
//! # Example
//!
//! ```rust
//! use libris::app::{Action, SearchRequest};
//!
//! let actions = vec![Action::Fetch(SearchRequest {
//!     request_id: 1,
//!     query: "Dune".to_string(),
//!     offset: 0,
//!     url: "https://www.googleapis.com/books/v1/volumes?q=Dune".to_string(),
//! })];
//! assert_eq!(actions.len(), 1);
//! ```

use super::controller::SearchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP GET for a search page.
    ///
    /// The runtime must echo `request_id` and `offset` back in the response
    /// context so the controller can discard stale responses.
    Fetch(SearchRequest),
}
