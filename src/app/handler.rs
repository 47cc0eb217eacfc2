//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point for everything that happens to
//! the plugin: key presses (already decoded into [`Event`]s by `main.rs`),
//! permission results and search responses. It mutates [`AppState`] and
//! returns whether a re-render is needed plus the [`Action`]s the runtime
//! must perform.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `SwitchView`
//! - **Input**: `FocusInput`, `Char`, `Backspace`, `Submit`, `Escape`
//! - **Search**: `NextPage`, `PreviousPage`, `SearchResponse`
//! - **Bookmarks**: `ToggleBookmark`
//! - **System**: `PermissionsGranted`, `PermissionsDenied`, `CloseFocus`
//!
//! # Example
//!
//! ```rust
//! use libris::app::{handle_event, Action, AppState, Event, SearchController};
//! use libris::search::SearchClient;
//! use libris::storage::JsonBookmarkStore;
//! use libris::ui::Theme;
//!
//! let store = JsonBookmarkStore::new(std::env::temp_dir().join("libris-doc.json"));
//! let mut state = AppState::new(
//!     SearchController::new(SearchClient::default()),
//!     Box::new(store),
//!     Theme::default(),
//! );
//!
//! state.query_input = "Dune".to_string();
//! let (_render, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! # Ok::<(), libris::domain::LibrisError>(())
//! ```

use super::modes::{InputMode, ViewMode};
use super::state::Notice;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::search::SearchClient;

const SAVE_FAILED: &str = "Failed to save bookmarks.";

/// Events triggered by user input or by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor down (wraps to top).
    KeyDown,
    /// Moves the cursor up (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Focuses the text field of the current view: the query box in the
    /// results view, the filter box in the bookmarks view.
    FocusInput,
    /// Types a character into the focused field.
    Char(char),
    /// Deletes the last character of the focused field.
    Backspace,
    /// Submits the query (results view) or accepts the filter (bookmarks view).
    Submit,
    /// Leaves the focused field. Clears the filter when filtering.
    Escape,
    NextPage,
    PreviousPage,
    /// Bookmarks or un-bookmarks the selected result; in the bookmarks view
    /// removes the selected bookmark.
    ToggleBookmark,
    /// Flips between the results and bookmarks views.
    SwitchView,
    /// Filesystem access was granted; bookmarks can be read.
    PermissionsGranted,
    PermissionsDenied,
    /// A search HTTP response arrived.
    SearchResponse {
        /// Tag of the request this answers.
        request_id: u64,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },
}

impl Event {
    const fn is_user_input(&self) -> bool {
        !matches!(
            self,
            Self::SearchResponse { .. } | Self::PermissionsGranted | Self::PermissionsDenied
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the screen must be redrawn.
///
/// # Errors
///
/// Currently every failure is absorbed into state (an error in the search
/// state or a notice); the `Result` leaves room for failures that must reach
/// the runtime.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventKind(event)).entered();

    if event.is_user_input() {
        state.notice = None;
    }

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::FocusInput => {
            state.input_mode = match state.view_mode {
                ViewMode::Results => InputMode::Query,
                ViewMode::Bookmarks => InputMode::Filter,
            };
            tracing::debug!(mode = ?state.input_mode, "input focused");
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            match state.input_mode {
                InputMode::Normal => return Ok((false, vec![])),
                InputMode::Query => state.query_input.push(*c),
                InputMode::Filter => {
                    state.filter_query.push(*c);
                    state.apply_bookmark_filter();
                }
            }
            Ok((true, vec![]))
        }
        Event::Backspace => {
            match state.input_mode {
                InputMode::Normal => return Ok((false, vec![])),
                InputMode::Query => {
                    state.query_input.pop();
                }
                InputMode::Filter => {
                    state.filter_query.pop();
                    state.apply_bookmark_filter();
                }
            }
            Ok((true, vec![]))
        }
        Event::Submit => {
            if state.view_mode == ViewMode::Bookmarks {
                state.input_mode = InputMode::Normal;
                return Ok((true, vec![]));
            }

            state.input_mode = InputMode::Normal;
            match state.controller.submit_query(&state.query_input) {
                Ok(request) => {
                    state.query_input.clone_from(&request.query);
                    Ok((true, vec![Action::Fetch(request)]))
                }
                Err(error) => {
                    tracing::debug!(error = %error, "query rejected");
                    Ok((true, vec![]))
                }
            }
        }
        Event::Escape => {
            if state.input_mode == InputMode::Filter || state.view_mode == ViewMode::Bookmarks {
                state.filter_query.clear();
                state.apply_bookmark_filter();
            }
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::NextPage => {
            if state.view_mode != ViewMode::Results {
                return Ok((false, vec![]));
            }
            Ok(state
                .controller
                .next_page()
                .map_or((false, vec![]), |request| (true, vec![Action::Fetch(request)])))
        }
        Event::PreviousPage => {
            if state.view_mode != ViewMode::Results {
                return Ok((false, vec![]));
            }
            Ok(state
                .controller
                .previous_page()
                .map_or((false, vec![]), |request| (true, vec![Action::Fetch(request)])))
        }
        Event::ToggleBookmark => {
            toggle_bookmark(state);
            Ok((true, vec![]))
        }
        Event::SwitchView => {
            state.input_mode = InputMode::Normal;
            state.view_mode = match state.view_mode {
                ViewMode::Results => ViewMode::Bookmarks,
                ViewMode::Bookmarks => ViewMode::Results,
            };
            if state.view_mode == ViewMode::Bookmarks {
                state.apply_bookmark_filter();
            }
            Ok((true, vec![]))
        }
        Event::PermissionsGranted => {
            state.load_bookmarks();
            Ok((true, vec![]))
        }
        Event::PermissionsDenied => {
            tracing::warn!("permissions denied");
            state.notice = Some(Notice::error(
                "Permissions denied: search and bookmarks are unavailable.",
            ));
            Ok((true, vec![]))
        }
        Event::SearchResponse {
            request_id,
            status,
            body,
        } => {
            let outcome = SearchClient::parse_response(*status, body);
            let succeeded = outcome.is_ok();
            if state.controller.complete(*request_id, outcome) {
                state.results_selected = 0;
                // A failed fetch leaves the box holding what the user typed so Enter retries it.
                if succeeded && state.input_mode == InputMode::Normal && state.view_mode == ViewMode::Results {
                    state.query_input.clone_from(&state.controller.state().query);
                }
                Ok((true, vec![]))
            } else {
                Ok((false, vec![]))
            }
        }
    }
}

/// Adds or removes the selected book, leaving a notice either way.
fn toggle_bookmark(state: &mut AppState) {
    let record = match state.view_mode {
        ViewMode::Results => state.selected_result().cloned(),
        ViewMode::Bookmarks => state.selected_bookmark().map(|b| b.book.clone()),
    };

    let Some(record) = record else {
        tracing::debug!("nothing selected to bookmark");
        return;
    };

    let title = record.title.clone();
    let outcome = if state.is_bookmarked(&record.id) {
        state
            .bookmarks
            .remove(&record.id)
            .map(|_| format!("Removed \"{title}\""))
    } else {
        state
            .bookmarks
            .add(record)
            .map(|_| format!("Saved \"{title}\""))
    };

    state.notice = Some(match outcome {
        Ok(message) => Notice::info(message),
        Err(e) => {
            tracing::error!(error = %e, "bookmark write failed");
            Notice::error(SAVE_FAILED)
        }
    });

    state.apply_bookmark_filter();
}

/// Debug view of an event that leaves response bodies out of span fields.
struct EventKind<'a>(&'a Event);

impl std::fmt::Debug for EventKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::SearchResponse {
                request_id, status, body,
            } => write!(f, "SearchResponse(id={request_id}, status={status}, {} bytes)", body.len()),
            other => write!(f, "{other:?}"),
        }
    }
}
