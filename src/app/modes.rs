//! Input and view mode state types for the application.
//!
//! These enums decide how keys are interpreted and which list is on screen.
//!
//! # State Machine
//!
//! Input modes:
//! - **Normal**: navigation and commands
//! - **Query**: typing into the search box (results view)
//! - **Filter**: typing into the bookmark filter (bookmarks view)
//!
//! View modes:
//! - **Results**: the current page of search results
//! - **Bookmarks**: the saved bookmark list

/// Current input handling mode.
///
/// Controls which keybindings are active and which text field receives
/// characters. Determines the displayed footer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,

    /// Editing the search query. Enter submits, Esc leaves the field.
    Query,

    /// Editing the bookmark filter. Results narrow as the user types.
    Filter,
}

impl InputMode {
    /// Whether a text field currently has focus.
    #[must_use]
    pub const fn is_editing(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// Which list is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Search results for the committed query.
    Results,

    /// Saved bookmarks, optionally narrowed by the filter.
    Bookmarks,
}
