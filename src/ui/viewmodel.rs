//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings, column widths and flags and
//! contain no business logic.

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Header title bar.
    pub header: HeaderInfo,

    /// Query or filter input box.
    pub input_bar: InputBarInfo,

    /// One-line status message (searching, errors, bookmark notices).
    pub status: Option<StatusLine>,

    /// Column widths for the table.
    pub columns: ColumnLayout,

    /// Rows visible in the current window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Page controls, present in the results view only.
    pub pagination: Option<PaginationInfo>,

    /// Keybinding hints.
    pub footer: FooterInfo,

    /// Message shown instead of the table when there are no rows.
    pub empty_state: Option<EmptyState>,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Title, already truncated to the title column.
    pub title: String,

    /// Comma-joined authors, already truncated to the authors column.
    pub authors: String,

    /// Third column text (relative save time in the bookmarks view).
    pub detail: String,

    /// Whether this row is selected.
    pub is_selected: bool,

    /// Whether the book is in the bookmark list.
    pub is_bookmarked: bool,

    /// Character ranges of `title` matched by the bookmark filter.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Column widths in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Width of the bookmark marker gutter.
    pub marker: usize,
    pub title: usize,
    pub authors: usize,
    pub detail: usize,
    /// Header label of the detail column, empty when unused.
    pub detail_label: &'static str,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Input box display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBarInfo {
    /// Field label, `"Search"` or `"Filter"`.
    pub label: &'static str,

    /// Current field text.
    pub text: String,

    /// Whether the field has keyboard focus (a cursor is drawn).
    pub is_focused: bool,
}

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Status line display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub kind: StatusKind,
}

/// Pagination control display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    /// One-based page number.
    pub page: u32,

    /// Human-readable position, e.g. `"results 13-24 of ~480"`.
    pub range_label: String,

    /// Whether the previous-page action is enabled.
    pub has_previous: bool,

    /// Whether the next-page action is enabled.
    pub has_next: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
