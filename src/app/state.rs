//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the state container for the plugin. It
//! owns the [`SearchController`], the bookmark store and every piece of
//! transient UI state (modes, text fields, selection, notices).
//!
//! # State Components
//!
//! - **Search**: committed query, page and results, held by the controller
//! - **Bookmarks**: the persisted list, held by the store
//! - **Filtered Bookmarks**: indices into the bookmark list matching the filter
//! - **Selection**: one cursor per view
//! - **Notice**: a transient message from the last bookmark operation
//!
//! # View Model Computation
//!
//! `compute_viewmodel` turns a state snapshot into a
//! [`UIViewModel`](crate::ui::viewmodel::UIViewModel): it windows the visible
//! rows around the selection, sizes columns to the terminal width, computes
//! filter highlights and picks the status and empty-state messages.

use super::controller::{SearchController, SearchPhase};
use super::modes::{InputMode, ViewMode};
use crate::domain::{BookRecord, Bookmark};
use crate::storage::BookmarkStorage;
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ColumnLayout, DisplayItem, EmptyState, FooterInfo, HeaderInfo, InputBarInfo, PaginationInfo,
    StatusKind, StatusLine, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Rows taken by everything except table rows: header, separator, input box
/// (3), status, column header, pagination, separator, footer.
const CHROME_ROWS: usize = 10;

/// Bookmark marker gutter width.
const MARKER_WIDTH: usize = 2;

/// Width of the "saved" column in the bookmarks view.
const SAVED_WIDTH: usize = 10;

/// Transient message shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input and host events.
/// View models are computed on demand from state snapshots.
#[derive(Debug)]
pub struct AppState {
    /// Search state machine. Owns the committed results.
    pub controller: SearchController,

    /// Bookmark persistence. Holds the authoritative in-memory list.
    pub bookmarks: Box<dyn BookmarkStorage>,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Which list is displayed.
    pub view_mode: ViewMode,

    /// Text in the search box. Only becomes the committed query on a
    /// successful response.
    pub query_input: String,

    /// Bookmark filter text.
    pub filter_query: String,

    /// Indices into the bookmark list that pass the filter, in list order.
    ///
    /// Recomputed by `apply_bookmark_filter()` after any bookmark change.
    pub filtered_bookmarks: Vec<usize>,

    /// Cursor within the current results page.
    pub results_selected: usize,

    /// Cursor within `filtered_bookmarks`.
    pub bookmarks_selected: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Message from the last bookmark operation, cleared on the next key.
    pub notice: Option<Notice>,
}

impl AppState {
    /// Creates state with an empty bookmark list.
    ///
    /// Bookmarks are read later by [`AppState::load_bookmarks`], once the
    /// host has granted filesystem access.
    #[must_use]
    pub fn new(controller: SearchController, bookmarks: Box<dyn BookmarkStorage>, theme: Theme) -> Self {
        Self {
            controller,
            bookmarks,
            input_mode: InputMode::Normal,
            view_mode: ViewMode::Results,
            query_input: String::new(),
            filter_query: String::new(),
            filtered_bookmarks: Vec::new(),
            results_selected: 0,
            bookmarks_selected: 0,
            theme,
            notice: None,
        }
    }

    /// Reads the bookmark list from storage and refreshes the filter.
    pub fn load_bookmarks(&mut self) {
        let loaded = self.bookmarks.load();
        tracing::info!(count = loaded.len(), "bookmarks loaded");
        self.apply_bookmark_filter();
    }

    /// Number of rows in the list currently on screen.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        match self.view_mode {
            ViewMode::Results => self.controller.state().results.len(),
            ViewMode::Bookmarks => self.filtered_bookmarks.len(),
        }
    }

    fn selection_mut(&mut self) -> &mut usize {
        match self.view_mode {
            ViewMode::Results => &mut self.results_selected,
            ViewMode::Bookmarks => &mut self.bookmarks_selected,
        }
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let selected = self.selection_mut();
        *selected = (*selected + 1) % len;
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let selected = self.selection_mut();
        *selected = if *selected == 0 { len - 1 } else { *selected - 1 };
    }

    #[must_use]
    pub fn selected_result(&self) -> Option<&BookRecord> {
        self.controller.state().results.get(self.results_selected)
    }

    #[must_use]
    pub fn selected_bookmark(&self) -> Option<&Bookmark> {
        self.filtered_bookmarks
            .get(self.bookmarks_selected)
            .and_then(|&i| self.bookmarks.bookmarks().get(i))
    }

    #[must_use]
    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.contains(id)
    }

    /// Recomputes `filtered_bookmarks` from the filter text.
    ///
    /// The filter is split on whitespace; a bookmark passes when every token
    /// fuzzy-matches its title and authors. An empty filter passes everything.
    pub fn apply_bookmark_filter(&mut self) {
        let all = self.bookmarks.bookmarks();

        let _span = tracing::debug_span!(
            "apply_bookmark_filter",
            total = all.len(),
            query_len = self.filter_query.len()
        )
        .entered();

        let tokens: Vec<String> = self
            .filter_query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        self.filtered_bookmarks = if tokens.is_empty() {
            (0..all.len()).collect()
        } else {
            let matcher = SkimMatcherV2::default();
            all.iter()
                .enumerate()
                .filter(|(_, bookmark)| {
                    let haystack =
                        format!("{} {}", bookmark.book.title, bookmark.book.author_line()).to_lowercase();
                    tokens.iter().all(|token| matcher.fuzzy_match(&haystack, token).is_some())
                })
                .map(|(i, _)| i)
                .collect()
        };

        self.bookmarks_selected = self
            .bookmarks_selected
            .min(self.filtered_bookmarks.len().saturating_sub(1));

        tracing::debug!(filtered = self.filtered_bookmarks.len(), "bookmark filter applied");
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let columns = self.compute_columns(cols);
        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);

        let (total, selected) = match self.view_mode {
            ViewMode::Results => (self.controller.state().results.len(), self.results_selected),
            ViewMode::Bookmarks => (self.filtered_bookmarks.len(), self.bookmarks_selected),
        };

        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(total);
        if visible_end - visible_start < available_rows && total >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let display_items = match self.view_mode {
            ViewMode::Results => self.controller.state().results[visible_start..visible_end]
                .iter()
                .enumerate()
                .map(|(offset, book)| {
                    self.compute_result_item(book, visible_start + offset == selected, &columns)
                })
                .collect(),
            ViewMode::Bookmarks => {
                let matcher = (!self.filter_query.trim().is_empty()).then(SkimMatcherV2::default);
                self.filtered_bookmarks[visible_start..visible_end]
                    .iter()
                    .enumerate()
                    .filter_map(|(offset, &i)| {
                        let bookmark = self.bookmarks.bookmarks().get(i)?;
                        Some(self.compute_bookmark_item(
                            bookmark,
                            visible_start + offset == selected,
                            &columns,
                            matcher.as_ref(),
                        ))
                    })
                    .collect()
            }
        };

        UIViewModel {
            header: self.compute_header(),
            input_bar: self.compute_input_bar(),
            status: self.compute_status(),
            columns,
            display_items,
            selected_index: selected.saturating_sub(visible_start),
            pagination: self.compute_pagination(),
            footer: self.compute_footer(),
            empty_state: (total == 0).then(|| self.compute_empty_state()),
        }
    }

    fn compute_columns(&self, cols: usize) -> ColumnLayout {
        let (detail, detail_label) = match self.view_mode {
            ViewMode::Results => (0, ""),
            ViewMode::Bookmarks => (SAVED_WIDTH, "SAVED"),
        };
        let usable = cols.saturating_sub(MARKER_WIDTH + detail + 2);
        let title = usable * 55 / 100;

        ColumnLayout {
            marker: MARKER_WIDTH,
            title,
            authors: usable - title,
            detail,
            detail_label,
        }
    }

    fn compute_result_item(&self, book: &BookRecord, is_selected: bool, columns: &ColumnLayout) -> DisplayItem {
        DisplayItem {
            title: truncate(&book.title, columns.title.saturating_sub(1)),
            authors: truncate(&book.author_line(), columns.authors.saturating_sub(1)),
            detail: String::new(),
            is_selected,
            is_bookmarked: self.is_bookmarked(&book.id),
            highlight_ranges: Vec::new(),
        }
    }

    fn compute_bookmark_item(
        &self,
        bookmark: &Bookmark,
        is_selected: bool,
        columns: &ColumnLayout,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        let title = truncate(&bookmark.book.title, columns.title.saturating_sub(1));
        let visible_chars = title.chars().count();

        let highlight_ranges = matcher
            .map(|m| self.compute_highlight_ranges(&bookmark.book.title, m))
            .unwrap_or_default()
            .into_iter()
            .filter(|&(start, _)| start < visible_chars)
            .map(|(start, end)| (start, end.min(visible_chars)))
            .collect();

        DisplayItem {
            title,
            authors: truncate(&bookmark.book.author_line(), columns.authors.saturating_sub(1)),
            detail: bookmark.saved_ago(),
            is_selected,
            is_bookmarked: true,
            highlight_ranges,
        }
    }

    /// Coalesces the matcher's character indices into `(start, end)` runs.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        let Some((_score, indices)) = matcher.fuzzy_indices(text, self.filter_query.trim()) else {
            return Vec::new();
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.view_mode {
            ViewMode::Results => {
                let search = self.controller.state();
                if search.query.is_empty() {
                    " Libris | Google Books ".to_string()
                } else {
                    format!(" Libris | \"{}\" ({}) ", search.query, search.results.len())
                }
            }
            ViewMode::Bookmarks => format!(
                " Libris | Bookmarks ({}/{}) ",
                self.filtered_bookmarks.len(),
                self.bookmarks.bookmarks().len()
            ),
        };
        HeaderInfo { title }
    }

    fn compute_input_bar(&self) -> InputBarInfo {
        match self.view_mode {
            ViewMode::Results => InputBarInfo {
                label: "Search",
                text: self.query_input.clone(),
                is_focused: self.input_mode == InputMode::Query,
            },
            ViewMode::Bookmarks => InputBarInfo {
                label: "Filter",
                text: self.filter_query.clone(),
                is_focused: self.input_mode == InputMode::Filter,
            },
        }
    }

    /// Picks the status line: a notice wins, then an in-flight search, then
    /// the controller's error.
    fn compute_status(&self) -> Option<StatusLine> {
        if let Some(notice) = &self.notice {
            return Some(StatusLine {
                message: notice.message.clone(),
                kind: if notice.is_error { StatusKind::Error } else { StatusKind::Info },
            });
        }

        if self.view_mode == ViewMode::Bookmarks {
            return None;
        }

        if self.controller.is_searching() {
            return Some(StatusLine {
                message: "Searching...".to_string(),
                kind: StatusKind::Info,
            });
        }

        self.controller.state().error.as_ref().map(|error| StatusLine {
            message: error.to_string(),
            kind: StatusKind::Error,
        })
    }

    fn compute_pagination(&self) -> Option<PaginationInfo> {
        if self.view_mode != ViewMode::Results {
            return None;
        }

        let search = self.controller.state();
        let range_label = if search.results.is_empty() {
            String::new()
        } else {
            let first = u64::from(search.offset) + 1;
            let last = u64::from(search.offset) + search.last_fetched as u64;
            match search.total_items {
                Some(total) => format!("results {first}-{last} of ~{total}"),
                None => format!("results {first}-{last}"),
            }
        };

        Some(PaginationInfo {
            page: self.controller.page_number() + 1,
            range_label,
            has_previous: self.controller.can_go_previous(),
            has_next: self.controller.can_go_next(),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.view_mode) {
            (InputMode::Query, _) => "Enter: search  Esc: done  Ctrl+n/p: navigate  Type to edit query",
            (InputMode::Filter, _) => "Enter: done  Esc: clear filter  Ctrl+n/p: navigate  Type to filter",
            (InputMode::Normal, ViewMode::Results) => {
                "/: search  j/k: navigate  b: bookmark  n/p: page  Tab: bookmarks  q: quit"
            }
            (InputMode::Normal, ViewMode::Bookmarks) => {
                "/: filter  j/k: navigate  d: remove  Tab: results  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        let (message, subtitle) = match self.view_mode {
            ViewMode::Results => match self.controller.phase() {
                SearchPhase::Idle => ("Search Google Books", "Press / and type a title or author"),
                SearchPhase::Searching => ("Searching...", "Waiting for Google Books"),
                _ => ("Nothing to show", "Press / to try another query"),
            },
            ViewMode::Bookmarks if self.bookmarks.bookmarks().is_empty() => {
                ("No bookmarks yet", "Press b on a search result to save it")
            }
            ViewMode::Bookmarks => ("No bookmarks match the filter", "Esc clears the filter"),
        };

        EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchClient, SearchPage};
    use crate::storage::JsonBookmarkStore;

    fn book(id: &str, title: &str, author: &str) -> BookRecord {
        BookRecord::new(id, title, vec![author.to_string()], Some("http://t".to_string()))
    }

    fn state_in(dir: &tempfile::TempDir) -> AppState {
        let store = JsonBookmarkStore::new(dir.path().join("bookmarks.json"));
        let mut state = AppState::new(
            SearchController::new(SearchClient::default()),
            Box::new(store),
            Theme::default(),
        );
        state.load_bookmarks();
        state
    }

    fn with_results(state: &mut AppState, books: Vec<BookRecord>) {
        let req = state.controller.submit_query("Dune").unwrap();
        let fetched = books.len();
        state.controller.complete(
            req.request_id,
            Ok(SearchPage {
                books,
                fetched,
                total_items: Some(480),
            }),
        );
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        with_results(&mut state, vec![book("a", "A", "X"), book("b", "B", "Y")]);

        state.move_selection_up();
        assert_eq!(state.results_selected, 1);
        state.move_selection_down();
        assert_eq!(state.results_selected, 0);
    }

    #[test]
    fn filter_matches_title_or_author() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.bookmarks.add(book("1", "Dune", "Frank Herbert")).unwrap();
        state.bookmarks.add(book("2", "Emma", "Jane Austen")).unwrap();

        state.filter_query = "austen".to_string();
        state.apply_bookmark_filter();
        assert_eq!(state.filtered_bookmarks, vec![1]);

        state.filter_query = "dune herb".to_string();
        state.apply_bookmark_filter();
        assert_eq!(state.filtered_bookmarks, vec![0]);

        state.filter_query.clear();
        state.apply_bookmark_filter();
        assert_eq!(state.filtered_bookmarks, vec![0, 1]);
    }

    #[test]
    fn viewmodel_windows_around_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        let books = (0..12).map(|i| book(&i.to_string(), &format!("Book {i}"), "A")).collect();
        with_results(&mut state, books);
        state.results_selected = 11;

        let vm = state.compute_viewmodel(CHROME_ROWS + 4, 80);
        assert_eq!(vm.display_items.len(), 4);
        assert_eq!(vm.display_items[3].title, "Book 11");
        assert_eq!(vm.selected_index, 3);
        assert!(vm.display_items[3].is_selected);
    }

    #[test]
    fn viewmodel_reports_pagination_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        let books = (0..12).map(|i| book(&i.to_string(), "T", "A")).collect();
        with_results(&mut state, books);

        let pagination = state.compute_viewmodel(30, 80).pagination.unwrap();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.range_label, "results 1-12 of ~480");
        assert!(pagination.has_next);
        assert!(!pagination.has_previous);
    }

    #[test]
    fn bookmarked_results_are_marked() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        with_results(&mut state, vec![book("a", "Dune", "X"), book("b", "Emma", "Y")]);
        state.bookmarks.add(book("b", "Emma", "Y")).unwrap();

        let vm = state.compute_viewmodel(30, 80);
        assert!(!vm.display_items[0].is_bookmarked);
        assert!(vm.display_items[1].is_bookmarked);
    }

    #[test]
    fn status_shows_controller_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        let _ = state.controller.submit_query("   ");

        let status = state.compute_viewmodel(30, 80).status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.message, "Please enter a search query.");
    }

    #[test]
    fn notice_takes_priority_over_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        let _ = state.controller.submit_query("");
        state.notice = Some(Notice::info("Saved \"Dune\""));

        let status = state.compute_viewmodel(30, 80).status.unwrap();
        assert_eq!(status.kind, StatusKind::Info);
    }

    #[test]
    fn empty_bookmarks_view_explains_itself() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.view_mode = ViewMode::Bookmarks;

        let vm = state.compute_viewmodel(30, 80);
        assert!(vm.pagination.is_none());
        assert_eq!(vm.empty_state.unwrap().message, "No bookmarks yet");
    }

    #[test]
    fn filter_highlights_are_clamped_to_visible_title() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state
            .bookmarks
            .add(book("1", "The Left Hand of Darkness and Other Very Long Subtitles", "Le Guin"))
            .unwrap();
        state.view_mode = ViewMode::Bookmarks;
        state.filter_query = "subtitles".to_string();
        state.apply_bookmark_filter();

        let vm = state.compute_viewmodel(30, 40);
        let item = &vm.display_items[0];
        let visible = item.title.chars().count();
        assert!(item.highlight_ranges.iter().all(|&(s, e)| s < e && e <= visible));
    }
}
