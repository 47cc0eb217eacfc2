//! Search-and-paginate controller.
//!
//! [`SearchController`] owns the committed query, page offset and result set,
//! plus the one request that is currently in flight. Every transition goes
//! through its methods; the rest of the application only reads snapshots via
//! [`SearchController::state`] and [`SearchController::phase`].
//!
//! # Phases
//!
//! ```text
//!            submit ok                 response: books
//!   Idle ──────────────► Searching ─────────────────────► Results
//!     │                    │   │     response: no books
//!     │ submit ""          │   └────────────────────────► NoResults
//!     ▼                    │         response: failure
//!   Failed ◄───────────────┘
//! ```
//!
//! # Request tagging
//!
//! Each issued request gets a fresh, strictly increasing id. A response is
//! only committed when its id matches the latest issued request; anything else
//! is stale and dropped. Issuing a new request while one is in flight
//! supersedes the old one.
//!
//! # Commit policy
//!
//! The query and offset move only when a response is committed, so paging
//! always continues from what is on screen. A failed request keeps the
//! previous results, query and offset and only sets the error.

use crate::domain::{BookRecord, SearchError};
use crate::search::{SearchClient, SearchPage};

/// A request the runtime should issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Tag echoed back with the response.
    pub request_id: u64,
    /// Query text being searched.
    pub query: String,
    /// Zero-based index of the first requested result.
    pub offset: u32,
    /// Fully built GET URL.
    pub url: String,
}

/// Coarse state of the controller, derived from [`SearchState`] and the
/// in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing searched yet.
    Idle,
    /// A request is in flight.
    Searching,
    /// A non-empty page is displayed.
    Results,
    /// The last committed search returned nothing displayable.
    NoResults,
    /// The last action failed validation or transport.
    Failed,
}

/// Read-only snapshot of the committed search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Query of the displayed results. Reused by page navigation.
    pub query: String,
    /// Offset of the displayed page; always a multiple of the page size.
    pub offset: u32,
    /// Displayed results in API order.
    pub results: Vec<BookRecord>,
    /// Raw item count of the displayed page, before the display filter.
    pub last_fetched: usize,
    /// The API's total match estimate for the committed query.
    pub total_items: Option<u64>,
    /// Error from the most recent action, if it failed.
    pub error: Option<SearchError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingRequest {
    request_id: u64,
    query: String,
    offset: u32,
}

/// The search state machine.
#[derive(Debug, Clone)]
pub struct SearchController {
    client: SearchClient,
    state: SearchState,
    pending: Option<PendingRequest>,
    last_request_id: u64,
}

impl SearchController {
    #[must_use]
    pub fn new(client: SearchClient) -> Self {
        Self {
            client,
            state: SearchState::default(),
            pending: None,
            last_request_id: 0,
        }
    }

    /// Committed state for rendering.
    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.client.page_size()
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        if self.pending.is_some() {
            return SearchPhase::Searching;
        }

        match &self.state.error {
            Some(SearchError::EmptyResult) => SearchPhase::NoResults,
            Some(_) => SearchPhase::Failed,
            None if self.state.results.is_empty() => SearchPhase::Idle,
            None => SearchPhase::Results,
        }
    }

    /// Zero-based page number of the displayed results.
    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.state.offset / self.page_size().max(1)
    }

    /// Whether `next_page` would issue a request.
    ///
    /// True only when results are displayed and the last page came back full;
    /// a short page is taken as the end of the results.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        !self.state.results.is_empty() && self.state.last_fetched >= self.page_size() as usize
    }

    /// Whether `previous_page` would issue a request.
    #[must_use]
    pub const fn can_go_previous(&self) -> bool {
        self.state.offset > 0
    }

    /// Starts a new search for `text` from the first page.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Validation`] (and records it as the current error)
    /// when `text` is empty or whitespace. No request is produced then, and
    /// any in-flight request is abandoned so its response is dropped as stale.
    pub fn submit_query(&mut self, text: &str) -> Result<SearchRequest, SearchError> {
        let query = text.trim();

        if query.is_empty() {
            if let Some(abandoned) = self.pending.take() {
                tracing::debug!(request_id = abandoned.request_id, "abandoning in-flight search");
            }
            tracing::debug!("rejecting empty query");
            self.state.error = Some(SearchError::Validation);
            return Err(SearchError::Validation);
        }

        Ok(self.issue(query.to_string(), 0))
    }

    /// Requests the page after the displayed one. `None` when disabled.
    pub fn next_page(&mut self) -> Option<SearchRequest> {
        if !self.can_go_next() {
            tracing::debug!(offset = self.state.offset, "next page disabled");
            return None;
        }

        let offset = self.state.offset.saturating_add(self.page_size());
        Some(self.issue(self.state.query.clone(), offset))
    }

    /// Requests the page before the displayed one. `None` at the first page.
    pub fn previous_page(&mut self) -> Option<SearchRequest> {
        if !self.can_go_previous() {
            tracing::debug!("previous page disabled at offset 0");
            return None;
        }

        let offset = self.state.offset.saturating_sub(self.page_size());
        Some(self.issue(self.state.query.clone(), offset))
    }

    /// Applies the outcome of request `request_id`.
    ///
    /// Returns `true` when the outcome was committed and `false` when it was
    /// stale and dropped.
    pub fn complete(&mut self, request_id: u64, outcome: Result<SearchPage, SearchError>) -> bool {
        let pending = match self.pending.take() {
            Some(pending) if pending.request_id == request_id => pending,
            other => {
                self.pending = other;
                tracing::debug!(
                    request_id = request_id,
                    latest_request_id = self.last_request_id,
                    "discarding stale search response"
                );
                return false;
            }
        };

        match outcome {
            Ok(page) => {
                tracing::debug!(
                    request_id = request_id,
                    query = %pending.query,
                    offset = pending.offset,
                    books = page.books.len(),
                    "committing search page"
                );

                self.state.error = page.books.is_empty().then_some(SearchError::EmptyResult);
                self.state.query = pending.query;
                self.state.offset = pending.offset;
                self.state.results = page.books;
                self.state.last_fetched = page.fetched;
                self.state.total_items = page.total_items;
            }
            Err(error) => {
                if let SearchError::Transport { status, reason } = &error {
                    tracing::warn!(
                        request_id = request_id,
                        status = ?status,
                        reason = %reason,
                        "search request failed"
                    );
                }
                self.state.error = Some(error);
            }
        }

        true
    }

    fn issue(&mut self, query: String, offset: u32) -> SearchRequest {
        self.last_request_id += 1;
        let request_id = self.last_request_id;

        if let Some(superseded) = &self.pending {
            tracing::debug!(
                superseded_request_id = superseded.request_id,
                request_id = request_id,
                "superseding in-flight search"
            );
        }

        let url = self.client.request_url(&query, offset);
        self.pending = Some(PendingRequest {
            request_id,
            query: query.clone(),
            offset,
        });

        tracing::debug!(request_id = request_id, query = %query, offset = offset, "issuing search");

        SearchRequest {
            request_id,
            query,
            offset,
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::PAGE_SIZE;

    fn book(id: &str) -> BookRecord {
        BookRecord::new(id, format!("Title {id}"), vec!["Author".into()], Some("http://t".into()))
    }

    fn page(count: usize) -> SearchPage {
        SearchPage {
            books: (0..count).map(|i| book(&i.to_string())).collect(),
            fetched: count,
            total_items: Some(100),
        }
    }

    fn controller() -> SearchController {
        SearchController::new(SearchClient::default())
    }

    #[test]
    fn starts_idle() {
        let c = controller();
        assert_eq!(c.phase(), SearchPhase::Idle);
        assert!(!c.can_go_next());
        assert!(!c.can_go_previous());
    }

    #[test]
    fn empty_queries_never_issue_requests() {
        for text in ["", " ", "\t\n"] {
            let mut c = controller();
            assert_eq!(c.submit_query(text), Err(SearchError::Validation));
            assert!(!c.is_searching());
            assert_eq!(c.phase(), SearchPhase::Failed);
            assert_eq!(
                c.state().error.as_ref().map(ToString::to_string).as_deref(),
                Some("Please enter a search query.")
            );
        }
    }

    #[test]
    fn empty_submit_while_searching_fails_and_drops_late_response() {
        let mut c = controller();
        let req = c.submit_query("Dune").unwrap();

        assert_eq!(c.submit_query("   "), Err(SearchError::Validation));
        assert_eq!(c.phase(), SearchPhase::Failed);

        assert!(!c.complete(req.request_id, Ok(page(12))));
        assert_eq!(c.phase(), SearchPhase::Failed);
        assert_eq!(c.state().error, Some(SearchError::Validation));
        assert!(c.state().results.is_empty());
    }

    #[test]
    fn full_first_page_enables_next_only() {
        let mut c = controller();
        let req = c.submit_query("Dune").unwrap();
        assert_eq!(req.offset, 0);
        assert_eq!(c.phase(), SearchPhase::Searching);

        assert!(c.complete(req.request_id, Ok(page(PAGE_SIZE as usize))));

        assert_eq!(c.phase(), SearchPhase::Results);
        assert_eq!(c.state().results.len(), 12);
        assert!(c.can_go_next());
        assert!(!c.can_go_previous());
    }

    #[test]
    fn no_results_sets_soft_error() {
        let mut c = controller();
        let req = c.submit_query("zzzznotabook").unwrap();
        c.complete(req.request_id, Ok(SearchPage::default()));

        assert_eq!(c.phase(), SearchPhase::NoResults);
        assert_eq!(
            c.state().error.as_ref().map(ToString::to_string).as_deref(),
            Some("No results found.")
        );
        assert!(!c.can_go_next());
    }

    #[test]
    fn fully_filtered_page_is_empty_result() {
        let mut c = controller();
        let req = c.submit_query("pamphlets").unwrap();
        let filtered = SearchPage {
            books: vec![],
            fetched: 12,
            total_items: Some(40),
        };
        c.complete(req.request_id, Ok(filtered));

        assert_eq!(c.state().error, Some(SearchError::EmptyResult));
        assert!(c.state().results.is_empty());
    }

    #[test]
    fn short_page_disables_next() {
        let mut c = controller();
        let req = c.submit_query("Dune").unwrap();
        c.complete(req.request_id, Ok(page(5)));

        assert!(!c.can_go_next());
        assert_eq!(c.next_page(), None);
    }

    #[test]
    fn previous_at_first_page_is_a_noop() {
        let mut c = controller();
        let req = c.submit_query("Dune").unwrap();
        c.complete(req.request_id, Ok(page(12)));

        let before = c.state().clone();
        assert_eq!(c.previous_page(), None);
        assert_eq!(c.state(), &before);
        assert!(!c.is_searching());
    }

    #[test]
    fn paging_moves_by_page_size_with_committed_query() {
        let mut c = controller();
        let req = c.submit_query("  Dune ").unwrap();
        assert_eq!(req.query, "Dune");
        c.complete(req.request_id, Ok(page(12)));

        let next = c.next_page().unwrap();
        assert_eq!(next.offset, 12);
        assert_eq!(next.query, "Dune");
        assert!(next.url.contains("startIndex=12"));
        c.complete(next.request_id, Ok(page(12)));
        assert_eq!(c.state().offset, 12);
        assert_eq!(c.page_number(), 1);
        assert!(c.can_go_previous());

        let prev = c.previous_page().unwrap();
        assert_eq!(prev.offset, 0);
        c.complete(prev.request_id, Ok(page(12)));
        assert_eq!(c.state().offset, 0);
    }

    #[test]
    fn failure_keeps_previous_results() {
        let mut c = controller();
        let req = c.submit_query("Dune").unwrap();
        c.complete(req.request_id, Ok(page(12)));

        let next = c.next_page().unwrap();
        c.complete(next.request_id, Err(SearchError::transport(Some(500), "boom")));

        assert_eq!(c.phase(), SearchPhase::Failed);
        assert_eq!(c.state().results.len(), 12);
        assert_eq!(c.state().offset, 0);
        assert_eq!(
            c.state().error.as_ref().map(ToString::to_string).as_deref(),
            Some("Failed to fetch data.")
        );
    }

    #[test]
    fn success_after_failure_clears_error() {
        let mut c = controller();
        let req = c.submit_query("Dune").unwrap();
        c.complete(req.request_id, Err(SearchError::transport(None, "offline")));

        let retry = c.submit_query("Dune").unwrap();
        c.complete(retry.request_id, Ok(page(3)));
        assert_eq!(c.state().error, None);
        assert_eq!(c.phase(), SearchPhase::Results);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut c = controller();
        let first = c.submit_query("Dune").unwrap();
        let second = c.submit_query("Emma").unwrap();
        assert!(second.request_id > first.request_id);

        assert!(c.complete(second.request_id, Ok(page(2))));
        assert!(!c.complete(first.request_id, Ok(page(12))));

        assert_eq!(c.state().query, "Emma");
        assert_eq!(c.state().results.len(), 2);
    }

    #[test]
    fn superseded_request_is_dropped_even_if_it_lands_first() {
        let mut c = controller();
        let first = c.submit_query("Dune").unwrap();
        let second = c.submit_query("Emma").unwrap();

        assert!(!c.complete(first.request_id, Ok(page(12))));
        assert!(c.is_searching());
        assert!(c.complete(second.request_id, Ok(page(1))));
        assert_eq!(c.state().query, "Emma");
    }

    #[test]
    fn validation_error_keeps_results_on_screen() {
        let mut c = controller();
        let req = c.submit_query("Dune").unwrap();
        c.complete(req.request_id, Ok(page(12)));

        assert!(c.submit_query("").is_err());
        assert_eq!(c.state().results.len(), 12);
        assert_eq!(c.state().query, "Dune");
    }
}
