//! URL construction and response parsing for the volumes endpoint.

use super::models::VolumesResponse;
use crate::domain::{BookRecord, SearchError};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Default Google Books volumes endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";

/// Number of results requested per page.
pub const PAGE_SIZE: u32 = 12;

/// One parsed page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Displayable records in response order.
    pub books: Vec<BookRecord>,

    /// Number of items the API returned before the display filter ran.
    ///
    /// Used for end-of-results detection: a page that fetched fewer than
    /// [`PAGE_SIZE`] items is the last one.
    pub fetched: usize,

    /// The API's estimate of the total number of matches.
    pub total_items: Option<u64>,
}

/// Builds requests for, and parses responses from, the volumes endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchClient {
    endpoint: String,
    api_key: Option<String>,
    page_size: u32,
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, None)
    }
}

impl SearchClient {
    /// Creates a client for `endpoint`. Blank API keys are treated as absent.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            page_size: PAGE_SIZE,
        }
    }

    /// Results requested per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Builds the GET URL for `query` starting at `offset`.
    ///
    /// The query is percent-encoded. The `key` parameter is only added when an
    /// API key is configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use libris::search::SearchClient;
    ///
    /// let client = SearchClient::new("https://example.test/volumes", None);
    /// assert_eq!(
    ///     client.request_url("dune messiah", 12),
    ///     "https://example.test/volumes?q=dune%20messiah&startIndex=12&maxResults=12"
    /// );
    /// ```
    #[must_use]
    pub fn request_url(&self, query: &str, offset: u32) -> String {
        let mut url = format!(
            "{}?q={}&startIndex={offset}&maxResults={}",
            self.endpoint,
            utf8_percent_encode(query, NON_ALPHANUMERIC),
            self.page_size,
        );

        if let Some(key) = &self.api_key {
            url.push_str("&key=");
            url.push_str(&utf8_percent_encode(key, NON_ALPHANUMERIC).to_string());
        }

        url
    }

    /// Parses a volumes response.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Transport`] when `status` is not a 2xx code or
    /// the body is not a volumes document. A successful response with no items
    /// is *not* an error here; it yields an empty page.
    pub fn parse_response(status: u16, body: &[u8]) -> Result<SearchPage, SearchError> {
        let _span = tracing::debug_span!("parse_search_response",
            status = status,
            body_len = body.len()
        ).entered();

        if !(200..300).contains(&status) {
            tracing::debug!("search request returned non-success status");
            return Err(SearchError::transport(
                Some(status),
                format!("unexpected status {status}"),
            ));
        }

        let response: VolumesResponse = serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "failed to parse search response");
            SearchError::transport(Some(status), format!("invalid response body: {e}"))
        })?;

        let items = response.items.unwrap_or_default();
        let fetched = items.len();

        let books: Vec<BookRecord> = items
            .into_iter()
            .filter_map(|item| item.into_record())
            .filter(BookRecord::is_displayable)
            .collect();

        tracing::debug!(
            fetched = fetched,
            displayable = books.len(),
            total_items = ?response.total_items,
            "search response parsed"
        );

        Ok(SearchPage {
            books,
            fetched,
            total_items: response.total_items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: &str, title: Option<&str>, authors: Option<Vec<&str>>, thumb: Option<&str>) -> serde_json::Value {
        let mut info = serde_json::Map::new();
        if let Some(title) = title {
            info.insert("title".into(), json!(title));
        }
        if let Some(authors) = authors {
            info.insert("authors".into(), json!(authors));
        }
        if let Some(thumb) = thumb {
            info.insert("imageLinks".into(), json!({ "thumbnail": thumb }));
        }
        json!({ "id": id, "volumeInfo": info })
    }

    fn full(id: &str) -> serde_json::Value {
        let title = format!("Title {id}");
        item(id, Some(title.as_str()), Some(vec!["Author"]), Some("http://thumb"))
    }

    #[test]
    fn request_url_includes_key_when_configured() {
        let client = SearchClient::new(DEFAULT_ENDPOINT, Some("k3y".to_string()));
        let url = client.request_url("Dune", 0);
        assert_eq!(
            url,
            "https://www.googleapis.com/books/v1/volumes?q=Dune&startIndex=0&maxResults=12&key=k3y"
        );
    }

    #[test]
    fn blank_api_key_is_ignored() {
        let client = SearchClient::new(DEFAULT_ENDPOINT, Some("  ".to_string()));
        assert!(!client.request_url("Dune", 0).contains("key="));
    }

    #[test]
    fn query_is_percent_encoded() {
        let client = SearchClient::default();
        let url = client.request_url("a&b=c", 24);
        assert!(url.contains("q=a%26b%3Dc&startIndex=24"));
    }

    #[test]
    fn qualifying_items_keep_response_order() {
        let body = json!({
            "totalItems": 3,
            "items": [full("c"), full("a"), full("b")]
        });
        let page = SearchClient::parse_response(200, body.to_string().as_bytes()).unwrap();

        let ids: Vec<&str> = page.books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(page.fetched, 3);
        assert_eq!(page.total_items, Some(3));
    }

    #[test]
    fn incomplete_items_are_dropped() {
        let body = json!({
            "items": [
                full("keep"),
                item("no-title", None, Some(vec!["A"]), Some("http://t")),
                item("no-authors", Some("T"), Some(vec![]), Some("http://t")),
                item("no-thumb", Some("T"), Some(vec!["A"]), None),
                json!({ "id": "no-info" }),
            ]
        });
        let page = SearchClient::parse_response(200, body.to_string().as_bytes()).unwrap();

        assert_eq!(page.books.len(), 1);
        assert_eq!(page.books[0].id, "keep");
        assert_eq!(page.fetched, 5);
    }

    #[test]
    fn missing_items_is_an_empty_page() {
        let page = SearchClient::parse_response(200, br#"{"kind":"books#volumes","totalItems":0}"#).unwrap();
        assert!(page.books.is_empty());
        assert_eq!(page.fetched, 0);
    }

    #[test]
    fn non_success_status_is_transport_error() {
        let err = SearchClient::parse_response(403, b"{}").unwrap_err();
        assert!(matches!(err, SearchError::Transport { status: Some(403), .. }));
    }

    #[test]
    fn garbage_body_is_transport_error() {
        let err = SearchClient::parse_response(200, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, SearchError::Transport { .. }));
    }
}
