//! Book record and bookmark models.
//!
//! A [`BookRecord`] is one displayable volume from the search API. A
//! [`Bookmark`] wraps a record with the time it was saved; bookmarks serialize
//! with the record fields flattened so a plain array of records is also a
//! valid bookmark file.

use serde::{Deserialize, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// A single search result or bookmarked volume.
///
/// `id` is the volume identifier from the API and is unique per result item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl BookRecord {
    /// Creates a new record.
    ///
    /// # Examples
    ///
    /// ```
    /// use libris::domain::BookRecord;
    ///
    /// let book = BookRecord::new("abc123", "Dune", vec!["Frank Herbert".into()], None);
    /// assert_eq!(book.author_line(), "Frank Herbert");
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        authors: Vec<String>,
        thumbnail: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            authors,
            thumbnail,
        }
    }

    /// Authors joined with `", "`, empty when there are none.
    #[must_use]
    pub fn author_line(&self) -> String {
        self.authors.join(", ")
    }

    /// Whether the record has everything the result table shows: a title, at
    /// least one author and a thumbnail link.
    #[must_use]
    pub fn is_displayable(&self) -> bool {
        !self.title.trim().is_empty()
            && self.authors.iter().any(|a| !a.trim().is_empty())
            && self.thumbnail.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// A bookmarked volume together with the time it was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(flatten)]
    pub book: BookRecord,

    /// Unix timestamp of when the bookmark was added. Zero for entries written
    /// without a timestamp.
    #[serde(default)]
    pub saved_at: i64,
}

impl Bookmark {
    /// Wraps a record, stamping it with the current time.
    #[must_use]
    pub fn new(book: BookRecord) -> Self {
        Self {
            book,
            saved_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Returns a short relative description of when the bookmark was saved.
    ///
    /// - Unknown save time: `""`
    /// - Less than 1 minute: `"just now"`
    /// - Less than 1 hour: `"Xm ago"`
    /// - Less than 1 day: `"Xh ago"`
    /// - Otherwise: `"Xd ago"`
    #[must_use]
    pub fn saved_ago(&self) -> String {
        self.saved_ago_at(chrono::Utc::now().timestamp())
    }

    fn saved_ago_at(&self, now: i64) -> String {
        if self.saved_at <= 0 {
            return String::new();
        }

        let diff = (now - self.saved_at).max(0);

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> BookRecord {
        BookRecord::new(
            "abc123",
            "Dune",
            vec!["Frank Herbert".to_string()],
            Some("http://books.google.com/thumb".to_string()),
        )
    }

    #[test]
    fn displayable_requires_title_authors_and_thumbnail() {
        assert!(dune().is_displayable());

        let mut no_thumb = dune();
        no_thumb.thumbnail = None;
        assert!(!no_thumb.is_displayable());

        let mut no_authors = dune();
        no_authors.authors.clear();
        assert!(!no_authors.is_displayable());

        let mut blank_title = dune();
        blank_title.title = "  ".to_string();
        assert!(!blank_title.is_displayable());
    }

    #[test]
    fn saved_ago_buckets() {
        let mut bookmark = Bookmark::new(dune());
        bookmark.saved_at = 1_000_000;

        assert_eq!(bookmark.saved_ago_at(1_000_030), "just now");
        assert_eq!(bookmark.saved_ago_at(1_000_000 + 5 * 60), "5m ago");
        assert_eq!(bookmark.saved_ago_at(1_000_000 + 3 * 3600), "3h ago");
        assert_eq!(bookmark.saved_ago_at(1_000_000 + 7 * 86400), "7d ago");

        bookmark.saved_at = 0;
        assert_eq!(bookmark.saved_ago_at(1_000_000), "");
    }

    #[test]
    fn bookmark_reads_plain_record_json() {
        let json = r#"{"id":"abc123","title":"Dune","authors":["Frank Herbert"]}"#;
        let bookmark: Bookmark = serde_json::from_str(json).unwrap();
        assert_eq!(bookmark.book.id, "abc123");
        assert_eq!(bookmark.book.thumbnail, None);
        assert_eq!(bookmark.saved_at, 0);
    }
}
