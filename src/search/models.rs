//! Wire types for the Google Books volumes response.
//!
//! Only the fields the plugin displays are modelled; everything else in the
//! response is ignored by serde. All nested fields are optional because the API
//! omits them freely.

use crate::domain::BookRecord;
use serde::Deserialize;

/// Top-level response of `GET /books/v1/volumes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    /// Estimated total number of matches. Unreliable, shown as a hint only.
    #[serde(default)]
    pub total_items: Option<u64>,

    /// Result items, absent when nothing matched.
    #[serde(default)]
    pub items: Option<Vec<VolumeItem>>,
}

/// One result item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub volume_info: Option<VolumeInfo>,
}

/// Nested volume metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Option<Vec<String>>,
    #[serde(default)]
    pub image_links: Option<ImageLinks>,
}

/// Cover image links.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl VolumeItem {
    /// Converts the item into a [`BookRecord`], keeping missing fields empty.
    ///
    /// Returns `None` only when the item has no identifier, since records are
    /// keyed by it.
    #[must_use]
    pub fn into_record(self) -> Option<BookRecord> {
        if self.id.is_empty() {
            return None;
        }

        let info = self.volume_info.unwrap_or_default();
        Some(BookRecord {
            id: self.id,
            title: info.title.unwrap_or_default(),
            authors: info.authors.unwrap_or_default(),
            thumbnail: info.image_links.and_then(|links| links.thumbnail),
        })
    }
}
