//! Art Institute of Chicago API response types.
//!
//! These types model the `GET /artworks` listing endpoint and the page
//! window handed to the selection coordinator.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::selection::Identified;

/// Default comma-separated field list requested from the artworks endpoint.
pub const DEFAULT_FIELDS: &str = "id,title,artist_title,date_display,thumbnail";

/// Pagination metadata returned alongside every listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Total number of records in the collection.
    pub total: u64,
    /// Page size the server actually applied.
    pub limit: u32,
    /// Zero-based index of the first record on this page.
    pub offset: u64,
    /// Number of pages at this limit.
    pub total_pages: u64,
    /// One-based page number the server returned.
    pub current_page: u64,
}

/// Raw body of `GET /artworks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworksResponse {
    /// The records on this page.
    #[serde(default)]
    pub data: Vec<Artwork>,
    /// Pagination metadata.
    pub pagination: Pagination,
}

/// Low-quality image placeholder and alt text for an artwork.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Thumbnail {
    /// Base64 data URI of a tiny preview image.
    #[serde(default)]
    pub lqip: Option<String>,
    /// Accessible description of the image.
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// A single artwork record.
///
/// Identity is the numeric `id` alone; the remaining fields are display-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artwork {
    /// Stable catalog identifier.
    pub id: u64,
    /// Artwork title. Untitled records carry an empty string.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Primary artist name, if the catalog has one.
    #[serde(default)]
    pub artist_title: Option<String>,
    /// Human-readable creation date (e.g. "c. 1885").
    #[serde(default)]
    pub date_display: Option<String>,
    /// Thumbnail reference.
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

/// Deserialize an explicit `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Artwork {
    /// Get the artist name, or "Unknown artist" if not set.
    pub fn artist_name(&self) -> &str {
        self.artist_title
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown artist")
    }

    /// Get the display date, or an empty string if not set.
    pub fn date_text(&self) -> &str {
        self.date_display.as_deref().unwrap_or("")
    }

    /// Get the thumbnail alt text, falling back to the title.
    pub fn alt_text(&self) -> &str {
        self.thumbnail
            .as_ref()
            .and_then(|t| t.alt_text.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.title)
    }

    /// Check whether the record carries a thumbnail preview.
    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail
            .as_ref()
            .and_then(|t| t.lqip.as_ref())
            .is_some()
    }
}

impl PartialEq for Artwork {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Artwork {}

impl Identified for Artwork {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Artwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.title)
    }
}

/// One server-delivered window of records plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    /// Records in server order.
    pub records: Vec<R>,
    /// Zero-based index of the first record in the full collection.
    pub offset: u64,
    /// Requested page size.
    pub page_size: u32,
    /// Total number of records in the collection.
    pub total_records: u64,
    /// One-based page number.
    pub current_page: u64,
    /// Number of pages at this page size.
    pub total_pages: u64,
}

impl<R> Page<R> {
    /// Build a page, deriving `current_page` and `total_pages` from the offset.
    pub fn new(records: Vec<R>, offset: u64, page_size: u32, total_records: u64) -> Self {
        let size = u64::from(page_size.max(1));
        Self {
            records,
            offset,
            page_size,
            total_records,
            current_page: offset / size + 1,
            total_pages: total_records.div_ceil(size),
        }
    }

    /// Number of records on this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check the page invariants: `len <= page_size`, and the records end
    /// within the collection (`offset + len <= total`).
    ///
    /// An empty page is never out of range.
    pub fn is_consistent(&self) -> bool {
        let len = self.records.len() as u64;
        len <= u64::from(self.page_size)
            && (len == 0 || self.offset.saturating_add(len) <= self.total_records)
    }
}

impl From<ArtworksResponse> for Page<Artwork> {
    /// The server's own pagination metadata is trusted as-is.
    fn from(response: ArtworksResponse) -> Self {
        let p = response.pagination;
        Self {
            records: response.data,
            offset: p.offset,
            page_size: p.limit,
            total_records: p.total,
            current_page: p.current_page,
            total_pages: p.total_pages,
        }
    }
}
