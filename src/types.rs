//! Core types for the Readwise adapter
//!
//! Entities are owned entirely by the remote service: nothing here is
//! persisted or cached, and every tool invocation re-fetches. Fields the
//! remote may omit are `Option`; unknown remote fields are ignored on
//! deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document in Readwise Reader (v3 API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Reader document ID
    pub id: String,
    pub url: Option<String>,
    pub source_url: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub site_name: Option<String>,
    /// Document category (article, email, rss, pdf, epub, tweet, video, ...)
    pub category: Option<String>,
    /// Triage location: new, later, archive, or feed
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Reader-side notes attached to the document
    pub notes: Option<String>,
    pub summary: Option<String>,
    /// Full document content. Large; dropped by default at the tool layer.
    pub content: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A highlight in Readwise (v2 API)
///
/// One shape covers the list/search/export/review endpoints; fields absent
/// from a given endpoint stay `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    pub id: i64,
    pub text: Option<String>,
    pub note: Option<String>,
    pub book_id: Option<i64>,
    /// Source title (present in search/export/review payloads)
    pub title: Option<String>,
    pub author: Option<String>,
    /// Position within the source
    pub location: Option<i64>,
    pub highlighted_at: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

/// A book (highlight source) in Readwise (v2 API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    /// Source category (books, articles, tweets, podcasts)
    pub category: Option<String>,
    pub source: Option<String>,
    #[serde(default)]
    pub num_highlights: i64,
    pub last_highlight_at: Option<DateTime<Utc>>,
}

/// Daily review snapshot (spaced repetition queue)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyReview {
    pub review_id: Option<i64>,
    pub review_url: Option<String>,
    #[serde(default)]
    pub review_completed: bool,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

/// Request body for saving a document to Reader
#[derive(Debug, Clone, Serialize)]
pub struct SaveDocumentRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Partial update for a Reader document. Only provided fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// A highlight to create via POST /highlights. The endpoint takes a batch
/// even when creating a single highlight.
#[derive(Debug, Clone, Serialize)]
pub struct NewHighlight {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_at: Option<String>,
}

/// One page of a cursor-paginated Reader (v3) response
#[derive(Debug, Deserialize)]
pub struct CursorPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(rename = "nextPageCursor")]
    pub next_page_cursor: Option<String>,
}

/// One page of a page-number-paginated Highlights (v2) response
#[derive(Debug, Deserialize)]
pub struct NumberedPage<T> {
    #[serde(default)]
    pub count: Option<u64>,
    /// URL of the next page; absence means the last page
    pub next: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Aggregated highlight result, for single-page and fetch-all alike
#[derive(Debug, Clone, Serialize)]
pub struct HighlightBatch {
    pub count: u64,
    pub results: Vec<Highlight>,
}

/// Aggregated book result
#[derive(Debug, Clone, Serialize)]
pub struct BookBatch {
    pub count: u64,
    pub results: Vec<Book>,
}
