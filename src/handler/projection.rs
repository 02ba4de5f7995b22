//! Field projection for tool responses
//!
//! Every tool projects the fetched entities onto a smaller, stable field
//! subset before serializing, to keep response sizes under control. The
//! projections are pure: they copy the retained fields and never alter
//! their values.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{Book, Document, Highlight};

/// How much document content survives projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    /// Drop content entirely (the default)
    Omit,
    /// Carry content through unchanged
    Full,
    /// Carry at most this many characters, appending a truncation marker
    Truncated(usize),
}

impl ContentMode {
    pub fn from_request(with_full_content: bool, content_max_length: Option<usize>) -> Self {
        match (with_full_content, content_max_length) {
            (false, _) => ContentMode::Omit,
            (true, Some(max)) => ContentMode::Truncated(max),
            (true, None) => ContentMode::Full,
        }
    }
}

/// Document view returned by the list/search tools
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DocumentView {
    pub id: String,
    pub url: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub site_name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

pub fn project_document(doc: &Document, mode: ContentMode) -> DocumentView {
    let content = match mode {
        ContentMode::Omit => None,
        ContentMode::Full => doc.content.clone(),
        ContentMode::Truncated(max) => doc.content.as_ref().map(|c| truncate_content(c, max)),
    };

    DocumentView {
        id: doc.id.clone(),
        url: doc.url.clone(),
        title: doc.title.clone(),
        author: doc.author.clone(),
        site_name: doc.site_name.clone(),
        category: doc.category.clone(),
        location: doc.location.clone(),
        tags: doc.tags.clone(),
        summary: doc.summary.clone(),
        updated_at: doc.updated_at,
        content,
    }
}

/// Truncate on a character boundary and mark the cut
fn truncate_content(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }
    let mut truncated: String = content.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}

/// Highlight view for the list tool
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HighlightView {
    pub id: i64,
    pub text: Option<String>,
    pub note: Option<String>,
    pub book_id: Option<i64>,
    pub highlighted_at: Option<DateTime<Utc>>,
}

pub fn project_highlight(h: &Highlight) -> HighlightView {
    HighlightView {
        id: h.id,
        text: h.text.clone(),
        note: h.note.clone(),
        book_id: h.book_id,
        highlighted_at: h.highlighted_at,
    }
}

/// Highlight view for the search tool
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchHighlightView {
    pub id: i64,
    pub text: Option<String>,
    pub book_id: Option<i64>,
    pub note: Option<String>,
    pub title: Option<String>,
}

pub fn project_search_highlight(h: &Highlight) -> SearchHighlightView {
    SearchHighlightView {
        id: h.id,
        text: h.text.clone(),
        book_id: h.book_id,
        note: h.note.clone(),
        title: h.title.clone(),
    }
}

/// Highlight view for the daily review tool
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReviewHighlightView {
    pub id: i64,
    pub text: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub note: Option<String>,
}

pub fn project_review_highlight(h: &Highlight) -> ReviewHighlightView {
    ReviewHighlightView {
        id: h.id,
        text: h.text.clone(),
        title: h.title.clone(),
        author: h.author.clone(),
        note: h.note.clone(),
    }
}

/// Highlight view for the per-book tool, keeping the source position
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookHighlightView {
    pub id: i64,
    pub text: Option<String>,
    pub note: Option<String>,
    pub location: Option<i64>,
    pub highlighted_at: Option<DateTime<Utc>>,
}

pub fn project_book_highlight(h: &Highlight) -> BookHighlightView {
    BookHighlightView {
        id: h.id,
        text: h.text.clone(),
        note: h.note.clone(),
        location: h.location,
        highlighted_at: h.highlighted_at,
    }
}

/// Highlight view for the export tool, the widest subset
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExportHighlightView {
    pub id: i64,
    pub text: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub book_id: Option<i64>,
    pub note: Option<String>,
    pub highlighted_at: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

pub fn project_export_highlight(h: &Highlight) -> ExportHighlightView {
    ExportHighlightView {
        id: h.id,
        text: h.text.clone(),
        title: h.title.clone(),
        author: h.author.clone(),
        book_id: h.book_id,
        note: h.note.clone(),
        highlighted_at: h.highlighted_at,
        updated: h.updated,
    }
}

/// Book view for the list tool
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookView {
    pub id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub num_highlights: i64,
}

pub fn project_book(b: &Book) -> BookView {
    BookView {
        id: b.id,
        title: b.title.clone(),
        author: b.author.clone(),
        category: b.category.clone(),
        num_highlights: b.num_highlights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_highlight() -> Highlight {
        Highlight {
            id: 7,
            text: Some("the map is not the territory".to_string()),
            note: Some("korzybski".to_string()),
            book_id: Some(42),
            title: Some("General Semantics".to_string()),
            author: Some("A. Korzybski".to_string()),
            location: Some(311),
            highlighted_at: Some("2025-11-01T00:00:00Z".parse().unwrap()),
            updated: Some("2025-11-02T00:00:00Z".parse().unwrap()),
        }
    }

    fn sample_document() -> Document {
        Document {
            id: "doc1".to_string(),
            url: Some("https://read.example/doc1".to_string()),
            source_url: Some("https://example.com/post".to_string()),
            title: Some("On Reading".to_string()),
            author: Some("M. Adler".to_string()),
            site_name: Some("example.com".to_string()),
            category: Some("article".to_string()),
            location: Some("later".to_string()),
            tags: vec!["reading".to_string()],
            notes: None,
            summary: Some("A summary.".to_string()),
            content: Some("Full text of the article.".to_string()),
            updated_at: None,
        }
    }

    #[test]
    fn test_projection_preserves_retained_highlight_fields() {
        let h = sample_highlight();
        let view = project_highlight(&h);
        assert_eq!(view.id, h.id);
        assert_eq!(view.text, h.text);
        assert_eq!(view.note, h.note);
        assert_eq!(view.book_id, h.book_id);
        assert_eq!(view.highlighted_at, h.highlighted_at);
    }

    #[test]
    fn test_export_projection_keeps_update_timestamps() {
        let h = sample_highlight();
        let view = project_export_highlight(&h);
        assert_eq!(view.updated, h.updated);
        assert_eq!(view.author, h.author);
    }

    #[test]
    fn test_document_projection_drops_content_by_default() {
        let doc = sample_document();
        let view = project_document(&doc, ContentMode::Omit);
        assert!(view.content.is_none());
        assert_eq!(view.title, doc.title);
        assert_eq!(view.tags, doc.tags);

        let serialized = serde_json::to_value(&view).unwrap();
        assert!(serialized.get("content").is_none());
    }

    #[test]
    fn test_document_projection_full_content_unchanged() {
        let doc = sample_document();
        let view = project_document(&doc, ContentMode::Full);
        assert_eq!(view.content, doc.content);
    }

    #[test]
    fn test_content_truncation_appends_marker() {
        let mut doc = sample_document();
        doc.content = Some("abcdefghij".to_string());

        let view = project_document(&doc, ContentMode::Truncated(4));
        assert_eq!(view.content.as_deref(), Some("abcd..."));

        // shorter than the cap stays untouched
        let view = project_document(&doc, ContentMode::Truncated(100));
        assert_eq!(view.content.as_deref(), Some("abcdefghij"));
    }

    #[test]
    fn test_content_truncation_respects_char_boundaries() {
        let mut doc = sample_document();
        doc.content = Some("héllo wörld".to_string());
        let view = project_document(&doc, ContentMode::Truncated(3));
        assert_eq!(view.content.as_deref(), Some("hél..."));
    }

    #[test]
    fn test_content_mode_from_request() {
        assert_eq!(ContentMode::from_request(false, None), ContentMode::Omit);
        assert_eq!(ContentMode::from_request(false, Some(10)), ContentMode::Omit);
        assert_eq!(ContentMode::from_request(true, None), ContentMode::Full);
        assert_eq!(
            ContentMode::from_request(true, Some(10)),
            ContentMode::Truncated(10)
        );
    }

    #[test]
    fn test_book_projection() {
        let b = Book {
            id: 42,
            title: Some("General Semantics".to_string()),
            author: Some("A. Korzybski".to_string()),
            category: Some("books".to_string()),
            source: Some("kindle".to_string()),
            num_highlights: 17,
            last_highlight_at: None,
        };
        let view = project_book(&b);
        assert_eq!(view.id, 42);
        assert_eq!(view.num_highlights, 17);
        // source is not part of the projected subset
        let serialized = serde_json::to_value(&view).unwrap();
        assert!(serialized.get("source").is_none());
    }
}
