//! Highlights tools

use serde::Deserialize;
use serde_json::Value;

use crate::client::{BookQuery, HighlightQuery};
use crate::error::Result;
use crate::types::NewHighlight;

use super::projection::{
    project_book, project_book_highlight, project_export_highlight, project_highlight,
    project_review_highlight, project_search_highlight,
};
use super::ReadwiseHandler;

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    100
}

#[derive(Debug, Deserialize)]
struct ListHighlightsInput {
    book_id: Option<i64>,
    #[serde(default = "default_page_size")]
    page_size: u32,
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default)]
    fetch_all: bool,
    highlighted_at__gt: Option<String>,
    highlighted_at__lt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchHighlightsInput {
    query: String,
    #[serde(default = "default_page_size")]
    page_size: u32,
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default)]
    fetch_all: bool,
}

#[derive(Debug, Deserialize)]
struct ListBooksInput {
    category: Option<String>,
    #[serde(default = "default_page_size")]
    page_size: u32,
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default)]
    fetch_all: bool,
    last_highlight_at__gt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GetBookHighlightsInput {
    book_id: i64,
}

#[derive(Debug, Deserialize)]
struct ExportHighlightsInput {
    updated_after: Option<String>,
    #[serde(default)]
    include_deleted: bool,
    max_results: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct CreateHighlightInput {
    text: String,
    title: Option<String>,
    author: Option<String>,
    note: Option<String>,
    #[serde(default = "default_highlight_category")]
    category: Option<String>,
    highlighted_at: Option<String>,
}

fn default_highlight_category() -> Option<String> {
    Some("books".to_string())
}

impl ReadwiseHandler {
    pub(super) async fn tool_list_highlights(&self, params: Value) -> Result<String> {
        let input: ListHighlightsInput = serde_json::from_value(params)?;
        let batch = self
            .client()
            .list_highlights(&HighlightQuery {
                book_id: input.book_id,
                page: input.page,
                page_size: input.page_size,
                fetch_all: input.fetch_all,
                highlighted_after: input.highlighted_at__gt,
                highlighted_before: input.highlighted_at__lt,
            })
            .await?;

        let views: Vec<_> = batch.results.iter().map(project_highlight).collect();
        let fetch_mode = if input.fetch_all {
            "all pages".to_string()
        } else {
            format!("page {}", input.page)
        };
        Ok(format!(
            "Found {} highlights ({}): {}",
            batch.count,
            fetch_mode,
            serde_json::to_string(&views)?
        ))
    }

    pub(super) async fn tool_get_daily_review(&self, _params: Value) -> Result<String> {
        let review = self.client().daily_review().await?;
        let views: Vec<_> = review
            .highlights
            .iter()
            .map(project_review_highlight)
            .collect();
        Ok(format!(
            "Daily review ({} highlights): {}",
            views.len(),
            serde_json::to_string(&views)?
        ))
    }

    pub(super) async fn tool_search_highlights(&self, params: Value) -> Result<String> {
        let input: SearchHighlightsInput = serde_json::from_value(params)?;
        let batch = self
            .client()
            .search_highlights(&input.query, input.page, input.page_size, input.fetch_all)
            .await?;

        let views: Vec<_> = batch.results.iter().map(project_search_highlight).collect();
        let fetch_mode = if input.fetch_all {
            "all matches".to_string()
        } else {
            format!("page {}", input.page)
        };
        Ok(format!(
            "Found {} matching highlights ({}): {}",
            batch.count,
            fetch_mode,
            serde_json::to_string(&views)?
        ))
    }

    pub(super) async fn tool_list_books(&self, params: Value) -> Result<String> {
        let input: ListBooksInput = serde_json::from_value(params)?;
        let batch = self
            .client()
            .list_books(&BookQuery {
                category: input.category,
                page: input.page,
                page_size: input.page_size,
                fetch_all: input.fetch_all,
                last_highlight_after: input.last_highlight_at__gt,
            })
            .await?;

        let views: Vec<_> = batch.results.iter().map(project_book).collect();
        let fetch_mode = if input.fetch_all {
            "all pages".to_string()
        } else {
            format!("page {}", input.page)
        };
        Ok(format!(
            "Found {} books ({}): {}",
            batch.count,
            fetch_mode,
            serde_json::to_string(&views)?
        ))
    }

    pub(super) async fn tool_get_book_highlights(&self, params: Value) -> Result<String> {
        let input: GetBookHighlightsInput = serde_json::from_value(params)?;
        let batch = self.client().get_book_highlights(input.book_id).await?;

        let views: Vec<_> = batch.results.iter().map(project_book_highlight).collect();
        Ok(format!(
            "Found {} highlights for book {} (all pages): {}",
            batch.count,
            input.book_id,
            serde_json::to_string(&views)?
        ))
    }

    pub(super) async fn tool_export_highlights(&self, params: Value) -> Result<String> {
        let input: ExportHighlightsInput = serde_json::from_value(params)?;
        let mut highlights = self
            .client()
            .export_highlights(input.updated_after.as_deref(), input.include_deleted)
            .await?;

        let result_msg = match input.max_results {
            Some(max) => {
                highlights.truncate(max);
                format!("(limited to first {})", max)
            }
            None => "(all highlights)".to_string(),
        };

        let views: Vec<_> = highlights.iter().map(project_export_highlight).collect();
        Ok(format!(
            "Exported {} highlights {}: {}",
            views.len(),
            result_msg,
            serde_json::to_string(&views)?
        ))
    }

    pub(super) async fn tool_create_highlight(&self, params: Value) -> Result<String> {
        let input: CreateHighlightInput = serde_json::from_value(params)?;
        let highlight = NewHighlight {
            text: input.text,
            title: input.title,
            author: input.author,
            note: input.note,
            category: input.category,
            highlighted_at: input.highlighted_at,
        };
        // batch-shaped endpoint, array of one
        let result = self.client().create_highlights(&[highlight]).await?;
        Ok(format!("Highlight created successfully: {}", result))
    }
}
