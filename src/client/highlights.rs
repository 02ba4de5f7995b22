//! Highlights (v2) API operations: page-number-paginated endpoints

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ReadwiseError, Result};
use crate::types::{Book, BookBatch, DailyReview, Highlight, HighlightBatch, NewHighlight, NumberedPage};

use super::{ReadwiseClient, MAX_PAGE_SIZE};

/// Filters for listing highlights
#[derive(Debug, Clone)]
pub struct HighlightQuery {
    pub book_id: Option<i64>,
    /// Page number, starting at 1. Ignored when `fetch_all` is set.
    pub page: u32,
    /// Page size (v2 max 1000). Ignored when `fetch_all` is set.
    pub page_size: u32,
    /// Aggregate every page instead of fetching one
    pub fetch_all: bool,
    /// ISO 8601 lower bound on highlighted_at (exclusive)
    pub highlighted_after: Option<String>,
    /// ISO 8601 upper bound on highlighted_at (exclusive)
    pub highlighted_before: Option<String>,
}

impl Default for HighlightQuery {
    fn default() -> Self {
        Self {
            book_id: None,
            page: 1,
            page_size: 100,
            fetch_all: false,
            highlighted_after: None,
            highlighted_before: None,
        }
    }
}

/// Filters for listing books
#[derive(Debug, Clone)]
pub struct BookQuery {
    /// Source category (books, articles, tweets, podcasts)
    pub category: Option<String>,
    pub page: u32,
    pub page_size: u32,
    pub fetch_all: bool,
    /// ISO 8601 lower bound on last_highlight_at (exclusive)
    pub last_highlight_after: Option<String>,
}

impl Default for BookQuery {
    fn default() -> Self {
        Self {
            category: None,
            page: 1,
            page_size: 100,
            fetch_all: false,
            last_highlight_after: None,
        }
    }
}

impl ReadwiseClient {
    /// List highlights, either one page or all pages
    pub async fn list_highlights(&self, query: &HighlightQuery) -> Result<HighlightBatch> {
        let url = self.highlights_url("/highlights");

        let mut base_params: Vec<(&str, String)> = Vec::new();
        if let Some(book_id) = query.book_id {
            base_params.push(("book_id", book_id.to_string()));
        }
        if let Some(after) = &query.highlighted_after {
            base_params.push(("highlighted_at__gt", after.clone()));
        }
        if let Some(before) = &query.highlighted_before {
            base_params.push(("highlighted_at__lt", before.clone()));
        }

        if query.fetch_all {
            let results = self.fetch_all_pages::<Highlight>(&url, &base_params).await?;
            return Ok(HighlightBatch {
                count: results.len() as u64,
                results,
            });
        }

        let mut params = base_params;
        params.push(("page", query.page.to_string()));
        params.push(("page_size", query.page_size.to_string()));
        let page: NumberedPage<Highlight> = self.execute(self.get(&url).query(&params)).await?;
        Ok(HighlightBatch {
            count: page.count.unwrap_or(page.results.len() as u64),
            results: page.results,
        })
    }

    /// Get daily review highlights (spaced repetition queue snapshot)
    pub async fn daily_review(&self) -> Result<DailyReview> {
        let url = self.highlights_url("/review");
        self.execute(self.get(&url)).await
    }

    /// Search highlights by text query against highlight text and notes
    pub async fn search_highlights(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
        fetch_all: bool,
    ) -> Result<HighlightBatch> {
        let url = self.highlights_url("/highlights");
        let base_params: Vec<(&str, String)> = vec![("q", query.to_string())];

        if fetch_all {
            let results = self.fetch_all_pages::<Highlight>(&url, &base_params).await?;
            return Ok(HighlightBatch {
                count: results.len() as u64,
                results,
            });
        }

        let mut params = base_params;
        params.push(("page", page.to_string()));
        params.push(("page_size", page_size.to_string()));
        let page: NumberedPage<Highlight> = self.execute(self.get(&url).query(&params)).await?;
        Ok(HighlightBatch {
            count: page.count.unwrap_or(page.results.len() as u64),
            results: page.results,
        })
    }

    /// List books, either one page or all pages
    pub async fn list_books(&self, query: &BookQuery) -> Result<BookBatch> {
        let url = self.highlights_url("/books");

        let mut base_params: Vec<(&str, String)> = Vec::new();
        if let Some(category) = &query.category {
            base_params.push(("category", category.clone()));
        }
        if let Some(after) = &query.last_highlight_after {
            base_params.push(("last_highlight_at__gt", after.clone()));
        }

        if query.fetch_all {
            let results = self.fetch_all_pages::<Book>(&url, &base_params).await?;
            return Ok(BookBatch {
                count: results.len() as u64,
                results,
            });
        }

        let mut params = base_params;
        params.push(("page", query.page.to_string()));
        params.push(("page_size", query.page_size.to_string()));
        let page: NumberedPage<Book> = self.execute(self.get(&url).query(&params)).await?;
        Ok(BookBatch {
            count: page.count.unwrap_or(page.results.len() as u64),
            results: page.results,
        })
    }

    /// Get ALL highlights from a specific book, across every page
    pub async fn get_book_highlights(&self, book_id: i64) -> Result<HighlightBatch> {
        self.list_highlights(&HighlightQuery {
            book_id: Some(book_id),
            fetch_all: true,
            ..Default::default()
        })
        .await
    }

    /// Export highlights for backup/analysis. Always aggregates every page
    /// at the protocol-max page size.
    pub async fn export_highlights(
        &self,
        updated_after: Option<&str>,
        include_deleted: bool,
    ) -> Result<Vec<Highlight>> {
        let url = self.highlights_url("/export");

        let mut base_params: Vec<(&str, String)> = Vec::new();
        if let Some(after) = updated_after {
            base_params.push(("updatedAfter", after.to_string()));
        }
        if include_deleted {
            base_params.push(("deleted", "true".to_string()));
        }

        self.fetch_all_pages(&url, &base_params).await
    }

    /// Manually create highlights. The endpoint is batch-shaped even for a
    /// single highlight.
    pub async fn create_highlights(&self, highlights: &[NewHighlight]) -> Result<Value> {
        let url = self.highlights_url("/highlights");
        let body = serde_json::json!({ "highlights": highlights });
        self.execute(self.post(&url).json(&body)).await
    }

    /// Aggregate every page of a v2 endpoint
    ///
    /// Stops when a page comes back empty or without a `next` indicator;
    /// fails with [`ReadwiseError::PageLimit`] if the remote never stops.
    async fn fetch_all_pages<T: DeserializeOwned>(
        &self,
        url: &str,
        base_params: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut all_results: Vec<T> = Vec::new();
        let mut page = 1u32;

        loop {
            if page > self.max_pages() {
                return Err(ReadwiseError::PageLimit(self.max_pages()));
            }

            let mut params = base_params.to_vec();
            params.push(("page", page.to_string()));
            params.push(("page_size", MAX_PAGE_SIZE.to_string()));

            let response: NumberedPage<T> = self.execute(self.get(url).query(&params)).await?;

            if response.results.is_empty() {
                break;
            }
            all_results.extend(response.results);

            if response.next.is_none() {
                break;
            }
            page += 1;
        }

        Ok(all_results)
    }
}
