//! Reader (v3) API operations: cursor-paginated document endpoints

use serde_json::Value;

use crate::error::{ReadwiseError, Result};
use crate::types::{CursorPage, Document, DocumentUpdate, SaveDocumentRequest};

use super::ReadwiseClient;

/// Filters for listing documents
#[derive(Debug, Clone, Default)]
pub struct DocumentQuery {
    /// Triage location: new, later, archive, feed
    pub location: Option<String>,
    pub category: Option<String>,
    /// ISO 8601 timestamp; only documents updated after this time.
    /// Passed through verbatim, the remote validates it.
    pub updated_after: Option<String>,
    /// Maximum documents to return. `None` fetches every page.
    pub limit: Option<usize>,
}

impl ReadwiseClient {
    /// Save a document to Reader
    pub async fn save_document(&self, request: &SaveDocumentRequest) -> Result<Value> {
        let url = self.reader_url("/save");
        self.execute(self.post(&url).json(request)).await
    }

    /// List documents, aggregating cursor-paginated pages
    ///
    /// With a finite `limit` the loop stops as soon as the limit is
    /// reached and truncates the aggregate to exactly that many documents.
    /// With `limit: None` it follows `nextPageCursor` until exhaustion.
    pub async fn list_documents(&self, query: &DocumentQuery) -> Result<Vec<Document>> {
        let url = self.reader_url("/list");
        let mut all_results: Vec<Document> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0u32;

        loop {
            pages += 1;
            if pages > self.max_pages() {
                return Err(ReadwiseError::PageLimit(self.max_pages()));
            }

            let mut params: Vec<(&str, String)> = Vec::new();
            if let Some(location) = &query.location {
                params.push(("location", location.clone()));
            }
            if let Some(category) = &query.category {
                params.push(("category", category.clone()));
            }
            if let Some(updated_after) = &query.updated_after {
                params.push(("updatedAfter", updated_after.clone()));
            }
            if let Some(cursor) = &cursor {
                params.push(("pageCursor", cursor.clone()));
            }

            let page: CursorPage<Document> = self.execute(self.get(&url).query(&params)).await?;

            if page.results.is_empty() {
                break;
            }
            all_results.extend(page.results);

            if let Some(limit) = query.limit {
                if all_results.len() >= limit {
                    all_results.truncate(limit);
                    return Ok(all_results);
                }
            }

            match page.next_page_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(all_results)
    }

    /// Update document metadata. Only the fields set in `update` are sent.
    pub async fn update_document(&self, document_id: &str, update: &DocumentUpdate) -> Result<Value> {
        let url = self.reader_url(&format!("/documents/{}", document_id));
        self.execute(self.patch(&url).json(update)).await
    }

    /// Delete a document from Reader
    pub async fn delete_document(&self, document_id: &str) -> Result<()> {
        let url = self.reader_url(&format!("/documents/{}", document_id));
        self.execute_empty(self.delete(&url)).await
    }

    /// Get all tags from Reader
    pub async fn list_tags(&self) -> Result<Vec<String>> {
        #[derive(serde::Deserialize)]
        struct TagsResponse {
            #[serde(default)]
            tags: Vec<String>,
        }

        let url = self.reader_url("/tags");
        let response: TagsResponse = self.execute(self.get(&url)).await?;
        Ok(response.tags)
    }

    /// Search documents by topic
    ///
    /// Reader v3 has no native search endpoint, so this fetches the full
    /// document set (optionally pre-filtered by location/category server
    /// side) and matches the query case-insensitively against title,
    /// summary, notes, and author. Slow on large libraries.
    pub async fn topic_search(
        &self,
        query: &str,
        location: Option<String>,
        category: Option<String>,
        limit: usize,
    ) -> Result<Vec<Document>> {
        let documents = self
            .list_documents(&DocumentQuery {
                location,
                category,
                updated_after: None,
                limit: None,
            })
            .await?;

        let needle = query.to_lowercase();
        let mut matches: Vec<Document> = documents
            .into_iter()
            .filter(|doc| document_matches(doc, &needle))
            .collect();
        matches.truncate(limit);
        Ok(matches)
    }
}

/// Case-insensitive substring match across the searchable document fields
fn document_matches(doc: &Document, needle: &str) -> bool {
    [
        doc.title.as_deref(),
        doc.summary.as_deref(),
        doc.notes.as_deref(),
        doc.author.as_deref(),
    ]
    .iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}
