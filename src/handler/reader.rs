//! Reader (document) tools

use serde::Deserialize;
use serde_json::Value;

use crate::client::DocumentQuery;
use crate::error::Result;
use crate::types::{DocumentUpdate, SaveDocumentRequest};

use super::projection::{project_document, ContentMode, DocumentView};
use super::ReadwiseHandler;

#[derive(Debug, Deserialize)]
struct SaveDocumentInput {
    url: String,
    tags: Option<Vec<String>>,
    #[serde(default = "default_save_location")]
    location: Option<String>,
    #[serde(default = "default_save_category")]
    category: Option<String>,
}

fn default_save_location() -> Option<String> {
    Some("later".to_string())
}

fn default_save_category() -> Option<String> {
    Some("article".to_string())
}

#[derive(Debug, Deserialize)]
struct ListDocumentsInput {
    location: Option<String>,
    category: Option<String>,
    author: Option<String>,
    site_name: Option<String>,
    #[serde(default = "default_document_limit")]
    limit: usize,
    #[serde(default)]
    fetch_all: bool,
    updated_after: Option<String>,
    #[serde(default)]
    with_full_content: bool,
    content_max_length: Option<usize>,
}

fn default_document_limit() -> usize {
    20
}

#[derive(Debug, Deserialize)]
struct UpdateDocumentInput {
    document_id: String,
    title: Option<String>,
    author: Option<String>,
    summary: Option<String>,
    location: Option<String>,
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct DeleteDocumentInput {
    document_id: String,
}

#[derive(Debug, Deserialize)]
struct TopicSearchInput {
    query: String,
    location: Option<String>,
    category: Option<String>,
    #[serde(default = "default_document_limit")]
    limit: usize,
}

impl ReadwiseHandler {
    pub(super) async fn tool_save_document(&self, params: Value) -> Result<String> {
        let input: SaveDocumentInput = serde_json::from_value(params)?;
        let request = SaveDocumentRequest {
            url: input.url,
            tags: input.tags,
            location: input.location,
            category: input.category,
        };
        let result = self.client().save_document(&request).await?;
        Ok(format!("Document saved successfully: {}", result))
    }

    pub(super) async fn tool_list_documents(&self, params: Value) -> Result<String> {
        let input: ListDocumentsInput = serde_json::from_value(params)?;

        // fetch_all overrides the limit
        let effective_limit = if input.fetch_all {
            None
        } else {
            Some(input.limit)
        };
        let mut documents = self
            .client()
            .list_documents(&DocumentQuery {
                location: input.location.clone(),
                category: input.category.clone(),
                updated_after: input.updated_after.clone(),
                limit: effective_limit,
            })
            .await?;

        // Client-side filters the remote does not offer
        if let Some(author) = &input.author {
            let needle = author.to_lowercase();
            documents.retain(|doc| {
                doc.author
                    .as_deref()
                    .is_some_and(|a| a.to_lowercase().contains(&needle))
            });
        }
        if let Some(site) = &input.site_name {
            let needle = site.to_lowercase();
            documents.retain(|doc| {
                doc.site_name
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
            });
        }

        let mode = ContentMode::from_request(input.with_full_content, input.content_max_length);
        let views: Vec<DocumentView> = documents
            .iter()
            .map(|doc| project_document(doc, mode))
            .collect();

        let mut filters_applied = Vec::new();
        if let Some(location) = &input.location {
            filters_applied.push(format!("location={}", location));
        }
        if let Some(category) = &input.category {
            filters_applied.push(format!("category={}", category));
        }
        if let Some(author) = &input.author {
            filters_applied.push(format!("author contains '{}'", author));
        }
        if let Some(site) = &input.site_name {
            filters_applied.push(format!("site contains '{}'", site));
        }
        if let Some(updated_after) = &input.updated_after {
            filters_applied.push(format!("updated after {}", updated_after));
        }
        let filter_desc = if filters_applied.is_empty() {
            String::new()
        } else {
            format!(" (filtered by: {})", filters_applied.join(", "))
        };

        Ok(format!(
            "Found {} documents{}: {}",
            views.len(),
            filter_desc,
            serde_json::to_string(&views)?
        ))
    }

    pub(super) async fn tool_update_document(&self, params: Value) -> Result<String> {
        let input: UpdateDocumentInput = serde_json::from_value(params)?;
        let update = DocumentUpdate {
            title: input.title,
            author: input.author,
            summary: input.summary,
            location: input.location,
            tags: input.tags,
        };
        let result = self
            .client()
            .update_document(&input.document_id, &update)
            .await?;
        Ok(format!("Document updated successfully: {}", result))
    }

    pub(super) async fn tool_delete_document(&self, params: Value) -> Result<String> {
        let input: DeleteDocumentInput = serde_json::from_value(params)?;
        self.client().delete_document(&input.document_id).await?;
        Ok(format!(
            "Document {} deleted successfully",
            input.document_id
        ))
    }

    pub(super) async fn tool_list_tags(&self, _params: Value) -> Result<String> {
        let tags = self.client().list_tags().await?;
        Ok(format!(
            "Found {} tags: {}",
            tags.len(),
            serde_json::to_string(&tags)?
        ))
    }

    pub(super) async fn tool_topic_search(&self, params: Value) -> Result<String> {
        let input: TopicSearchInput = serde_json::from_value(params)?;
        let matches = self
            .client()
            .topic_search(&input.query, input.location, input.category, input.limit)
            .await?;

        let views: Vec<DocumentView> = matches
            .iter()
            .map(|doc| project_document(doc, ContentMode::Omit))
            .collect();

        Ok(format!(
            "Found {} matching documents (client-side search): {}",
            views.len(),
            serde_json::to_string(&views)?
        ))
    }
}
