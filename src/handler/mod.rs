//! Tool layer: named MCP tools over the Readwise client
//!
//! Each tool parses its input with serde defaults, delegates to the API
//! client, projects the response onto a stable field subset, and renders a
//! summary string. Every client error is caught at this boundary and
//! converted into a textual error result, never a protocol-level fault.

mod highlights;
mod projection;
mod reader;

pub use projection::*;

use serde_json::Value;

use crate::client::ReadwiseClient;
use crate::error::Result;
use crate::mcp::ToolCallResult;

/// MCP tool handler backed by a [`ReadwiseClient`]
///
/// Holds no mutable state; invocations are independent and safely
/// concurrent.
pub struct ReadwiseHandler {
    client: ReadwiseClient,
}

impl ReadwiseHandler {
    pub fn new(client: ReadwiseClient) -> Self {
        Self { client }
    }

    pub(crate) fn client(&self) -> &ReadwiseClient {
        &self.client
    }

    /// Dispatch a tools/call by name
    pub async fn handle_tool_call(&self, name: &str, params: Value) -> ToolCallResult {
        let outcome: Result<String> = match name {
            // Reader tools
            "readwise_save_document" => self.tool_save_document(params).await,
            "readwise_list_documents" => self.tool_list_documents(params).await,
            "readwise_update_document" => self.tool_update_document(params).await,
            "readwise_delete_document" => self.tool_delete_document(params).await,
            "readwise_list_tags" => self.tool_list_tags(params).await,
            "readwise_topic_search" => self.tool_topic_search(params).await,
            // Highlights tools
            "readwise_list_highlights" => self.tool_list_highlights(params).await,
            "readwise_get_daily_review" => self.tool_get_daily_review(params).await,
            "readwise_search_highlights" => self.tool_search_highlights(params).await,
            "readwise_list_books" => self.tool_list_books(params).await,
            "readwise_get_book_highlights" => self.tool_get_book_highlights(params).await,
            "readwise_export_highlights" => self.tool_export_highlights(params).await,
            "readwise_create_highlight" => self.tool_create_highlight(params).await,
            _ => return ToolCallResult::error(format!("Error: unknown tool: {}", name)),
        };

        match outcome {
            Ok(text) => ToolCallResult::text(text),
            Err(e) => {
                tracing::error!("Tool {} failed: {}", name, e);
                ToolCallResult::error(format!("Error: {}", e))
            }
        }
    }
}
