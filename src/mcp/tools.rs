//! MCP tool definitions for the Readwise adapter

use serde_json::json;

use super::protocol::ToolDefinition;

/// All tool definitions: 6 Reader tools, 7 Highlights tools
pub const TOOL_DEFINITIONS: &[(&str, &str, &str)] = &[
    // Reader (v3)
    (
        "readwise_save_document",
        "Save a document to Readwise Reader",
        r#"{
            "type": "object",
            "properties": {
                "url": {"type": "string", "description": "The URL of the document to save"},
                "tags": {"type": "array", "items": {"type": "string"}, "description": "Tags to apply"},
                "location": {"type": "string", "enum": ["new", "later", "archive", "feed"], "default": "later"},
                "category": {"type": "string", "description": "Document category (article, email, rss, highlight, note, pdf, epub, tweet, video)", "default": "article"}
            },
            "required": ["url"]
        }"#,
    ),
    (
        "readwise_list_documents",
        "List documents from Readwise Reader with filtering and unlimited fetch support. Set fetch_all=true for incremental syncs together with updated_after.",
        r#"{
            "type": "object",
            "properties": {
                "location": {"type": "string", "enum": ["new", "later", "archive", "feed"], "description": "Filter by location"},
                "category": {"type": "string", "description": "Filter by category (article, email, rss, ...)"},
                "author": {"type": "string", "description": "Filter by author name (case-insensitive partial match)"},
                "site_name": {"type": "string", "description": "Filter by site name (case-insensitive partial match)"},
                "limit": {"type": "integer", "default": 20, "description": "Maximum documents to return. Ignored if fetch_all=true"},
                "fetch_all": {"type": "boolean", "default": false, "description": "Fetch ALL documents across all pages (ignores limit)"},
                "updated_after": {"type": "string", "description": "ISO 8601 timestamp - only documents updated after this time"},
                "with_full_content": {"type": "boolean", "default": false, "description": "Include full document content (may be large)"},
                "content_max_length": {"type": "integer", "description": "Truncate content to this many characters"}
            }
        }"#,
    ),
    (
        "readwise_update_document",
        "Update document metadata in Readwise Reader. Only provided fields are changed.",
        r#"{
            "type": "object",
            "properties": {
                "document_id": {"type": "string", "description": "The ID of the document to update"},
                "title": {"type": "string"},
                "author": {"type": "string"},
                "summary": {"type": "string"},
                "location": {"type": "string", "enum": ["new", "later", "archive", "feed"]},
                "tags": {"type": "array", "items": {"type": "string"}}
            },
            "required": ["document_id"]
        }"#,
    ),
    (
        "readwise_delete_document",
        "Delete a document from Readwise Reader",
        r#"{
            "type": "object",
            "properties": {
                "document_id": {"type": "string", "description": "The ID of the document to delete"}
            },
            "required": ["document_id"]
        }"#,
    ),
    (
        "readwise_list_tags",
        "Get all tags from Readwise Reader",
        r#"{
            "type": "object",
            "properties": {}
        }"#,
    ),
    (
        "readwise_topic_search",
        "Search Reader documents by topic. Fetches the full library and matches the query against title, summary, notes, and author fields (case-insensitive). May take a while on large libraries.",
        r#"{
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search query"},
                "location": {"type": "string", "enum": ["new", "later", "archive", "feed"], "description": "Restrict the search to one location"},
                "category": {"type": "string", "description": "Restrict the search to one category"},
                "limit": {"type": "integer", "default": 20, "description": "Maximum results to return"}
            },
            "required": ["query"]
        }"#,
    ),
    // Highlights (v2)
    (
        "readwise_list_highlights",
        "List highlights with filtering and unlimited fetch support",
        r#"{
            "type": "object",
            "properties": {
                "book_id": {"type": "integer", "description": "Filter by specific book ID"},
                "page_size": {"type": "integer", "default": 100, "description": "Highlights per page (max 1000, ignored if fetch_all=true)"},
                "page": {"type": "integer", "default": 1, "description": "Page number (ignored if fetch_all=true)"},
                "fetch_all": {"type": "boolean", "default": false, "description": "Fetch ALL highlights across all pages"},
                "highlighted_at__gt": {"type": "string", "description": "Only highlights after this date (ISO 8601)"},
                "highlighted_at__lt": {"type": "string", "description": "Only highlights before this date (ISO 8601)"}
            }
        }"#,
    ),
    (
        "readwise_get_daily_review",
        "Get daily review highlights (spaced repetition learning system)",
        r#"{
            "type": "object",
            "properties": {}
        }"#,
    ),
    (
        "readwise_search_highlights",
        "Search highlights by text query (searches highlight text and notes)",
        r#"{
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search term"},
                "page_size": {"type": "integer", "default": 100, "description": "Results per page (ignored if fetch_all=true)"},
                "page": {"type": "integer", "default": 1, "description": "Page number (ignored if fetch_all=true)"},
                "fetch_all": {"type": "boolean", "default": false, "description": "Fetch ALL matching highlights across all pages"}
            },
            "required": ["query"]
        }"#,
    ),
    (
        "readwise_list_books",
        "List books with highlight metadata and unlimited fetch support",
        r#"{
            "type": "object",
            "properties": {
                "category": {"type": "string", "description": "Filter by category (books, articles, tweets, podcasts)"},
                "page_size": {"type": "integer", "default": 100, "description": "Books per page (ignored if fetch_all=true)"},
                "page": {"type": "integer", "default": 1, "description": "Page number (ignored if fetch_all=true)"},
                "fetch_all": {"type": "boolean", "default": false, "description": "Fetch ALL books across all pages"},
                "last_highlight_at__gt": {"type": "string", "description": "Only books with highlights after this date (ISO 8601)"}
            }
        }"#,
    ),
    (
        "readwise_get_book_highlights",
        "Get ALL highlights from a specific book (automatically fetches all pages)",
        r#"{
            "type": "object",
            "properties": {
                "book_id": {"type": "integer", "description": "The ID of the book to get highlights from"}
            },
            "required": ["book_id"]
        }"#,
    ),
    (
        "readwise_export_highlights",
        "Bulk export ALL highlights for analysis and backup. Automatically fetches all pages; full exports from large libraries may take 30+ seconds. Use updated_after for incremental syncs.",
        r#"{
            "type": "object",
            "properties": {
                "updated_after": {"type": "string", "description": "Export only highlights updated after this date (ISO 8601)"},
                "include_deleted": {"type": "boolean", "default": false, "description": "Include deleted highlights"},
                "max_results": {"type": "integer", "description": "Limit on returned highlights, applied after the export"}
            }
        }"#,
    ),
    (
        "readwise_create_highlight",
        "Manually create a highlight in Readwise",
        r#"{
            "type": "object",
            "properties": {
                "text": {"type": "string", "description": "The highlight text"},
                "title": {"type": "string", "description": "Book/article title"},
                "author": {"type": "string", "description": "Author name"},
                "note": {"type": "string", "description": "Your note on the highlight"},
                "category": {"type": "string", "default": "books", "description": "Category (books, articles, tweets, podcasts)"},
                "highlighted_at": {"type": "string", "description": "When it was highlighted (ISO 8601)"}
            },
            "required": ["text"]
        }"#,
    ),
];

/// Get all tool definitions as ToolDefinition structs
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    TOOL_DEFINITIONS
        .iter()
        .map(|(name, description, schema)| ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::from_str(schema).unwrap_or(json!({})),
        })
        .collect()
}
