//! Shared helpers: a stub Readwise remote served from an ephemeral port
//!
//! Tests build a small axum router with canned responses, bind it to
//! 127.0.0.1:0, and point a real client at it through the overridable
//! base URLs.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::Router;
use serde_json::{json, Value};

use readwise_mcp::client::{ClientConfig, ReadwiseClient};

/// Serve a router on an ephemeral port, returning its base URL
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("stub server addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    format!("http://{}", addr)
}

/// Client pointed at a stub server
pub fn client_for(base_url: &str) -> ReadwiseClient {
    client_with_max_pages(base_url, 500)
}

pub fn client_with_max_pages(base_url: &str, max_pages: u32) -> ReadwiseClient {
    let mut config = ClientConfig::new("test-token").with_max_pages(max_pages);
    config.reader_base_url = format!("{}/api/v3", base_url);
    config.highlights_base_url = format!("{}/api/v2", base_url);
    ReadwiseClient::new(config).expect("test client")
}

/// Shared request counter for asserting how many pages were fetched
#[derive(Clone, Default)]
pub struct RequestCounter(Arc<AtomicUsize>);

impl RequestCounter {
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// One page of a v2-style numbered listing over `total` synthetic
/// highlights, ids ascending from 0
pub fn paged_highlights(total: usize, page_size: usize, page: usize) -> Value {
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total);
    let results: Vec<Value> = (start..end)
        .map(|i| {
            json!({
                "id": i as i64,
                "text": format!("highlight {}", i),
                "book_id": 1,
            })
        })
        .collect();
    let next = if end < total {
        Some(format!("https://stub.invalid/page/{}", page + 1))
    } else {
        None
    };
    json!({
        "count": total,
        "next": next,
        "previous": null,
        "results": results,
    })
}

/// Parse a query-parameter map's page number, defaulting to 1
pub fn page_param(params: &HashMap<String, String>) -> usize {
    params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1)
}
