//! Readwise MCP server
//!
//! A protocol adapter exposing the Readwise Reader (v3) and Highlights
//! (v2) APIs as MCP tools over HTTP. Stateless: every tool call is a
//! pass-through to the remote service, with pagination aggregated
//! client-side.

pub mod client;
pub mod error;
pub mod handler;
pub mod mcp;
pub mod server;
pub mod types;

pub use client::{ClientConfig, ReadwiseClient};
pub use error::{ReadwiseError, Result};
pub use handler::ReadwiseHandler;
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
