//! Readwise MCP server binary
//!
//! Run with: readwise-mcp-server

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use readwise_mcp::client::{ClientConfig, ReadwiseClient};
use readwise_mcp::handler::ReadwiseHandler;
use readwise_mcp::server::{router, AuthPolicy};

#[derive(Parser, Debug)]
#[command(name = "readwise-mcp-server")]
#[command(about = "Readwise MCP server exposing Reader and Highlights APIs as tools")]
struct Args {
    /// Readwise API token
    #[arg(long, env = "READWISE_TOKEN")]
    readwise_token: String,

    /// Inbound bearer token required from MCP clients (unset = no auth)
    #[arg(long, env = "MCP_API_KEY")]
    mcp_api_key: Option<String>,

    /// Listening host
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Listening port
    #[arg(long, env = "PORT", default_value = "8000")]
    port: u16,

    /// Safety cap on pages fetched per aggregation loop
    #[arg(long, env = "READWISE_MAX_PAGES", default_value = "500")]
    max_pages: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = ClientConfig::new(args.readwise_token).with_max_pages(args.max_pages);
    let client = ReadwiseClient::new(config)?;
    let handler = Arc::new(ReadwiseHandler::new(client));

    if args.mcp_api_key.is_none() {
        tracing::warn!("MCP_API_KEY not set - server will run without authentication");
    }
    let policy = AuthPolicy::new(args.mcp_api_key);
    let auth_state = if policy.enabled() { "enabled" } else { "disabled" };

    let app = router(handler, policy);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "Readwise MCP server listening on {} (authentication: {})",
        addr,
        auth_state
    );
    axum::serve(listener, app).await?;

    Ok(())
}
