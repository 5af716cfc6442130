//! stratus-mcp - Google Cloud Storage MCP server
//!
//! Exposes GCS bucket and object operations as MCP tools over stdio, so an
//! orchestrating agent can perform storage operations without holding SDK
//! credentials.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use st_core::Config;
use st_gcs::GcsStore;
use stratus_mcp::server::StratusMcpServer;

/// stratus-mcp - Google Cloud Storage MCP server
#[derive(Parser, Debug)]
#[command(name = "stratus-mcp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// GCP project id (falls back to the ambient credentials' project)
    #[arg(long, env = "GOOGLE_CLOUD_PROJECT")]
    pub project: Option<String>,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries the MCP framing.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("fatal: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env();
    if let Some(project) = cli.project {
        config = config.with_project(project);
    }

    let store = GcsStore::connect(&config).await?;
    StratusMcpServer::new(Arc::new(store)).run().await
}
