// src/main.rs
// OpenProject MCP server - project, work package, and Gantt planning tools

use anyhow::Result;
use clap::{Parser, Subcommand};
use openproject_mcp::client::OpenProjectClient;
use openproject_mcp::config::OpenProjectConfig;
use openproject_mcp::http::create_shared_client;
use openproject_mcp::mcp::OpenProjectServer;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "openproject-mcp")]
#[command(about = "MCP server exposing OpenProject project and Gantt planning tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as MCP server on stdio (default)
    Serve,
}

async fn run_mcp_server() -> Result<()> {
    let config = OpenProjectConfig::from_env();
    let client = Arc::new(OpenProjectClient::new(&config, create_shared_client()));
    let server = OpenProjectServer::new(client);

    let transport = rmcp::transport::io::stdio();
    let service = rmcp::serve_server(server, transport).await?;
    service.waiting().await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // stdout belongs to the MCP stdio transport; logs stay on stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        None | Some(Commands::Serve) => run_mcp_server().await?,
    }

    Ok(())
}
