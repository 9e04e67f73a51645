//! mcp-demo - Model Context Protocol demo server over stdio.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mcp_demo::config::{self, Config};
use mcp_demo::mcp::McpServer;
use mcp_demo::wiring::OutboundPorts;
use mcp_demo::Error;

#[derive(Parser)]
#[command(name = "mcp-demo")]
#[command(about = "Demo MCP server: tools, resources and prompts over stdio")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.mcp-demo/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for diagnostics on stderr (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server on stdin/stdout (default)
    Serve,

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // Logs go to stderr; stdout carries protocol messages only.
    let level = cli.log_level.as_deref().unwrap_or(&config.log.level);
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = config::log_filter(level, rust_log.as_deref())?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let use_cases = OutboundPorts::production(&config)?.into_use_cases();
            let server = McpServer::new(use_cases);
            info!(version = env!("CARGO_PKG_VERSION"), "mcp-demo ready");
            server
                .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await?;
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
