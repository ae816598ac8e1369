mod archive;
mod cli;
mod commands;
mod error;
mod mcp;
mod page_range;
mod pdf;
mod split;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use split::{SizePolicy, SplitRequest};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries MCP traffic and part paths, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pdfsplit=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Info { path } => {
            commands::info::run(&path)?;
        }
        Commands::Split {
            path,
            mode,
            pages,
            max_size_mb,
            overshoot,
            output_dir,
            zip,
        } => {
            let mut request = SplitRequest::new(path, mode);
            request.split_pages = pages;
            request.max_size_mb = max_size_mb;
            request.output_dir = output_dir;
            if overshoot {
                request.size_policy = SizePolicy::Overshoot;
            }
            commands::split::run(&request, zip.as_deref())?;
        }
        Commands::Bundle { inputs, output } => {
            commands::bundle::run(&inputs, &output)?;
        }
    }

    Ok(())
}
