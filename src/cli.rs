use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::split::DEFAULT_OUTPUT_DIR;

#[derive(Parser)]
#[command(name = "pdfsplit")]
#[command(about = "Split PDFs by page boundaries or by maximum file size, with MCP server support")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Show page count and file size
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Split a PDF into part_1.pdf, part_2.pdf, ...
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Split mode: "pages" (after listed pages) or "size" (by max file size)
        #[arg(short, long)]
        mode: String,

        /// Last page of each part, 1-based (e.g., "3,5,10")
        #[arg(short, long)]
        pages: Option<String>,

        /// Maximum size of each part in MB
        #[arg(short = 's', long)]
        max_size_mb: Option<f64>,

        /// Let a part go over the size limit with the page that crossed it
        #[arg(long)]
        overshoot: bool,

        /// Output directory
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Also pack all parts into this zip archive
        #[arg(short, long)]
        zip: Option<PathBuf>,
    },

    /// Pack files into a single zip archive
    Bundle {
        /// Files to pack
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output archive
        #[arg(short, long)]
        output: PathBuf,
    },
}
