use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::archive;
use crate::pdf::PdfDocument;
use crate::split::{process_parts, SizePolicy, SplitRequest, DEFAULT_OUTPUT_DIR};

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitRequest {
    #[schemars(description = "Path to the PDF file to split")]
    pub path: String,
    #[schemars(description = "Split mode: 'pages' (cut after listed pages) or 'size' (cut by maximum file size)")]
    pub mode: String,
    #[schemars(description = "For 'pages' mode: last page of each part, 1-based (e.g., '3,5,10')")]
    #[serde(default)]
    pub split_pages: Option<String>,
    #[schemars(description = "For 'size' mode: maximum size of each part in MB")]
    #[serde(default)]
    pub max_size_mb: Option<f64>,
    #[schemars(description = "Directory for part_1.pdf, part_2.pdf, ... (default: output_parts)")]
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[schemars(description = "For 'size' mode: keep the page that crosses the limit in the part it crossed (default: false)")]
    #[serde(default)]
    pub overshoot: bool,
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfBundleRequest {
    #[schemars(description = "Files to pack, in order")]
    pub files: Vec<String>,
    #[schemars(description = "Output zip archive path")]
    pub output: String,
}

#[derive(Debug, Clone)]
pub struct SplitServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl SplitServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for SplitServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl SplitServer {
    #[tool(description = "Get the page count and file size of a PDF")]
    fn pdf_info(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        match PdfDocument::open(&path) {
            Ok(doc) => {
                let result = PdfInfoResult {
                    path: doc.path().to_string(),
                    page_count: doc.page_count(),
                    file_size: doc.file_size(),
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Split a PDF into part_1.pdf, part_2.pdf, ... either after listed page numbers ('pages' mode) or by maximum part size in MB ('size' mode)")]
    fn pdf_split(&self, Parameters(req): Parameters<PdfSplitRequest>) -> String {
        let request = split_request(req);
        match process_parts(&request) {
            Ok(parts) => {
                let result = SplitResult {
                    output_dir: request.output_dir.display().to_string(),
                    parts: parts
                        .into_iter()
                        .map(|p| PartResult {
                            path: p.path.display().to_string(),
                            first_page: p.pages.start + 1,
                            last_page: p.pages.end,
                            bytes: p.bytes,
                        })
                        .collect(),
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Pack files (e.g. the parts written by pdf_split) into a single zip archive")]
    fn pdf_bundle(&self, Parameters(req): Parameters<PdfBundleRequest>) -> String {
        match archive::bundle(&req.files, &req.output) {
            Ok(bytes) => {
                let result = BundleResult {
                    archive: req.output,
                    file_count: req.files.len() as u32,
                    bytes,
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }
}

fn split_request(req: PdfSplitRequest) -> SplitRequest {
    SplitRequest {
        input: PathBuf::from(req.path),
        mode: req.mode,
        split_pages: req.split_pages,
        max_size_mb: req.max_size_mb,
        output_dir: PathBuf::from(req.output_dir),
        size_policy: if req.overshoot {
            SizePolicy::Overshoot
        } else {
            SizePolicy::Strict
        },
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PdfInfoResult {
    pub path: String,
    pub page_count: u32,
    pub file_size: u64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PartResult {
    pub path: String,
    pub first_page: u32,
    pub last_page: u32,
    pub bytes: u64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SplitResult {
    pub output_dir: String,
    pub parts: Vec<PartResult>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct BundleResult {
    pub archive: String,
    pub file_count: u32,
    pub bytes: u64,
}

impl ServerHandler for SplitServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF splitting tools. Use pdf_info to get the page count, pdf_split to cut a PDF \
                 into parts by page boundaries or by maximum size, and pdf_bundle to pack the \
                 resulting parts into a zip archive."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = SplitServer::new();

    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
