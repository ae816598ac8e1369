//! Splitting a source PDF into `part_<n>.pdf` files.
//!
//! Two partitioners share the same output convention:
//! - [`pages::split_by_boundaries`] cuts after explicit page numbers
//! - [`size::split_by_size`] grows each part until it would reach a byte limit
//!
//! [`process`] picks one based on a mode name and checks the parameters that
//! mode needs before anything touches the output folder.

pub mod pages;
pub mod size;

use crate::error::{Result, SplitError};
use crate::page_range::PageRange;
use crate::pdf::document::write_pdf_bytes;
use crate::pdf::PdfDocument;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

pub use size::SizePolicy;

/// Where split parts go when the caller does not say otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "output_parts";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Cut after each listed page number
    Pages,
    /// Cut whenever a part reaches the size limit
    Size,
}

impl FromStr for SplitMode {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '_' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "pages" | "by-pages" | "by-page-boundaries" => Ok(SplitMode::Pages),
            "size" | "by-size" | "by-max-size" => Ok(SplitMode::Size),
            _ => Err(SplitError::invalid_input(format!(
                "unknown split mode: {:?} (expected \"pages\" or \"size\")",
                s
            ))),
        }
    }
}

/// One split operation, as handed over by the CLI or the MCP server.
#[derive(Debug, Clone)]
pub struct SplitRequest {
    pub input: PathBuf,
    pub mode: String,
    /// Boundary list for page mode, e.g. "3,5,10"
    pub split_pages: Option<String>,
    /// Size limit for size mode, in mebibytes
    pub max_size_mb: Option<f64>,
    pub output_dir: PathBuf,
    pub size_policy: SizePolicy,
}

impl SplitRequest {
    pub fn new(input: impl Into<PathBuf>, mode: impl Into<String>) -> Self {
        SplitRequest {
            input: input.into(),
            mode: mode.into(),
            split_pages: None,
            max_size_mb: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            size_policy: SizePolicy::default(),
        }
    }
}

/// A part that has been written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPart {
    pub path: PathBuf,
    pub pages: PageRange,
    pub bytes: u64,
}

enum Plan<'a> {
    Pages(&'a str),
    Size(f64),
}

/// Run one split and return the written files in part order.
///
/// Parameters are validated before the output folder is created or the
/// source is opened; in page mode nothing is written unless every boundary
/// is valid.
pub fn process(request: &SplitRequest) -> Result<Vec<PathBuf>> {
    Ok(process_parts(request)?
        .into_iter()
        .map(|part| part.path)
        .collect())
}

/// Like [`process`], but keeps the page range and size of every part.
pub fn process_parts(request: &SplitRequest) -> Result<Vec<SplitPart>> {
    let plan = match request.mode.parse::<SplitMode>()? {
        SplitMode::Pages => match request.split_pages.as_deref() {
            Some(text) if !text.trim().is_empty() => Plan::Pages(text),
            _ => return Err(SplitError::invalid_input("no boundaries given")),
        },
        SplitMode::Size => match request.max_size_mb {
            Some(mb) => {
                size::threshold_bytes(mb)?;
                Plan::Size(mb)
            }
            None => return Err(SplitError::invalid_input("no maximum size given")),
        },
    };

    let output_dir = &request.output_dir;
    std::fs::create_dir_all(output_dir).map_err(|e| SplitError::io(output_dir, e))?;

    let doc = PdfDocument::open(&request.input)?;
    info!(
        input = %request.input.display(),
        pages = doc.page_count(),
        bytes = doc.file_size(),
        "splitting document"
    );

    let parts = match plan {
        Plan::Pages(text) => pages::split_by_boundaries(&doc, text, output_dir)?,
        Plan::Size(mb) => size::split_by_size(&doc, mb, request.size_policy, output_dir)?,
    };

    info!(
        parts = parts.len(),
        bytes = parts.iter().map(|p| p.bytes).sum::<u64>(),
        "split complete"
    );
    Ok(parts)
}

/// `part_<n>.pdf` inside `dir`, `n` being 1-based.
pub fn part_path(dir: &Path, number: usize) -> PathBuf {
    dir.join(format!("part_{}.pdf", number))
}

fn write_part(bytes: &[u8], pages: PageRange, dir: &Path, number: usize) -> Result<SplitPart> {
    debug_assert!(!pages.is_empty());
    let path = part_path(dir, number);
    let written = write_pdf_bytes(bytes, &path)?;
    info!(path = %path.display(), pages = %pages, bytes = written, "wrote part");
    Ok(SplitPart {
        path,
        pages,
        bytes: written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::{create_test_pdf, pages_in};
    use tempfile::TempDir;

    fn source(dir: &TempDir, pages: u32, padding: usize) -> PathBuf {
        let path = dir.path().join("source.pdf");
        std::fs::write(&path, create_test_pdf(pages, padding)).unwrap();
        path
    }

    fn request(dir: &TempDir, input: PathBuf, mode: &str) -> SplitRequest {
        let mut req = SplitRequest::new(input, mode);
        req.output_dir = dir.path().join("out");
        req
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("pages".parse::<SplitMode>().unwrap(), SplitMode::Pages);
        assert_eq!("By Page Boundaries".parse::<SplitMode>().unwrap(), SplitMode::Pages);
        assert_eq!("by_max_size".parse::<SplitMode>().unwrap(), SplitMode::Size);
        assert_eq!(" SIZE ".parse::<SplitMode>().unwrap(), SplitMode::Size);
        assert!(matches!(
            "chapters".parse::<SplitMode>(),
            Err(SplitError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_process_by_pages() {
        let dir = TempDir::new().unwrap();
        let mut req = request(&dir, source(&dir, 10, 0), "pages");
        req.split_pages = Some("3,5".to_string());

        let files = process(&req).unwrap();
        let out = dir.path().join("out");
        assert_eq!(
            files,
            vec![
                out.join("part_1.pdf"),
                out.join("part_2.pdf"),
                out.join("part_3.pdf")
            ]
        );
        let counts: Vec<usize> = files.iter().map(|f| pages_in(f)).collect();
        assert_eq!(counts, vec![3, 2, 5]);
    }

    #[test]
    fn test_process_by_size() {
        let dir = TempDir::new().unwrap();
        let mut req = request(&dir, source(&dir, 4, 0), "size");
        req.max_size_mb = Some(50.0);

        let files = process(&req).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(pages_in(&files[0]), 4);
    }

    #[test]
    fn test_process_creates_nested_output_dir() {
        let dir = TempDir::new().unwrap();
        let mut req = request(&dir, source(&dir, 2, 0), "pages");
        req.output_dir = dir.path().join("a").join("b");
        req.split_pages = Some("1".to_string());

        let files = process(&req).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.starts_with(dir.path().join("a/b"))));
    }

    #[test]
    fn test_process_requires_boundaries() {
        let dir = TempDir::new().unwrap();
        let input = source(&dir, 3, 0);
        for text in [None, Some(""), Some("   ")] {
            let mut req = request(&dir, input.clone(), "pages");
            req.split_pages = text.map(str::to_string);
            assert!(matches!(process(&req), Err(SplitError::InvalidInput(_))));
        }
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_process_requires_positive_size() {
        let dir = TempDir::new().unwrap();
        let input = source(&dir, 3, 0);
        for mb in [None, Some(0.0), Some(-2.0), Some(f64::NAN)] {
            let mut req = request(&dir, input.clone(), "size");
            req.max_size_mb = mb;
            assert!(matches!(process(&req), Err(SplitError::InvalidInput(_))));
        }
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_process_rejects_unknown_mode() {
        let dir = TempDir::new().unwrap();
        let mut req = request(&dir, source(&dir, 3, 0), "rotate");
        req.split_pages = Some("1".to_string());
        assert!(matches!(process(&req), Err(SplitError::InvalidInput(_))));
    }

    #[test]
    fn test_malformed_boundaries_write_nothing() {
        let dir = TempDir::new().unwrap();
        let mut req = request(&dir, source(&dir, 10, 0), "pages");
        req.split_pages = Some("3,a,5".to_string());

        assert!(matches!(process(&req), Err(SplitError::InvalidInput(_))));
        let written = std::fs::read_dir(dir.path().join("out")).unwrap().count();
        assert_eq!(written, 0);
    }

    #[test]
    fn test_out_of_range_boundary_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut req = request(&dir, source(&dir, 10, 0), "pages");
        req.split_pages = Some("3,11".to_string());

        let err = process(&req).unwrap_err();
        assert!(matches!(
            err,
            SplitError::OutOfRange {
                boundary: 11,
                total_pages: 10
            }
        ));
        let written = std::fs::read_dir(dir.path().join("out")).unwrap().count();
        assert_eq!(written, 0);
    }

    #[test]
    fn test_invalid_source_document() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.pdf");
        std::fs::write(&input, b"this is not a pdf").unwrap();
        let mut req = request(&dir, input, "pages");
        req.split_pages = Some("1".to_string());

        assert!(matches!(
            process(&req),
            Err(SplitError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn test_repeat_runs_are_byte_identical() {
        let dir = TempDir::new().unwrap();
        let input = source(&dir, 8, 500);

        let mut first = request(&dir, input.clone(), "size");
        first.max_size_mb = Some(0.002);
        first.output_dir = dir.path().join("first");
        let mut second = first.clone();
        second.output_dir = dir.path().join("second");

        let a = process(&first).unwrap();
        let b = process(&second).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.file_name(), y.file_name());
            assert_eq!(std::fs::read(x).unwrap(), std::fs::read(y).unwrap());
        }
    }
}
