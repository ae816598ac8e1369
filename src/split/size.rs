use super::{write_part, SplitPart};
use crate::error::{Result, SplitError};
use crate::page_range::PageRange;
use crate::pdf::{OutputDocument, Page, PdfDocument};
use std::path::Path;
use tracing::{debug, warn};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// What to do with the page that pushes a part to the size limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizePolicy {
    /// Hold the page back and start the next part with it, so every part with
    /// more than one page stays below the limit.
    #[default]
    Strict,
    /// Keep the page in the part that just reached the limit and close that
    /// part. Parts can end up somewhat over the limit.
    Overshoot,
}

/// Convert a limit in mebibytes to bytes, rejecting anything not above zero.
pub fn threshold_bytes(max_size_mb: f64) -> Result<f64> {
    if !max_size_mb.is_finite() || max_size_mb <= 0.0 {
        return Err(SplitError::invalid_input(format!(
            "maximum size must be a positive number of MB, got {}",
            max_size_mb
        )));
    }
    Ok(max_size_mb * BYTES_PER_MB)
}

/// The part currently being filled, along with its last measured serialization.
struct OpenPart<'a> {
    out: OutputDocument<'a>,
    start: u32,
    bytes: Vec<u8>,
}

impl<'a> OpenPart<'a> {
    fn new(doc: &'a PdfDocument, start: u32) -> Self {
        OpenPart {
            out: OutputDocument::new(doc),
            start,
            bytes: Vec::new(),
        }
    }

    fn range(&self) -> PageRange {
        PageRange::new(self.start, self.start + self.out.len() as u32)
    }
}

struct SizeSplitter<'a> {
    doc: &'a PdfDocument,
    limit: f64,
    output_dir: &'a Path,
    parts: Vec<SplitPart>,
}

impl<'a> SizeSplitter<'a> {
    /// Append `page` to a copy of `part`, serialize it, and report whether it
    /// reached the limit. Size comes from a full serialization every time.
    fn probe(&self, part: &OpenPart<'a>, page: Page) -> Result<(OpenPart<'a>, bool)> {
        let mut out = part.out.clone();
        out.push(page);
        let bytes = out.to_bytes()?;
        let full = bytes.len() as f64 >= self.limit;
        debug!(
            page = page.number,
            object = ?page.id,
            pages_in_part = out.len(),
            bytes = bytes.len(),
            full,
            "probed part size"
        );
        Ok((
            OpenPart {
                out,
                start: part.start,
                bytes,
            },
            full,
        ))
    }

    fn flush(&mut self, part: OpenPart<'a>) -> Result<u32> {
        let range = part.range();
        if range.len() == 1 && part.bytes.len() as f64 >= self.limit {
            warn!(
                page = range.start + 1,
                bytes = part.bytes.len(),
                limit = self.limit as u64,
                "single page exceeds the size limit; writing it as its own part"
            );
        }
        let number = self.parts.len() + 1;
        self.parts
            .push(write_part(&part.bytes, range, self.output_dir, number)?);
        Ok(range.end)
    }
}

/// Split `doc` into parts whose serialized size stays under `max_size_mb`.
///
/// Single forward pass: each page is appended to the open part and the part
/// is re-serialized to measure it. A page that is over the limit on its own
/// still becomes a one-page part; pages are never dropped.
pub fn split_by_size(
    doc: &PdfDocument,
    max_size_mb: f64,
    policy: SizePolicy,
    output_dir: &Path,
) -> Result<Vec<SplitPart>> {
    let mut splitter = SizeSplitter {
        doc,
        limit: threshold_bytes(max_size_mb)?,
        output_dir,
        parts: Vec::new(),
    };
    let mut open = OpenPart::new(doc, 0);

    for index in 0..doc.page_count() {
        let page = doc.page_at(index).ok_or(SplitError::OutOfRange {
            boundary: i64::from(index) + 1,
            total_pages: doc.page_count(),
        })?;

        let (grown, full) = splitter.probe(&open, page)?;
        if !full {
            open = grown;
            continue;
        }

        match policy {
            SizePolicy::Overshoot => {
                let next = splitter.flush(grown)?;
                open = OpenPart::new(splitter.doc, next);
            }
            SizePolicy::Strict if open.out.is_empty() => {
                let next = splitter.flush(grown)?;
                open = OpenPart::new(splitter.doc, next);
            }
            SizePolicy::Strict => {
                let next = splitter.flush(open)?;
                let (alone, full) = splitter.probe(&OpenPart::new(splitter.doc, next), page)?;
                if full {
                    let next = splitter.flush(alone)?;
                    open = OpenPart::new(splitter.doc, next);
                } else {
                    open = alone;
                }
            }
        }
    }

    if !open.out.is_empty() {
        splitter.flush(open)?;
    }

    Ok(splitter.parts)
}
