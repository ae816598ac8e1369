use super::{write_part, SplitPart};
use crate::error::{Result, SplitError};
use crate::page_range::{parse_boundaries, PageRange, PartitionPlan};
use crate::pdf::{OutputDocument, PdfDocument};
use std::path::Path;

/// Split `doc` after each page listed in `boundaries` (1-based, e.g. "3,5,10").
///
/// The whole list is checked against the document before the first part is
/// written, so a bad boundary leaves `output_dir` untouched.
pub fn split_by_boundaries(
    doc: &PdfDocument,
    boundaries: &str,
    output_dir: &Path,
) -> Result<Vec<SplitPart>> {
    let boundaries = parse_boundaries(boundaries)?;
    let plan = PartitionPlan::from_boundaries(&boundaries, doc.page_count())?;

    plan.ranges()
        .iter()
        .enumerate()
        .map(|(i, &range)| {
            let out = collect_range(doc, range)?;
            write_part(&out.to_bytes()?, range, output_dir, i + 1)
        })
        .collect()
}

fn collect_range(doc: &PdfDocument, range: PageRange) -> Result<OutputDocument<'_>> {
    let mut out = OutputDocument::new(doc);
    for index in range.indices() {
        let page = doc.page_at(index).ok_or(SplitError::OutOfRange {
            boundary: i64::from(index) + 1,
            total_pages: doc.page_count(),
        })?;
        out.push(page);
    }
    Ok(out)
}
