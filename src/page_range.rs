use crate::error::{Result, SplitError};
use std::fmt;
use std::ops::Range;

/// A contiguous run of pages, zero-based and half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        PageRange { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Zero-based page indices in this range
    pub fn indices(&self) -> Range<u32> {
        self.start..self.end
    }
}

impl fmt::Display for PageRange {
    /// Formats as 1-based inclusive page numbers, e.g. "4-5" or "7"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() == 1 {
            write!(f, "{}", self.start + 1)
        } else {
            write!(f, "{}-{}", self.start + 1, self.end)
        }
    }
}

/// Contiguous, gap-free ranges covering `[0, total_pages)` exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPlan {
    ranges: Vec<PageRange>,
}

impl PartitionPlan {
    /// Build a plan from 1-based inclusive end-of-segment page numbers.
    ///
    /// Every boundary must lie in `1..=total_pages`; the first that does not
    /// fails the whole plan. Duplicates and ordering do not matter. When the
    /// largest boundary is below `total_pages` a trailing segment picks up the
    /// remaining pages.
    pub fn from_boundaries(boundaries: &[i64], total_pages: u32) -> Result<Self> {
        if boundaries.is_empty() {
            return Err(SplitError::invalid_input("no boundaries given"));
        }

        if let Some(&boundary) = boundaries
            .iter()
            .find(|&&b| b < 1 || b > i64::from(total_pages))
        {
            return Err(SplitError::OutOfRange {
                boundary,
                total_pages,
            });
        }

        let mut ends: Vec<u32> = boundaries.iter().map(|&b| b as u32).collect();
        ends.sort_unstable();
        ends.dedup();

        let mut ranges = Vec::with_capacity(ends.len() + 1);
        let mut start = 0;
        for end in ends {
            ranges.push(PageRange::new(start, end));
            start = end;
        }
        if start < total_pages {
            ranges.push(PageRange::new(start, total_pages));
        }

        Ok(PartitionPlan { ranges })
    }

    pub fn ranges(&self) -> &[PageRange] {
        &self.ranges
    }
}

/// Parse a comma-separated boundary list like "3,5,10".
///
/// Whitespace around each entry is ignored. Anything that is not an integer
/// (including an empty entry such as the one in "3,,5") is rejected; range
/// checking is left to [`PartitionPlan::from_boundaries`].
pub fn parse_boundaries(s: &str) -> Result<Vec<i64>> {
    if s.trim().is_empty() {
        return Err(SplitError::invalid_input("no boundaries given"));
    }

    s.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<i64>().map_err(|_| {
                SplitError::invalid_input(format!("invalid page number: {:?}", part))
            })
        })
        .collect()
}
