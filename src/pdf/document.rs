use crate::error::{Result, SplitError};
use lopdf::{Document, ObjectId};
use std::collections::BTreeSet;
use std::path::Path;

/// A read-only source PDF.
pub struct PdfDocument {
    doc: Document,
    pages: Vec<Page>,
    path: String,
    file_size: u64,
}

/// One page of a [`PdfDocument`].
///
/// Pages are never mutated, so the same page may end up in any number of
/// output documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number in the source document
    pub number: u32,
    pub id: ObjectId,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| SplitError::io(path, e))?;
        Self::from_bytes(&bytes, path.display().to_string())
    }

    /// Parse a PDF that is already in memory (e.g. an uploaded file).
    ///
    /// `label` is only used in error messages.
    pub fn from_bytes(bytes: &[u8], label: impl Into<String>) -> Result<Self> {
        let path = label.into();
        let doc = Document::load_mem(bytes).map_err(|e| SplitError::InvalidDocument {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        // get_pages is keyed by page number, so this is already in page order
        let pages = doc
            .get_pages()
            .into_iter()
            .map(|(number, id)| Page { number, id })
            .collect();

        Ok(PdfDocument {
            doc,
            pages,
            path,
            file_size: bytes.len() as u64,
        })
    }

    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Zero-based page access.
    pub fn page_at(&self, index: u32) -> Option<Page> {
        self.pages.get(index as usize).copied()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }
}

/// An append-only set of pages taken from one source document.
///
/// Serializing clones the source, drops every page that was not appended and
/// prunes whatever is no longer referenced, so the byte size reported by
/// [`OutputDocument::to_bytes`] is exactly what ends up on disk.
#[derive(Clone)]
pub struct OutputDocument<'a> {
    source: &'a PdfDocument,
    pages: Vec<Page>,
}

impl<'a> OutputDocument<'a> {
    pub fn new(source: &'a PdfDocument) -> Self {
        OutputDocument {
            source,
            pages: Vec::new(),
        }
    }

    pub fn push(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Serialize to a PDF byte buffer.
    ///
    /// Pages keep their source order in the output; appending the same page
    /// twice has no additional effect.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let keep: BTreeSet<u32> = self.pages.iter().map(|p| p.number).collect();
        let to_delete: Vec<u32> = self
            .source
            .pages
            .iter()
            .map(|p| p.number)
            .filter(|n| !keep.contains(n))
            .collect();

        let mut doc = self.source.doc.clone();
        if !to_delete.is_empty() {
            doc.delete_pages(&to_delete);
        }
        doc.prune_objects();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).map_err(|e| SplitError::Write {
            path: self.source.path.clone(),
            reason: e.to_string(),
        })?;
        Ok(buffer)
    }
}

pub(crate) fn write_pdf_bytes<P: AsRef<Path>>(bytes: &[u8], path: P) -> Result<u64> {
    let path = path.as_ref();
    std::fs::write(path, bytes).map_err(|e| SplitError::io(path, e))?;
    Ok(bytes.len() as u64)
}
