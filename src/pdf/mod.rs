pub mod document;

#[cfg(test)]
pub mod fixtures;

pub use document::{OutputDocument, Page, PdfDocument};
