use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P) -> Result<()> {
    let doc = PdfDocument::open(&path)?;

    println!("File: {}", path.as_ref().display());
    println!("Pages: {}", doc.page_count());
    println!("Size: {}", format_size(doc.file_size()));

    Ok(())
}

pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let b = bytes as f64;
    if b >= MB {
        format!("{:.2} MB ({} bytes)", b / MB, bytes)
    } else if b >= KB {
        format!("{:.1} KB ({} bytes)", b / KB, bytes)
    } else {
        format!("{} bytes", bytes)
    }
}
