use crate::archive;
use crate::split::{process, SplitRequest};
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(request: &SplitRequest, zip: Option<&Path>) -> Result<()> {
    let files = process(request)
        .with_context(|| format!("Failed to split {}", request.input.display()))?;

    for file in &files {
        println!("{}", file.display());
    }

    if let Some(zip) = zip {
        if files.is_empty() {
            eprintln!("No parts written; skipping {}", zip.display());
        } else {
            archive::bundle(&files, zip)
                .with_context(|| format!("Failed to bundle parts into {}", zip.display()))?;
            println!("{}", zip.display());
        }
    }

    eprintln!(
        "Split {} into {} part(s) in {}",
        request.input.display(),
        files.len(),
        request.output_dir.display()
    );

    Ok(())
}
