use crate::archive;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(inputs: &[P], output: Q) -> Result<()> {
    let output = output.as_ref();
    archive::bundle(inputs, output)
        .with_context(|| format!("Failed to bundle into {}", output.display()))?;

    println!("Bundled {} file(s) into {}", inputs.len(), output.display());

    Ok(())
}
