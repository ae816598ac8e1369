use crate::error::{Result, SplitError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Pack `files` into a zip archive at `archive_path`.
///
/// Each file is stored under its base name, in the order given. The
/// archive's parent folder is created if needed.
pub fn bundle<P: AsRef<Path>, Q: AsRef<Path>>(files: &[P], archive_path: Q) -> Result<u64> {
    let archive_path = archive_path.as_ref();
    if files.is_empty() {
        return Err(SplitError::invalid_input("no files to bundle"));
    }

    if let Some(parent) = archive_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SplitError::io(parent, e))?;
    }

    let archive_err = |source| SplitError::Archive {
        path: archive_path.display().to_string(),
        source,
    };

    let file = File::create(archive_path).map_err(|e| SplitError::io(archive_path, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in files {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                SplitError::invalid_input(format!("not a file path: {}", path.display()))
            })?;
        let contents = std::fs::read(path).map_err(|e| SplitError::io(path, e))?;

        zip.start_file(name, options).map_err(archive_err)?;
        zip.write_all(&contents)
            .map_err(|e| SplitError::io(archive_path, e))?;
    }

    let mut writer = zip.finish().map_err(archive_err)?;
    writer
        .flush()
        .map_err(|e| SplitError::io(archive_path, e))?;

    let size = std::fs::metadata(archive_path)
        .map_err(|e| SplitError::io(archive_path, e))?
        .len();
    info!(
        archive = %archive_path.display(),
        files = files.len(),
        bytes = size,
        "bundled parts"
    );
    Ok(size)
}
