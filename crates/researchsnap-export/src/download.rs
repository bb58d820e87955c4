use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ExportError, Result};
use crate::raster::CardImage;

/// `citation-card-{layout}.{ext}`
pub fn file_name(image: &CardImage) -> String {
    format!("citation-card-{}.{}", image.layout.as_str(), image.extension())
}

/// Writes the image into `dir`, creating it if needed, and returns the file
/// path. An existing file of the same name is overwritten.
pub fn download(image: &CardImage, dir: &Path) -> Result<PathBuf> {
    let bytes = image.bytes()?;
    fs::create_dir_all(dir)
        .map_err(|e| ExportError::ExportFailed(format!("cannot create {}: {e}", dir.display())))?;

    let path = dir.join(file_name(image));
    fs::write(&path, bytes)
        .map_err(|e| ExportError::ExportFailed(format!("cannot write {}: {e}", path.display())))?;

    info!(path = %path.display(), "card exported");
    Ok(path)
}
