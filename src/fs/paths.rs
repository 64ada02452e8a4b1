//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::file_name_for_url;
use crate::media::Resolution;

/// Directory the files of `resolution` are written to.
///
/// Galleries get a subdirectory named after the post URL; everything
/// else lands directly in `output_dir`.
pub fn get_download_path(output_dir: &Path, resolution: &Resolution) -> Result<PathBuf> {
    if resolution.is_gallery() {
        let folder = file_name_for_url(&resolution.source_url)?;
        Ok(output_dir.join(folder))
    } else {
        Ok(output_dir.to_path_buf())
    }
}

/// Ensure a directory exists, creating it if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}
