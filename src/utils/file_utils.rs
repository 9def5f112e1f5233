use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{Result, UtilsError};

/// Creates every directory in `paths`, parents included.
///
/// Existing directories are left alone, so repeated calls are harmless. Stops
/// at the first path that cannot be created.
pub fn create_directories<P: AsRef<Path>>(paths: &[P], verbose: bool) -> Result<()> {
    for path in paths {
        let path = path.as_ref();
        fs::create_dir_all(path).map_err(|source| UtilsError::CreateDir {
            path: path.to_path_buf(),
            source,
        })?;
        if verbose {
            info!("Created directory at: {}", path.display());
        }
    }
    Ok(())
}

/// Returns the size of the file at `path` as `"~ N KB"`.
pub fn get_size(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).map_err(|e| UtilsError::from_read(path, e))?;
    Ok(format!("~ {} KB", size_in_kb(metadata.len())))
}

/// `bytes / 1024` rounded to the nearest integer, ties to even.
pub fn size_in_kb(bytes: u64) -> u64 {
    let whole = bytes / 1024;
    let rest = bytes % 1024;
    match rest.cmp(&512) {
        std::cmp::Ordering::Less => whole,
        std::cmp::Ordering::Greater => whole + 1,
        std::cmp::Ordering::Equal => whole + (whole & 1),
    }
}
