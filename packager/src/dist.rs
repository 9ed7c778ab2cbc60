//! Publication of the archive into the `dist/` directory.

use crate::error::{PackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;

/// Name of the directory that receives published archives.
pub const DIST_DIR: &str = "dist";

/// Path of the dist directory inside `work_dir`.
#[must_use]
pub fn dist_dir(work_dir: &Utf8Path) -> Utf8PathBuf {
    work_dir.join(DIST_DIR)
}

/// Move `archive_path` into `<work_dir>/dist/` and return its new location.
///
/// The dist directory is created when absent and a file of the same name is
/// replaced. When a plain rename fails (for example across filesystems) the
/// archive is copied and the original removed.
///
/// # Errors
///
/// Returns [`PackagerError::DistFailed`] if the directory cannot be created
/// or the archive cannot be moved.
pub fn finalize(work_dir: &Utf8Path, archive_path: &Utf8Path) -> Result<Utf8PathBuf> {
    let file_name = archive_path
        .file_name()
        .ok_or_else(|| PackagerError::DistFailed {
            reason: format!("archive path {archive_path} has no filename"),
        })?;

    let dist = dist_dir(work_dir);
    fs::create_dir_all(&dist).map_err(|e| PackagerError::DistFailed {
        reason: format!("failed to create {dist}: {e}"),
    })?;

    let destination = dist.join(file_name);
    debug!("moving {archive_path} to {destination}");
    move_file(archive_path, &destination).map_err(|e| PackagerError::DistFailed {
        reason: format!("failed to move {archive_path} to {destination}: {e}"),
    })?;

    Ok(destination)
}

fn move_file(from: &Utf8Path, to: &Utf8Path) -> std::io::Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)?;
    fs::remove_file(from)
}
