//! SHA-256 checksums for published archives.
//!
//! The sidecar uses the `sha256sum` text format (`<hex>  <filename>`) so it
//! can be verified with `sha256sum -c` next to the downloaded archive.

use crate::error::{PackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;

/// Extension appended to the archive filename for the sidecar file.
pub const SIDECAR_EXTENSION: &str = "sha256";

/// Compute the lowercase hex SHA-256 digest of a file.
///
/// # Errors
///
/// Returns [`PackagerError::Io`] if the file cannot be read.
pub fn compute_sha256(path: &Utf8Path) -> Result<String> {
    let mut archive = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut archive, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Write `<archive>.sha256` beside the archive and return its path.
///
/// # Errors
///
/// Returns [`PackagerError::Io`] if the archive cannot be read or the
/// sidecar cannot be written.
pub fn write_sidecar(archive_path: &Utf8Path) -> Result<Utf8PathBuf> {
    let file_name = archive_path
        .file_name()
        .ok_or_else(|| PackagerError::DistFailed {
            reason: format!("archive path {archive_path} has no filename"),
        })?;
    let digest = compute_sha256(archive_path)?;
    let sidecar = archive_path.with_file_name(format!("{file_name}.{SIDECAR_EXTENSION}"));
    fs::write(&sidecar, format!("{digest}  {file_name}\n"))?;
    Ok(sidecar)
}
