//! Archive creation for staged releases.
//!
//! Produces a single `.zip` or `.tar.gz` next to the staging directory. Every
//! entry lives under a root directory named after the staging directory, so
//! extracting the archive recreates it.

use crate::error::{PackagerError, Result};
use crate::platform::ArchiveFormat;
use camino::{Utf8Path, Utf8PathBuf};
use flate2::Compression;
use flate2::write::GzEncoder;
use log::debug;
use std::fs;
use std::io;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Archive the staging directory in the given format.
///
/// The archive is written beside `staging_dir` and named after it plus the
/// format extension. An archive left over from a previous run is replaced.
///
/// # Errors
///
/// Returns [`PackagerError::ArchiveFailed`] if the staging directory cannot
/// be read or the archive cannot be written.
pub fn create_archive(staging_dir: &Utf8Path, format: ArchiveFormat) -> Result<Utf8PathBuf> {
    let root_name = staging_dir
        .file_name()
        .ok_or_else(|| PackagerError::ArchiveFailed {
            path: staging_dir.to_owned(),
            reason: "staging directory has no name".to_owned(),
        })?;
    let archive_path =
        staging_dir.with_file_name(format!("{root_name}{}", format.extension()));

    debug!("archiving {staging_dir} as {format} into {archive_path}");
    let written = match format {
        ArchiveFormat::Zip => write_zip(staging_dir, root_name, &archive_path),
        ArchiveFormat::TarGz => write_tar_gz(staging_dir, root_name, &archive_path),
    };

    written.map_err(|err| PackagerError::ArchiveFailed {
        path: archive_path.clone(),
        reason: err.to_string(),
    })?;

    Ok(archive_path)
}

fn write_tar_gz(staging_dir: &Utf8Path, root_name: &str, archive_path: &Utf8Path) -> Result<()> {
    let output = fs::File::create(archive_path)?;
    let encoder = GzEncoder::new(output, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.mode(tar::HeaderMode::Deterministic);

    builder.append_dir_all(root_name, staging_dir)?;

    let encoder = builder.into_inner()?;
    encoder.finish()?;
    Ok(())
}

fn write_zip(staging_dir: &Utf8Path, root_name: &str, archive_path: &Utf8Path) -> Result<()> {
    let output = fs::File::create(archive_path)?;
    let mut writer = zip::ZipWriter::new(output);

    writer.add_directory(format!("{root_name}/"), SimpleFileOptions::default())?;

    for relative in collect_files(staging_dir)? {
        let source_path = staging_dir.join(&relative);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(file_mode(&source_path)?);

        // Zip entry names always use forward slashes.
        let entry_name = format!("{root_name}/{}", relative.as_str().replace('\\', "/"));
        writer.start_file(entry_name, options)?;
        let mut source = fs::File::open(&source_path)?;
        io::copy(&mut source, &mut writer)?;
    }

    writer.finish()?;
    Ok(())
}

/// Relative paths of all regular files below `dir`, sorted for a stable
/// archive layout.
fn collect_files(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![Utf8PathBuf::new()];

    while let Some(relative_dir) = pending.pop() {
        for entry in dir.join(&relative_dir).read_dir_utf8()? {
            let entry = entry?;
            let relative = relative_dir.join(entry.file_name());
            if entry.file_type()?.is_dir() {
                pending.push(relative);
            } else {
                files.push(relative);
            }
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(unix)]
fn file_mode(path: &Utf8Path) -> Result<u32> {
    use std::os::unix::fs::PermissionsExt;

    Ok(fs::metadata(path)?.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn file_mode(path: &Utf8Path) -> Result<u32> {
    let is_binary = path.extension() == Some("exe");
    Ok(if is_binary { 0o755 } else { 0o644 })
}
