//! Staging of release files.
//!
//! Creates `<product>-<version>-<platform>/` in the working directory and
//! copies every manifest member into it. The directory is left in place after
//! the run.

use crate::error::{PackagerError, Result};
use crate::output::write_stderr_line;
use crate::release::manifest::Manifest;
use crate::release::naming::ReleaseName;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;
use std::io::Write;

/// Copies a release manifest into its staging directory.
pub struct Stager {
    work_dir: Utf8PathBuf,
    release: ReleaseName,
}

impl Stager {
    /// Create a stager for `release` rooted at `work_dir`.
    #[must_use]
    pub fn new(work_dir: &Utf8Path, release: ReleaseName) -> Self {
        Self {
            work_dir: work_dir.to_owned(),
            release,
        }
    }

    /// Full path of the staging directory.
    #[must_use]
    pub fn staging_path(&self) -> Utf8PathBuf {
        self.work_dir.join(self.release.staging_dir_name())
    }

    /// The release being staged.
    #[must_use]
    pub fn release(&self) -> &ReleaseName {
        &self.release
    }

    /// Create an empty staging directory.
    ///
    /// A directory left by an earlier run is emptied rather than reported, so
    /// the archive only ever holds the manifest.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::StagingFailed`] if a stale directory cannot
    /// be removed or the new one cannot be created.
    pub fn prepare(&self) -> Result<Utf8PathBuf> {
        let staging_path = self.staging_path();
        if staging_path.is_dir() {
            debug!("clearing stale staging directory {staging_path}");
            fs::remove_dir_all(&staging_path).map_err(|e| PackagerError::StagingFailed {
                reason: format!("failed to clear {staging_path}: {e}"),
            })?;
        }
        fs::create_dir_all(&staging_path).map_err(|e| PackagerError::StagingFailed {
            reason: format!("failed to create {staging_path}: {e}"),
        })?;
        Ok(staging_path)
    }

    /// Copy every manifest member into the staging directory, in order.
    ///
    /// Each copy is echoed as `<source> -> <staging dir>`.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::MissingSourceFile`] for the first member that
    /// does not exist, or [`PackagerError::StagingFailed`] if a copy fails.
    pub fn stage_all(
        &self,
        manifest: &Manifest,
        progress: &mut dyn Write,
    ) -> Result<Vec<Utf8PathBuf>> {
        let staging_path = self.staging_path();
        let staging_name = self.release.staging_dir_name();
        let mut staged = Vec::with_capacity(manifest.entries().len());

        for entry in manifest.entries() {
            let source = self.work_dir.join(&entry.source);
            if !source.is_file() {
                return Err(PackagerError::MissingSourceFile { path: source });
            }

            let dest = staging_path.join(&entry.file_name);
            write_stderr_line(progress, format!("{} -> {staging_name}", entry.source));
            debug!("copying {source} to {dest}");

            fs::copy(&source, &dest).map_err(|e| PackagerError::StagingFailed {
                reason: format!("failed to copy {source} to {dest}: {e}"),
            })?;
            staged.push(dest);
        }

        Ok(staged)
    }
}
