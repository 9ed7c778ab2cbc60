//! The fixed list of files every release archive contains.

use super::naming::ReleaseName;
use camino::Utf8PathBuf;

/// Accompanying documents shipped next to the binary, in archive order.
pub const DOCUMENT_FILES: &[&str] = &["README.md", "CHANGELOG.md", "LICENSE"];

/// One file copied into the staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Source path, relative to the working directory.
    pub source: Utf8PathBuf,
    /// Filename inside the staging directory.
    pub file_name: String,
}

/// The complete set of files for one release.
///
/// # Examples
///
/// ```
/// use ruplacer_packager::platform::Platform;
/// use ruplacer_packager::release::manifest::Manifest;
/// use ruplacer_packager::release::naming::{ReleaseName, Version};
///
/// let release = ReleaseName::new(
///     "ruplacer",
///     Version::try_from("2.1.0").expect("valid"),
///     Platform::from("windows"),
/// );
/// let manifest = Manifest::for_release(&release);
/// assert_eq!(
///     manifest.file_names(),
///     vec!["ruplacer.exe", "README.md", "CHANGELOG.md", "LICENSE"]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Build the manifest for a release: the binary followed by the documents.
    #[must_use]
    pub fn for_release(release: &ReleaseName) -> Self {
        let binary = release.binary_filename();
        let mut entries = vec![ManifestEntry {
            source: binary_source_path(&binary),
            file_name: binary,
        }];
        entries.extend(DOCUMENT_FILES.iter().map(|&name| ManifestEntry {
            source: Utf8PathBuf::from(name),
            file_name: name.to_owned(),
        }));
        Self { entries }
    }

    /// Entries in copy order.
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Filenames as they appear in the staging directory.
    #[must_use]
    pub fn file_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.file_name.as_str()).collect()
    }
}

/// Location of a release binary inside cargo's build output tree.
#[must_use]
pub fn binary_source_path(binary_file_name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from("target")
        .join("release")
        .join(binary_file_name)
}
