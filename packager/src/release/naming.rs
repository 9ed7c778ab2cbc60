//! Release naming policy.
//!
//! Every artefact derives its name from the product, the version and the
//! platform: `<product>-<version>-<platform>`. The staging directory carries
//! that name verbatim and the archive appends the format extension.

use crate::error::{PackagerError, Result};
use crate::platform::Platform;
use std::fmt;

/// A release version.
///
/// The value is opaque: only presence is checked, so `2.1.0`, `v2.1.0-rc1`
/// and `nightly` are all accepted.
///
/// # Examples
///
/// ```
/// use ruplacer_packager::release::naming::Version;
///
/// let version = Version::try_from("2.1.0").expect("non-empty version");
/// assert_eq!(version.as_str(), "2.1.0");
/// assert!(Version::try_from("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    /// Return the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Version {
    type Error = PackagerError;

    fn try_from(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Err(PackagerError::InvalidVersion);
        }
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for Version {
    type Error = PackagerError;

    fn try_from(value: String) -> Result<Self> {
        if value.trim().is_empty() {
            return Err(PackagerError::InvalidVersion);
        }
        Ok(Self(value))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The deterministic name of one release.
///
/// # Examples
///
/// ```
/// use ruplacer_packager::platform::Platform;
/// use ruplacer_packager::release::naming::{ReleaseName, Version};
///
/// let name = ReleaseName::new(
///     "ruplacer",
///     Version::try_from("2.1.0").expect("valid"),
///     Platform::from("windows"),
/// );
/// assert_eq!(name.to_string(), "ruplacer-2.1.0-windows");
/// assert_eq!(name.archive_filename(), "ruplacer-2.1.0-windows.zip");
/// assert_eq!(name.binary_filename(), "ruplacer.exe");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseName {
    product: String,
    version: Version,
    platform: Platform,
}

impl ReleaseName {
    /// Create a release name from its components.
    #[must_use]
    pub fn new(product: impl Into<String>, version: Version, platform: Platform) -> Self {
        Self {
            product: product.into(),
            version,
            platform,
        }
    }

    /// Return the product component.
    #[must_use]
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Return the version component.
    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Return the platform component.
    #[must_use]
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Name of the staging directory (and the archive's root directory).
    #[must_use]
    pub fn staging_dir_name(&self) -> String {
        self.to_string()
    }

    /// Archive filename including the format extension.
    #[must_use]
    pub fn archive_filename(&self) -> String {
        format!("{self}{}", self.platform.archive_format().extension())
    }

    /// Binary filename with the platform's executable suffix.
    #[must_use]
    pub fn binary_filename(&self) -> String {
        format!("{}{}", self.product, self.platform.executable_suffix())
    }
}

impl fmt::Display for ReleaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.product, self.version, self.platform)
    }
}
