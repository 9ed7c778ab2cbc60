//! Target platform resolution.
//!
//! A release is labelled with a platform name that drives two decisions: the
//! archive format and whether the binary carries an `.exe` suffix. The name
//! either comes from the caller verbatim or is derived from the host
//! operating system.

use crate::error::{PackagerError, Result};
use log::warn;
use std::fmt;

/// Canonical name for macOS releases.
pub const MACOS: &str = "macos";

/// Canonical name for Linux releases.
pub const LINUX_X86_64: &str = "linux-x86_64";

/// Canonical name for Windows releases.
pub const WINDOWS: &str = "windows";

/// Host OS identifiers and the canonical platform each maps to.
///
/// Both the `sys.platform` style names used by CI images (`darwin`, `win32`)
/// and Rust's `std::env::consts::OS` names are accepted.
const HOST_OS_MAPPING: &[(&str, &str)] = &[
    ("darwin", MACOS),
    ("macos", MACOS),
    ("linux", LINUX_X86_64),
    ("win32", WINDOWS),
    ("windows", WINDOWS),
];

/// Archive container chosen for a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Deflate-compressed zip archive.
    Zip,
    /// Gzip-compressed tarball.
    TarGz,
}

impl ArchiveFormat {
    /// File extension (including the leading dot) for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Zip => ".zip",
            Self::TarGz => ".tar.gz",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zip => f.write_str("zip"),
            Self::TarGz => f.write_str("gztar"),
        }
    }
}

/// A resolved release platform.
///
/// Explicit platforms are kept verbatim: any string is accepted and anything
/// that is not exactly `windows` follows the non-Windows conventions.
///
/// # Examples
///
/// ```
/// use ruplacer_packager::platform::{ArchiveFormat, Platform};
///
/// let windows = Platform::from("windows");
/// assert_eq!(windows.archive_format(), ArchiveFormat::Zip);
/// assert_eq!(windows.executable_suffix(), ".exe");
///
/// let linux = Platform::from("linux-x86_64");
/// assert_eq!(linux.archive_format(), ArchiveFormat::TarGz);
/// assert!(linux.is_linux());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform(String);

impl Platform {
    /// Map a host operating system identifier to its canonical platform.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::UnsupportedPlatform`] when the identifier is
    /// not in the mapping.
    pub fn from_host_os(os: &str) -> Result<Self> {
        HOST_OS_MAPPING
            .iter()
            .find(|(host, _)| *host == os)
            .map(|(_, canonical)| Self((*canonical).to_owned()))
            .ok_or_else(|| PackagerError::UnsupportedPlatform { os: os.to_owned() })
    }

    /// Return the platform name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the Windows platform.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.0 == WINDOWS
    }

    /// Whether the platform name mentions Linux.
    #[must_use]
    pub fn is_linux(&self) -> bool {
        self.0.contains("linux")
    }

    /// Whether the name is one of the canonical platforms.
    #[must_use]
    pub fn is_known(&self) -> bool {
        [MACOS, LINUX_X86_64, WINDOWS].contains(&self.0.as_str())
    }

    /// Archive format for releases on this platform.
    #[must_use]
    pub fn archive_format(&self) -> ArchiveFormat {
        if self.is_windows() {
            ArchiveFormat::Zip
        } else {
            ArchiveFormat::TarGz
        }
    }

    /// Executable filename suffix (`.exe` on Windows, empty elsewhere).
    #[must_use]
    pub fn executable_suffix(&self) -> &'static str {
        if self.is_windows() { ".exe" } else { "" }
    }
}

impl From<&str> for Platform {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Platform {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the release platform comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlatformSource {
    /// Derive the platform from the host operating system.
    #[default]
    Auto,
    /// Use the caller-supplied value verbatim.
    Explicit(String),
}

impl PlatformSource {
    /// Build a source from an optional CLI value.
    #[must_use]
    pub fn from_option(value: Option<String>) -> Self {
        value.map_or(Self::Auto, Self::Explicit)
    }

    /// Whether the platform is detected from the host.
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Resolve the platform, using `host_os` for auto-detection.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::UnsupportedPlatform`] when `host_os` has no
    /// canonical mapping, or [`PackagerError::InvalidPlatform`] when an
    /// explicit name is empty or contains a path separator.
    pub fn resolve_with(&self, host_os: &str) -> Result<Platform> {
        match self {
            Self::Auto => Platform::from_host_os(host_os),
            Self::Explicit(value) => {
                check_explicit_name(value)?;
                let platform = Platform::from(value.as_str());
                if !platform.is_known() {
                    warn!(
                        "platform {platform} is not one of {MACOS}, {LINUX_X86_64}, {WINDOWS}; \
                         packaging with non-Windows conventions"
                    );
                }
                Ok(platform)
            }
        }
    }
}

/// The platform becomes part of the staging directory and archive names, so
/// it must be a single path component.
fn check_explicit_name(value: &str) -> Result<()> {
    let reason = if value.trim().is_empty() {
        "must not be empty"
    } else if value.contains(['/', '\\']) {
        "contains a path separator"
    } else if value == "." || value == ".." {
        "is a relative directory name"
    } else {
        return Ok(());
    };
    Err(PackagerError::InvalidPlatform {
        value: value.to_owned(),
        reason: reason.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::darwin("darwin", "macos")]
    #[case::rust_macos("macos", "macos")]
    #[case::linux("linux", "linux-x86_64")]
    #[case::win32("win32", "windows")]
    #[case::rust_windows("windows", "windows")]
    fn host_os_maps_to_canonical_name(#[case] os: &str, #[case] expected: &str) {
        let platform = Platform::from_host_os(os).expect("supported host");
        assert_eq!(platform.as_str(), expected);
    }

    #[rstest]
    #[case::freebsd("freebsd")]
    #[case::empty("")]
    #[case::cygwin("cygwin")]
    fn unknown_host_os_is_rejected(#[case] os: &str) {
        let err = Platform::from_host_os(os).expect_err("unsupported host");
        assert!(
            matches!(&err, PackagerError::UnsupportedPlatform { os: reported } if reported == os),
            "expected UnsupportedPlatform, got {err:?}"
        );
    }

    #[rstest]
    #[case::windows("windows", ArchiveFormat::Zip, ".exe")]
    #[case::macos("macos", ArchiveFormat::TarGz, "")]
    #[case::linux("linux-x86_64", ArchiveFormat::TarGz, "")]
    #[case::unknown("solaris-sparc", ArchiveFormat::TarGz, "")]
    #[case::windows_lookalike("windows-arm64", ArchiveFormat::TarGz, "")]
    fn archive_format_and_suffix_follow_platform(
        #[case] name: &str,
        #[case] format: ArchiveFormat,
        #[case] suffix: &str,
    ) {
        let platform = Platform::from(name);
        assert_eq!(platform.archive_format(), format);
        assert_eq!(platform.executable_suffix(), suffix);
    }

    #[rstest]
    #[case::canonical("linux-x86_64", true)]
    #[case::custom("linux-aarch64", true)]
    #[case::macos("macos", false)]
    #[case::windows("windows", false)]
    fn is_linux_matches_substring(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(Platform::from(name).is_linux(), expected);
    }

    #[test]
    fn explicit_source_is_used_verbatim() {
        let source = PlatformSource::Explicit("Plan9".to_owned());
        let platform = source.resolve_with("linux").expect("single-component names pass");
        assert_eq!(platform.as_str(), "Plan9");
        assert!(!platform.is_known());
    }

    #[rstest]
    #[case::forward_slash("a/b")]
    #[case::backslash("a\\b")]
    #[case::parent("..")]
    #[case::blank("  ")]
    fn explicit_source_rejects_unusable_names(#[case] value: &str) {
        let err = PlatformSource::Explicit(value.to_owned())
            .resolve_with("linux")
            .expect_err("name must be rejected");
        assert!(
            matches!(&err, PackagerError::InvalidPlatform { value: rejected, .. } if rejected == value),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn auto_source_uses_host_mapping() {
        let platform = PlatformSource::Auto
            .resolve_with("darwin")
            .expect("supported host");
        assert_eq!(platform.as_str(), MACOS);
    }

    #[test]
    fn auto_source_fails_on_unsupported_host() {
        assert!(PlatformSource::Auto.resolve_with("haiku").is_err());
    }

    #[test]
    fn from_option_selects_source() {
        assert_eq!(PlatformSource::from_option(None), PlatformSource::Auto);
        assert_eq!(
            PlatformSource::from_option(Some("windows".to_owned())),
            PlatformSource::Explicit("windows".to_owned())
        );
    }

    #[test]
    fn archive_format_extensions() {
        assert_eq!(ArchiveFormat::Zip.extension(), ".zip");
        assert_eq!(ArchiveFormat::TarGz.extension(), ".tar.gz");
    }
}
