//! Error types for the release packager.
//!
//! Every variant is fatal for the invocation: the pipeline never retries and
//! leaves partial side effects (staging directory, missing dist archive) in
//! place for inspection.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while packaging a release.
#[derive(Debug, Error)]
pub enum PackagerError {
    /// The host operating system has no canonical platform name.
    #[error("unsupported host platform: {os} (expected darwin, linux or win32)")]
    UnsupportedPlatform {
        /// The operating system identifier reported by the host.
        os: String,
    },

    /// An explicit platform name cannot be used in a file name.
    #[error("invalid platform `{value}`: {reason}")]
    InvalidPlatform {
        /// The platform as supplied with `--platform`.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The release version was empty.
    #[error("release version must not be empty")]
    InvalidVersion,

    /// An external command exited with a non-zero status.
    #[error("command `{command}` failed with {status}{}", format_stderr(.stderr))]
    CommandFailed {
        /// The echoed command line.
        command: String,
        /// Human-readable exit status.
        status: String,
        /// Captured standard error of the command.
        stderr: String,
    },

    /// An external command could not be spawned at all.
    #[error("failed to run `{command}`")]
    CommandSpawn {
        /// The echoed command line.
        command: String,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// A manifest member was not found on disk.
    #[error("missing source file: {path}")]
    MissingSourceFile {
        /// Path of the missing file.
        path: Utf8PathBuf,
    },

    /// Copying files into the staging directory failed.
    #[error("staging failed: {reason}")]
    StagingFailed {
        /// Description of the staging failure.
        reason: String,
    },

    /// Writing the archive failed.
    #[error("failed to create archive {path}: {reason}")]
    ArchiveFailed {
        /// Path of the archive being written.
        path: Utf8PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Moving the archive into the dist directory failed.
    #[error("failed to finalise dist directory: {reason}")]
    DistFailed {
        /// Description of the failure.
        reason: String,
    },

    /// The working directory cannot be used.
    #[error("invalid working directory: {reason}")]
    InvalidWorkDir {
        /// Why the directory was rejected.
        reason: String,
    },

    /// The product name could not be determined.
    #[error("could not determine product name: {reason}")]
    ProductNotFound {
        /// Why discovery failed.
        reason: String,
    },

    /// A Cargo.toml file could not be parsed during product discovery.
    #[error("invalid Cargo.toml at {path}: {reason}")]
    InvalidCargoToml {
        /// Path to the invalid Cargo.toml.
        path: Utf8PathBuf,
        /// Description of the parse error.
        reason: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip writer reported an error.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Result type alias using [`PackagerError`].
pub type Result<T> = std::result::Result<T, PackagerError>;
