//! CLI argument definitions for the release packager.
//!
//! Kept apart from the entrypoint so argument parsing can be tested without
//! running the pipeline.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::platform::PlatformSource;
use crate::release::naming::Version;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;

/// Build, stage and archive a ruplacer release.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "ruplacer-package")]
#[command(about, disable_version_flag = true)]
#[command(long_about = concat!(
    "Build, stage and archive a ruplacer release.\n\n",
    "Runs `cargo build --release`, copies the binary together with README.md, ",
    "CHANGELOG.md and LICENSE into <product>-<version>-<platform>/, archives ",
    "that directory (zip on Windows, tar.gz elsewhere) and moves the archive ",
    "into dist/. On Linux a Debian package is also built with cargo-deb.",
))]
#[command(after_help = concat!(
    "PLATFORMS:\n",
    "  macos, linux-x86_64, windows (detected from the host when omitted)\n\n",
    "EXAMPLES:\n",
    "  Package for the current host:\n",
    "    $ ruplacer-package --version 2.1.0\n\n",
    "  Package a Windows build produced by an earlier CI step:\n",
    "    $ ruplacer-package --version 2.1.0 --platform windows --skip-build\n\n",
    "  Preview without building:\n",
    "    $ ruplacer-package --version 2.1.0 --dry-run",
))]
pub struct Cli {
    /// Release version used in the archive name.
    #[arg(long, value_name = "VERSION")]
    pub version: String,

    /// Target platform name [default: detected from the host].
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Product name [default: package name from Cargo.toml].
    #[arg(long, value_name = "NAME")]
    pub product: Option<String>,

    /// Directory containing the project checkout [default: current directory].
    #[arg(short = 'C', long, value_name = "DIR")]
    pub work_dir: Option<Utf8PathBuf>,

    /// Build a Debian package even when the platform was given explicitly.
    #[arg(long, conflicts_with = "no_deb")]
    pub deb: bool,

    /// Never build a Debian package.
    #[arg(long)]
    pub no_deb: bool,

    /// Package an existing release binary without running cargo build.
    #[arg(long)]
    pub skip_build: bool,

    /// Write a SHA-256 checksum file next to the archive.
    #[arg(long)]
    pub checksum: bool,

    /// Show what would be packaged and exit.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase cargo output verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// The Debian packaging override expressed by `--deb`/`--no-deb`.
    #[must_use]
    pub fn secondary_package_override(&self) -> Option<bool> {
        match (self.deb, self.no_deb) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }

    /// The working directory, resolved against `cwd` when relative.
    #[must_use]
    pub fn resolve_work_dir(&self, cwd: &Utf8Path) -> Utf8PathBuf {
        match &self.work_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.to_owned(),
        }
    }

    /// Convert the parsed arguments into a pipeline configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PackagerError::InvalidVersion`] if the version
    /// is blank.
    pub fn to_config(&self, cwd: &Utf8Path) -> Result<PipelineConfig> {
        let version = Version::try_from(self.version.as_str())?;
        Ok(PipelineConfig::new(self.resolve_work_dir(cwd), version)
            .with_product(self.product.clone())
            .with_platform_source(PlatformSource::from_option(self.platform.clone()))
            .with_secondary_package(self.secondary_package_override())
            .with_skip_build(self.skip_build)
            .with_checksum(self.checksum)
            .with_verbosity(self.verbosity)
            .with_quiet(self.quiet)
            .with_dry_run(self.dry_run))
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
