//! Pipeline configuration and product name discovery.

use crate::error::{PackagerError, Result};
use crate::platform::PlatformSource;
use crate::release::naming::Version;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;

/// Everything a pipeline run needs to know.
///
/// Built with [`PipelineConfig::new`] and refined with the `with_*` setters.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use ruplacer_packager::config::PipelineConfig;
/// use ruplacer_packager::platform::PlatformSource;
/// use ruplacer_packager::release::naming::Version;
///
/// let config = PipelineConfig::new(
///     Utf8PathBuf::from("/src/ruplacer"),
///     Version::try_from("2.1.0").expect("valid version"),
/// )
/// .with_platform_source(PlatformSource::Explicit("windows".to_owned()))
/// .with_checksum(true);
///
/// assert!(!config.secondary_package_enabled());
/// assert!(config.checksum());
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    work_dir: Utf8PathBuf,
    version: Version,
    product: Option<String>,
    platform_source: PlatformSource,
    secondary_package: Option<bool>,
    skip_build: bool,
    checksum: bool,
    verbosity: u8,
    quiet: bool,
    dry_run: bool,
}

impl PipelineConfig {
    /// Configuration for packaging `version` from `work_dir` with defaults:
    /// auto-detected platform, product from `Cargo.toml`, build enabled.
    #[must_use]
    pub fn new(work_dir: Utf8PathBuf, version: Version) -> Self {
        Self {
            work_dir,
            version,
            product: None,
            platform_source: PlatformSource::Auto,
            secondary_package: None,
            skip_build: false,
            checksum: false,
            verbosity: 0,
            quiet: false,
            dry_run: false,
        }
    }

    /// Override the product name instead of reading it from `Cargo.toml`.
    #[must_use]
    pub fn with_product(mut self, product: Option<String>) -> Self {
        self.product = product;
        self
    }

    /// Choose how the platform is determined.
    #[must_use]
    pub fn with_platform_source(mut self, source: PlatformSource) -> Self {
        self.platform_source = source;
        self
    }

    /// Force the Debian step on or off. `None` restores the default.
    #[must_use]
    pub fn with_secondary_package(mut self, enabled: Option<bool>) -> Self {
        self.secondary_package = enabled;
        self
    }

    /// Package an existing binary without running the release build.
    #[must_use]
    pub fn with_skip_build(mut self, skip_build: bool) -> Self {
        self.skip_build = skip_build;
        self
    }

    /// Write a SHA-256 sidecar next to the published archive.
    #[must_use]
    pub fn with_checksum(mut self, checksum: bool) -> Self {
        self.checksum = checksum;
        self
    }

    /// Cargo verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Suppress progress output.
    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Report the plan without touching the filesystem or running commands.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Working directory holding the project checkout.
    #[must_use]
    pub fn work_dir(&self) -> &Utf8Path {
        &self.work_dir
    }

    /// Release version.
    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Platform selection mode.
    #[must_use]
    pub fn platform_source(&self) -> &PlatformSource {
        &self.platform_source
    }

    /// Whether the Debian step is enabled.
    ///
    /// Without an explicit override it follows the platform mode: enabled
    /// when the platform is auto-detected, disabled when one is given.
    #[must_use]
    pub fn secondary_package_enabled(&self) -> bool {
        self.secondary_package
            .unwrap_or_else(|| self.platform_source.is_auto())
    }

    /// Whether the release build is skipped.
    #[must_use]
    pub fn skip_build(&self) -> bool {
        self.skip_build
    }

    /// Whether a checksum sidecar is written.
    #[must_use]
    pub fn checksum(&self) -> bool {
        self.checksum
    }

    /// Cargo verbosity level.
    #[must_use]
    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    /// Whether progress output is suppressed.
    #[must_use]
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Whether this is a dry run.
    #[must_use]
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// The product name: the override if set, else `[package].name` from
    /// the working directory's `Cargo.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::ProductNotFound`] or
    /// [`PackagerError::InvalidCargoToml`] when discovery fails.
    pub fn resolve_product(&self) -> Result<String> {
        match &self.product {
            Some(product) if !product.trim().is_empty() => Ok(product.clone()),
            Some(_) => Err(PackagerError::ProductNotFound {
                reason: "product name must not be empty".to_owned(),
            }),
            None => read_product_name(&self.work_dir),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CargoManifest {
    package: Option<PackageSection>,
}

#[derive(Debug, Deserialize)]
struct PackageSection {
    name: String,
}

/// Read `[package].name` from `<work_dir>/Cargo.toml`.
///
/// # Errors
///
/// Returns [`PackagerError::ProductNotFound`] if the file is missing or has
/// no `[package]` table, and [`PackagerError::InvalidCargoToml`] if it does
/// not parse.
pub fn read_product_name(work_dir: &Utf8Path) -> Result<String> {
    let cargo_toml = work_dir.join("Cargo.toml");
    let contents = fs::read_to_string(&cargo_toml).map_err(|e| PackagerError::ProductNotFound {
        reason: format!("cannot read {cargo_toml}: {e}; pass --product"),
    })?;

    let manifest: CargoManifest =
        toml::from_str(&contents).map_err(|e| PackagerError::InvalidCargoToml {
            path: cargo_toml.clone(),
            reason: e.to_string(),
        })?;

    manifest
        .package
        .map(|package| package.name)
        .ok_or_else(|| PackagerError::ProductNotFound {
            reason: format!("{cargo_toml} has no [package] table; pass --product"),
        })
}
