//! Release pipeline orchestration.
//!
//! Runs the packaging steps strictly in sequence:
//!
//! 1. resolve the platform and product,
//! 2. build the release binary,
//! 3. stage the manifest into `<product>-<version>-<platform>/`,
//! 4. archive the staging directory,
//! 5. move the archive into `dist/` (plus an optional checksum sidecar),
//! 6. on Linux, build a Debian package with `cargo-deb`.
//!
//! The first failing step aborts the run. Nothing is rolled back.

use crate::builder::{BuildConfig, ReleaseBuild};
use crate::command::CommandExecutor;
use crate::config::PipelineConfig;
use crate::deb::{build_deb_package, planned_commands, should_package};
use crate::dist::{DIST_DIR, finalize};
use crate::error::Result;
use crate::output::{DryRunInfo, write_stderr_line};
use crate::platform::Platform;
use crate::release::archive::create_archive;
use crate::release::checksum::write_sidecar;
use crate::release::manifest::Manifest;
use crate::release::naming::ReleaseName;
use crate::stager::Stager;
use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use std::io::{self, Write};

/// A release whose platform and product are settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    /// Product, version and platform naming.
    pub release: ReleaseName,
    /// Whether the Debian step will run.
    pub secondary_package: bool,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    /// The platform the release was packaged for.
    pub platform: Platform,
    /// Staging directory left in the working directory.
    pub staging_dir: Utf8PathBuf,
    /// Published archive inside `dist/`.
    pub archive_path: Utf8PathBuf,
    /// Checksum sidecar, when requested.
    pub checksum_path: Option<Utf8PathBuf>,
    /// Whether the Debian package was built.
    pub secondary_packaged: bool,
}

/// Resolve platform and product for `config`, detecting the platform from
/// the running host when it was not given.
///
/// # Errors
///
/// Returns an error if the host is unsupported or the product name cannot
/// be determined.
pub fn resolve_release(config: &PipelineConfig) -> Result<ResolvedRelease> {
    resolve_release_for_host(config, std::env::consts::OS)
}

/// Resolve platform and product, treating `host_os` as the running host.
///
/// # Errors
///
/// Returns an error if `host_os` is unsupported or the product name cannot
/// be determined.
pub fn resolve_release_for_host(
    config: &PipelineConfig,
    host_os: &str,
) -> Result<ResolvedRelease> {
    let platform = config.platform_source().resolve_with(host_os)?;
    let product = config.resolve_product()?;
    let secondary_package = should_package(&platform, config.secondary_package_enabled());
    info!("packaging {product} {} for {platform}", config.version());

    Ok(ResolvedRelease {
        release: ReleaseName::new(product, config.version().clone(), platform),
        secondary_package,
    })
}

/// Run every step after resolution.
///
/// Progress is written to `progress` unless the configuration is quiet.
///
/// # Errors
///
/// Returns the error of the first step that fails.
pub fn execute(
    config: &PipelineConfig,
    resolved: &ResolvedRelease,
    builder: &dyn ReleaseBuild,
    executor: &dyn CommandExecutor,
    progress: &mut dyn Write,
) -> Result<PipelineOutcome> {
    let mut sink = io::sink();
    let progress: &mut dyn Write = if config.quiet() { &mut sink } else { progress };
    let release = &resolved.release;

    if config.skip_build() {
        info!("skipping release build");
        write_stderr_line(progress, "Skipping release build");
    } else {
        perform_build_with(release, builder, progress)?;
    }

    let staging_dir = stage_release(config.work_dir(), release, progress)?;

    write_stderr_line(
        progress,
        format!("Creating {} archive", release.platform().archive_format()),
    );
    let archive = create_archive(&staging_dir, release.platform().archive_format())?;
    let archive_path = finalize(config.work_dir(), &archive)?;
    info!("published {archive_path}");

    let checksum_path = if config.checksum() {
        let sidecar = write_sidecar(&archive_path)?;
        write_stderr_line(progress, format!("Wrote checksum {sidecar}"));
        Some(sidecar)
    } else {
        None
    };

    if resolved.secondary_package {
        write_stderr_line(progress, "Building Debian package");
        build_deb_package(executor, progress)?;
    }

    Ok(PipelineOutcome {
        platform: release.platform().clone(),
        staging_dir,
        archive_path,
        checksum_path,
        secondary_packaged: resolved.secondary_package,
    })
}

/// Build the release binary through `builder`, echoing the command first.
///
/// # Errors
///
/// Returns the builder's error.
pub fn perform_build_with(
    release: &ReleaseName,
    builder: &dyn ReleaseBuild,
    progress: &mut dyn Write,
) -> Result<()> {
    write_stderr_line(
        progress,
        format!(
            "Building {} {} for {}",
            release.product(),
            release.version(),
            release.platform()
        ),
    );
    write_stderr_line(progress, format!(":: {}", builder.command_line()));
    builder.build_release()
}

/// Create the staging directory and copy the manifest into it.
///
/// # Errors
///
/// Returns an error if a member is missing or cannot be copied.
pub fn stage_release(
    work_dir: &Utf8Path,
    release: &ReleaseName,
    progress: &mut dyn Write,
) -> Result<Utf8PathBuf> {
    let stager = Stager::new(work_dir, release.clone());
    let manifest = Manifest::for_release(release);

    let staging_dir = stager.prepare()?;
    write_stderr_line(
        progress,
        format!("Staging files into {}", release.staging_dir_name()),
    );
    stager.stage_all(&manifest, progress)?;
    Ok(staging_dir)
}

/// Describe what a run would do without doing any of it.
pub fn print_plan(
    config: &PipelineConfig,
    resolved: &ResolvedRelease,
    progress: &mut dyn Write,
) {
    let release = &resolved.release;
    let manifest = Manifest::for_release(release);
    let members: Vec<String> = manifest
        .entries()
        .iter()
        .map(|entry| entry.source.to_string())
        .collect();

    let mut commands = Vec::new();
    if !config.skip_build() {
        let build = BuildConfig {
            verbosity: config.verbosity(),
        };
        commands.push(build.command_line());
    }
    if resolved.secondary_package {
        commands.extend(planned_commands());
    }

    let staging_name = release.staging_dir_name();
    let archive_path = format!("{DIST_DIR}/{}", release.archive_filename());
    let info = DryRunInfo {
        work_dir: config.work_dir(),
        product: release.product(),
        version: release.version().as_str(),
        platform: release.platform(),
        staging_name: &staging_name,
        archive_path: &archive_path,
        members: &members,
        commands: &commands,
        checksum: config.checksum(),
    };
    write_stderr_line(progress, info.display_text());
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
