//! Debian package creation through `cargo-deb`.
//!
//! Runs after the archive has been published. `cargo-deb` is always
//! (re)installed first so the step works on a clean CI runner.

use crate::command::{CommandExecutor, command_line, run_checked};
use crate::error::Result;
use crate::platform::Platform;
use std::io::Write;

/// Arguments installing the `cargo-deb` subcommand.
pub const INSTALL_CARGO_DEB_ARGS: &[&str] = &["install", "cargo-deb", "--force"];

/// Arguments building the Debian package.
pub const CARGO_DEB_ARGS: &[&str] = &["deb"];

/// Returns `true` when the Debian step applies to `platform`.
///
/// # Examples
///
/// ```
/// use ruplacer_packager::deb::should_package;
/// use ruplacer_packager::platform::Platform;
///
/// assert!(should_package(&Platform::from("linux-x86_64"), true));
/// assert!(!should_package(&Platform::from("linux-x86_64"), false));
/// assert!(!should_package(&Platform::from("windows"), true));
/// ```
#[must_use]
pub fn should_package(platform: &Platform, enabled: bool) -> bool {
    enabled && platform.is_linux()
}

/// The command lines the Debian step runs, in order.
#[must_use]
pub fn planned_commands() -> Vec<String> {
    vec![
        command_line("cargo", INSTALL_CARGO_DEB_ARGS),
        command_line("cargo", CARGO_DEB_ARGS),
    ]
}

/// Install `cargo-deb` and build the Debian package.
///
/// # Errors
///
/// Returns [`crate::error::PackagerError::CommandFailed`] if either command
/// exits unsuccessfully; the package build is not attempted when the install
/// fails.
pub fn build_deb_package(executor: &dyn CommandExecutor, progress: &mut dyn Write) -> Result<()> {
    run_checked(executor, "cargo", INSTALL_CARGO_DEB_ARGS, progress)?;
    run_checked(executor, "cargo", CARGO_DEB_ARGS, progress)?;
    Ok(())
}
