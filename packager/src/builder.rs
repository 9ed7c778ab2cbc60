//! Release build orchestration.
//!
//! Runs `cargo build --release` for the project in the working directory. The
//! build is the only step allowed to produce the binary; packaging never
//! substitutes one.

use crate::command::{CommandExecutor, command_line, run_silent};
use crate::error::Result;

/// Arguments passed to cargo for an optimised build.
pub const RELEASE_BUILD_ARGS: &[&str] = &["build", "--release"];

/// Something that can produce the release binary.
#[cfg_attr(test, mockall::automock)]
pub trait ReleaseBuild {
    /// The command line echoed before the build starts.
    fn command_line(&self) -> String;

    /// Build the release binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the build toolchain fails.
    fn build_release(&self) -> Result<()>;
}

/// Configuration for the cargo build.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildConfig {
    /// Cargo verbosity level; each level adds one `-v`.
    pub verbosity: u8,
}

impl BuildConfig {
    /// The cargo arguments for this configuration.
    #[must_use]
    pub fn cargo_args(self) -> Vec<&'static str> {
        let mut args = RELEASE_BUILD_ARGS.to_vec();
        args.extend(std::iter::repeat_n("-v", usize::from(self.verbosity)));
        args
    }

    /// The full cargo command line for this configuration.
    #[must_use]
    pub fn command_line(self) -> String {
        command_line("cargo", &self.cargo_args())
    }
}

/// Builds the release binary with cargo.
pub struct CargoReleaseBuilder<'a> {
    executor: &'a dyn CommandExecutor,
    config: BuildConfig,
}

impl<'a> CargoReleaseBuilder<'a> {
    /// Create a builder running cargo through `executor`.
    #[must_use]
    pub fn new(executor: &'a dyn CommandExecutor, config: BuildConfig) -> Self {
        Self { executor, config }
    }

    /// The cargo arguments this builder will use.
    #[must_use]
    pub fn cargo_args(&self) -> Vec<&'static str> {
        self.config.cargo_args()
    }
}

impl ReleaseBuild for CargoReleaseBuilder<'_> {
    fn command_line(&self) -> String {
        self.config.command_line()
    }

    fn build_release(&self) -> Result<()> {
        run_silent(self.executor, "cargo", &self.cargo_args())?;
        Ok(())
    }
}
