//! External command execution.
//!
//! Every external step of the pipeline (cargo build, cargo-deb) goes through
//! [`CommandExecutor`] so the orchestration can be exercised without spawning
//! real processes.

use crate::error::{PackagerError, Result};
use crate::output::write_stderr_line;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace};
use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Abstraction for running external commands.
pub trait CommandExecutor {
    /// Runs a command with arguments and returns the captured output.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::CommandSpawn`] if the process cannot be started.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ruplacer_packager::command::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let executor = SystemCommandExecutor::default();
    /// let output = executor.run("cargo", &["--version"])?;
    /// assert!(output.status.success());
    /// # Ok::<(), ruplacer_packager::error::PackagerError>(())
    /// ```
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandExecutor {
    current_dir: Option<Utf8PathBuf>,
}

impl SystemCommandExecutor {
    /// Create an executor that runs every command inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Utf8Path) -> Self {
        Self {
            current_dir: Some(dir.to_owned()),
        }
    }
}

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        let mut command = Command::new(cmd);
        command.args(args).stdin(Stdio::null());
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        command
            .output()
            .map_err(|source| PackagerError::CommandSpawn {
                command: command_line(cmd, args),
                source,
            })
    }
}

/// Render a command and its arguments as a single display line.
#[must_use]
pub fn command_line(cmd: &str, args: &[&str]) -> String {
    std::iter::once(cmd)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Echo a command, run it and fail on a non-zero exit status.
///
/// The echo line (`:: cargo build --release`) is written to `progress`
/// before the command starts so a failure can be traced to the exact
/// invocation.
///
/// # Errors
///
/// Returns [`PackagerError::CommandFailed`] when the command exits
/// unsuccessfully, or the executor's error when it cannot be started.
pub fn run_checked(
    executor: &dyn CommandExecutor,
    cmd: &str,
    args: &[&str],
    progress: &mut dyn Write,
) -> Result<Output> {
    write_stderr_line(progress, format!(":: {}", command_line(cmd, args)));
    run_silent(executor, cmd, args)
}

/// Run a command without echoing it and fail on a non-zero exit status.
///
/// # Errors
///
/// Returns [`PackagerError::CommandFailed`] when the command exits
/// unsuccessfully, or the executor's error when it cannot be started.
pub fn run_silent(executor: &dyn CommandExecutor, cmd: &str, args: &[&str]) -> Result<Output> {
    let line = command_line(cmd, args);
    debug!("running {line}");

    let output = executor.run(cmd, args)?;
    trace!(
        "{line} stdout: {}",
        String::from_utf8_lossy(&output.stdout).trim_end()
    );

    if !output.status.success() {
        return Err(PackagerError::CommandFailed {
            command: line,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(output)
}
