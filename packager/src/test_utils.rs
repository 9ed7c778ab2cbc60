//! Test doubles and fixtures shared by unit, binary and behaviour tests.

use crate::command::{CommandExecutor, command_line};
use crate::error::{PackagerError, Result};
use camino::Utf8Path;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::process::{ExitStatus, Output};

/// Exit status carrying `code`.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    // Wait statuses keep the exit code in the second byte.
    ExitStatus::from_raw(code << 8)
}

/// Exit status carrying `code`.
#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(u32::from_ne_bytes(code.to_ne_bytes()))
}

/// Output of a process that exited 0 and printed nothing.
pub fn success_output() -> Output {
    Output {
        status: exit_status(0),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

/// Output of a process that exited 1 after printing `stderr`.
pub fn failure_output(stderr: &str) -> Output {
    Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// One scripted invocation and the result handed back for it.
#[derive(Debug)]
pub struct ExpectedCall {
    /// Program name, e.g. `cargo`.
    pub cmd: &'static str,
    /// Exact argument list.
    pub args: Vec<&'static str>,
    /// What the executor returns when the call matches.
    pub result: Result<Output>,
}

impl ExpectedCall {
    /// A call that exits successfully.
    pub fn succeeding(cmd: &'static str, args: Vec<&'static str>) -> Self {
        Self {
            cmd,
            args,
            result: Ok(success_output()),
        }
    }

    /// A call that exits with status 1 and the given stderr.
    pub fn failing(cmd: &'static str, args: Vec<&'static str>, stderr: &str) -> Self {
        Self {
            cmd,
            args,
            result: Ok(failure_output(stderr)),
        }
    }

    fn matches(&self, cmd: &str, args: &[&str]) -> bool {
        self.cmd == cmd && self.args.as_slice() == args
    }
}

/// A [`CommandExecutor`] that plays back a fixed script.
///
/// Calls must arrive in script order with identical arguments. Any deviation
/// yields [`PackagerError::StubMismatch`], which the pipeline then reports as
/// an ordinary failure, so a test sees it through the returned error.
#[derive(Debug)]
pub struct StubExecutor {
    script: RefCell<VecDeque<ExpectedCall>>,
}

impl StubExecutor {
    /// Executor expecting exactly `script`, in order.
    pub fn new(script: Vec<ExpectedCall>) -> Self {
        Self {
            script: RefCell::new(script.into()),
        }
    }

    /// How many scripted calls have not happened yet.
    pub fn remaining(&self) -> usize {
        self.script.borrow().len()
    }

    /// Fail the test if part of the script was never played.
    ///
    /// # Panics
    ///
    /// Panics when scripted calls remain.
    pub fn assert_finished(&self) {
        let script = self.script.borrow();
        let pending: Vec<String> = script
            .iter()
            .map(|call| command_line(call.cmd, &call.args))
            .collect();
        assert!(pending.is_empty(), "scripted calls never ran: {pending:?}");
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        let actual = command_line(cmd, args);
        let Some(call) = self.script.borrow_mut().pop_front() else {
            return Err(PackagerError::StubMismatch {
                message: format!("script exhausted, got `{actual}`"),
            });
        };

        if !call.matches(cmd, args) {
            return Err(PackagerError::StubMismatch {
                message: format!(
                    "expected `{}`, got `{actual}`",
                    command_line(call.cmd, &call.args)
                ),
            });
        }

        call.result
    }
}

/// Populate `work_dir` as a checkout after a successful release build: the
/// binary under `target/release/` plus README, CHANGELOG and LICENSE.
///
/// # Panics
///
/// Panics if any file cannot be written.
pub fn write_release_inputs(work_dir: &Utf8Path, binary_name: &str) {
    let release_dir = work_dir.join("target").join("release");
    fs::create_dir_all(&release_dir).expect("create target/release");
    fs::write(release_dir.join(binary_name), b"\x7fELF fake binary").expect("write binary");
    write_text_inputs(work_dir);
}

/// Populate `work_dir` with the documents only, as if no build ran.
///
/// # Panics
///
/// Panics if any file cannot be written.
pub fn write_text_inputs(work_dir: &Utf8Path) {
    for (name, contents) in [
        ("README.md", "# ruplacer\n"),
        ("CHANGELOG.md", "# Changelog\n"),
        ("LICENSE", "BSD-3-Clause\n"),
    ] {
        fs::write(work_dir.join(name), contents).expect("write release input");
    }
}
